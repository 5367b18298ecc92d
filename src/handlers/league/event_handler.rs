// src/handlers/league/event_handler.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use uuid::Uuid;

use crate::errors::EventError;
use crate::game::event_log::MatchEventLog;
use crate::middleware::auth::Claims;
use crate::models::events::{AddEventRequest, MatchEventPayload};

pub(super) fn event_error_response(e: EventError) -> HttpResponse {
    let body = json!({
        "success": false,
        "message": e.to_string()
    });
    match e {
        EventError::Unauthorized => HttpResponse::Forbidden().json(body),
        EventError::MatchNotFound | EventError::EventNotFound => {
            HttpResponse::NotFound().json(body)
        }
        EventError::TeamNotInMatch => HttpResponse::BadRequest().json(body),
        EventError::Storage(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Storage failure, please retry"
        })),
    }
}

/// Record a goal or substitution against a match
#[tracing::instrument(
    name = "Add match event",
    skip(request, event_log, claims),
    fields(
        match_id = %match_id,
        user = %claims.username
    )
)]
pub async fn add_match_event(
    match_id: Uuid,
    request: web::Json<AddEventRequest>,
    event_log: web::Data<MatchEventLog>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = match claims.actor() {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Invalid user id in token"
            })))
        }
    };

    let request = request.into_inner();
    let result = match request.payload {
        MatchEventPayload::Goal { scorer_id, assist_id } => {
            event_log
                .add_goal(
                    &actor,
                    match_id,
                    request.team_id,
                    scorer_id,
                    assist_id,
                    request.minute,
                )
                .await
        }
        MatchEventPayload::Substitution { player_off_id, player_on_id } => {
            event_log
                .add_substitution(
                    &actor,
                    match_id,
                    request.team_id,
                    player_off_id,
                    player_on_id,
                    request.minute,
                )
                .await
        }
    };

    match result {
        Ok(event) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": event
        }))),
        Err(e) => {
            tracing::warn!("Event rejected on match {}: {}", match_id, e);
            Ok(event_error_response(e))
        }
    }
}

/// Soft-delete an event; repeating the call is a no-op success
#[tracing::instrument(
    name = "Remove match event",
    skip(event_log, claims),
    fields(
        event_id = %event_id,
        user = %claims.username
    )
)]
pub async fn remove_match_event(
    event_id: Uuid,
    event_log: web::Data<MatchEventLog>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = match claims.actor() {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Invalid user id in token"
            })))
        }
    };

    match event_log.remove_event(&actor, event_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Event removed"
        }))),
        Err(e) => {
            tracing::warn!("Event removal rejected for {}: {}", event_id, e);
            Ok(event_error_response(e))
        }
    }
}

/// List the live events for one team in a match
#[tracing::instrument(
    name = "Get match events",
    skip(event_log),
    fields(match_id = %match_id, team_id = %team_id)
)]
pub async fn get_match_events(
    match_id: Uuid,
    team_id: Uuid,
    event_log: web::Data<MatchEventLog>,
) -> Result<HttpResponse> {
    match event_log.live_events(match_id, team_id).await {
        Ok(events) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": events,
            "total_count": events.len()
        }))),
        Err(e) => {
            tracing::error!("Failed to list events for match {}: {}", match_id, e);
            Ok(event_error_response(e))
        }
    }
}
