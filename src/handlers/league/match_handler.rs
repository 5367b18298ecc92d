// src/handlers/league/match_handler.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use uuid::Uuid;

use crate::errors::SubmissionError;
use crate::league::lifecycle::MatchLifecycleManager;
use crate::middleware::auth::Claims;
use crate::models::league::{ExistingMatchQuery, SubmitMatchRequest, UpdateMatchStatusRequest};

fn submission_error_response(e: SubmissionError) -> HttpResponse {
    let body = json!({
        "success": false,
        "message": e.to_string()
    });
    match e {
        SubmissionError::TeamConflict
        | SubmissionError::MissingReferenceData
        | SubmissionError::DivisionRequired
        | SubmissionError::InvalidScore(_) => HttpResponse::BadRequest().json(body),
        SubmissionError::DuplicateMatch { .. } | SubmissionError::CompletedIsFinal(_) => {
            HttpResponse::Conflict().json(body)
        }
        SubmissionError::NotFound => HttpResponse::NotFound().json(body),
        SubmissionError::Storage(_) => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": "Storage failure, please retry"
        })),
    }
}

/// Submit a match draft with a schedule or score intent
#[tracing::instrument(
    name = "Submit match",
    skip(request, lifecycle, claims),
    fields(
        intent = ?request.intent,
        user = %claims.username
    )
)]
pub async fn submit_match(
    request: web::Json<SubmitMatchRequest>,
    lifecycle: web::Data<MatchLifecycleManager>,
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
    match lifecycle.submit(&actor, request.intent, request.draft).await {
        Ok(m) => {
            tracing::info!("Match {} submitted as {}", m.id, m.status);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": m
            })))
        }
        Err(e) => {
            tracing::warn!("Match submission rejected: {}", e);
            Ok(submission_error_response(e))
        }
    }
}

/// Duplicate pre-check for the scheduling form
#[tracing::instrument(
    name = "Check existing match",
    skip(query, lifecycle),
    fields(query = %query)
)]
pub async fn check_existing_match(
    query: web::Query<ExistingMatchQuery>,
    lifecycle: web::Data<MatchLifecycleManager>,
) -> Result<HttpResponse> {
    let check = lifecycle
        .check_existing(query.date, query.home_team_id, query.away_team_id)
        .await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": check
    })))
}

/// Get a single match
#[tracing::instrument(name = "Get match", skip(lifecycle), fields(match_id = %match_id))]
pub async fn get_match(
    match_id: Uuid,
    lifecycle: web::Data<MatchLifecycleManager>,
) -> Result<HttpResponse> {
    match lifecycle.get_match(match_id).await {
        Ok(Some(m)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": m
        }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Match not found"
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch match {}: {}", match_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve match"
            })))
        }
    }
}

/// Postpone, cancel or reinstate a fixture
#[tracing::instrument(
    name = "Update match status",
    skip(request, lifecycle, claims),
    fields(
        match_id = %match_id,
        status = %request.status,
        user = %claims.username
    )
)]
pub async fn update_match_status(
    match_id: Uuid,
    request: web::Json<UpdateMatchStatusRequest>,
    lifecycle: web::Data<MatchLifecycleManager>,
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

    match lifecycle
        .update_status(&actor, match_id, request.status)
        .await
    {
        Ok(m) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": m
        }))),
        Err(e) => {
            tracing::warn!("Status update rejected for match {}: {}", match_id, e);
            Ok(submission_error_response(e))
        }
    }
}
