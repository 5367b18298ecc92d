// src/handlers/league/stats_handler.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{PlayerStatStore, ReferenceDataProvider};
use crate::game::stats_projector::StatsProjector;
use crate::handlers::league::event_handler::event_error_response;
use crate::middleware::auth::Claims;
use crate::models::stats::SavePlayerStatsRequest;

/// Get one team's per-player stats for a match
#[tracing::instrument(
    name = "Get player stats",
    skip(stats),
    fields(match_id = %match_id, team_id = %team_id)
)]
pub async fn get_player_stats(
    match_id: Uuid,
    team_id: Uuid,
    stats: web::Data<Arc<dyn PlayerStatStore>>,
) -> Result<HttpResponse> {
    match stats.team_stats(match_id, team_id).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": rows,
            "total_count": rows.len()
        }))),
        Err(e) => {
            tracing::error!(
                "Failed to fetch stats for match {} team {}: {}",
                match_id,
                team_id,
                e
            );
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve player stats"
            })))
        }
    }
}

/// Save manually entered stat fields for one team
#[tracing::instrument(
    name = "Save player stats",
    skip(request, projector, claims),
    fields(
        match_id = %match_id,
        team_id = %team_id,
        user = %claims.username
    )
)]
pub async fn save_player_stats(
    match_id: Uuid,
    team_id: Uuid,
    request: web::Json<SavePlayerStatsRequest>,
    projector: web::Data<Arc<StatsProjector>>,
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

    match projector
        .save_player_stats(&actor, match_id, team_id, &request.entries)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Player stats saved"
        }))),
        Err(e) => {
            tracing::warn!(
                "Stat save rejected for match {} team {}: {}",
                match_id,
                team_id,
                e
            );
            Ok(event_error_response(e))
        }
    }
}

/// Get a team's roster
#[tracing::instrument(name = "Get roster", skip(reference), fields(team_id = %team_id))]
pub async fn get_team_roster(
    team_id: Uuid,
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    match reference.roster(team_id).await {
        Ok(players) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": players,
            "total_count": players.len()
        }))),
        Err(e) => {
            tracing::error!("Failed to fetch roster for team {}: {}", team_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to retrieve roster"
            })))
        }
    }
}
