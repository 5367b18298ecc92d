// src/routes/league.rs
use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{PlayerStatStore, ReferenceDataProvider};
use crate::game::event_log::MatchEventLog;
use crate::game::stats_projector::StatsProjector;
use crate::handlers::league::reference_handler::TeamCandidatesQuery;
use crate::handlers::league::{event_handler, match_handler, reference_handler, stats_handler};
use crate::league::lifecycle::MatchLifecycleManager;
use crate::middleware::auth::Claims;
use crate::models::events::AddEventRequest;
use crate::models::league::{ExistingMatchQuery, SubmitMatchRequest, UpdateMatchStatusRequest};
use crate::models::stats::SavePlayerStatsRequest;

/// Duplicate pre-check for the scheduling form
#[get("/matches/existing")]
async fn check_existing_match(
    query: web::Query<ExistingMatchQuery>,
    lifecycle: web::Data<MatchLifecycleManager>,
) -> Result<HttpResponse> {
    match_handler::check_existing_match(query, lifecycle).await
}

/// Submit a match (schedule a fixture or record a result)
#[post("/matches")]
async fn submit_match(
    request: web::Json<SubmitMatchRequest>,
    lifecycle: web::Data<MatchLifecycleManager>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::submit_match(request, lifecycle, claims).await
}

/// Get a single match
#[get("/matches/{match_id}")]
async fn get_match(
    path: web::Path<Uuid>,
    lifecycle: web::Data<MatchLifecycleManager>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::get_match(match_id, lifecycle).await
}

/// Postpone, cancel or reinstate a fixture
#[put("/matches/{match_id}/status")]
async fn update_match_status(
    path: web::Path<Uuid>,
    request: web::Json<UpdateMatchStatusRequest>,
    lifecycle: web::Data<MatchLifecycleManager>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    match_handler::update_match_status(match_id, request, lifecycle, claims).await
}

/// Record a goal or substitution
#[post("/matches/{match_id}/events")]
async fn add_match_event(
    path: web::Path<Uuid>,
    request: web::Json<AddEventRequest>,
    event_log: web::Data<MatchEventLog>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    event_handler::add_match_event(match_id, request, event_log, claims).await
}

/// Soft-delete an event
#[delete("/events/{event_id}")]
async fn remove_match_event(
    path: web::Path<Uuid>,
    event_log: web::Data<MatchEventLog>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    event_handler::remove_match_event(event_id, event_log, claims).await
}

/// Live events for one team in a match
#[get("/matches/{match_id}/teams/{team_id}/events")]
async fn get_match_events(
    path: web::Path<(Uuid, Uuid)>,
    event_log: web::Data<MatchEventLog>,
) -> Result<HttpResponse> {
    let (match_id, team_id) = path.into_inner();
    event_handler::get_match_events(match_id, team_id, event_log).await
}

/// Per-player stats for one team in a match
#[get("/matches/{match_id}/teams/{team_id}/stats")]
async fn get_player_stats(
    path: web::Path<(Uuid, Uuid)>,
    stats: web::Data<Arc<dyn PlayerStatStore>>,
) -> Result<HttpResponse> {
    let (match_id, team_id) = path.into_inner();
    stats_handler::get_player_stats(match_id, team_id, stats).await
}

/// Save manually entered stat fields
#[put("/matches/{match_id}/teams/{team_id}/stats")]
async fn save_player_stats(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<SavePlayerStatsRequest>,
    projector: web::Data<Arc<StatsProjector>>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (match_id, team_id) = path.into_inner();
    stats_handler::save_player_stats(match_id, team_id, request, projector, claims).await
}

/// Team roster
#[get("/teams/{team_id}/roster")]
async fn get_team_roster(
    path: web::Path<Uuid>,
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    stats_handler::get_team_roster(team_id, reference).await
}

/// Seasons for the scheduling form
#[get("/reference/seasons")]
async fn get_seasons(
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    reference_handler::get_seasons(reference).await
}

/// Age groups for the scheduling form
#[get("/reference/age-groups")]
async fn get_age_groups(
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    reference_handler::get_age_groups(reference).await
}

/// Match types for the scheduling form
#[get("/reference/match-types")]
async fn get_match_types(
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    reference_handler::get_match_types(reference).await
}

/// Divisions within an age group
#[get("/reference/age-groups/{age_group_id}/divisions")]
async fn get_divisions(
    path: web::Path<Uuid>,
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    let age_group_id = path.into_inner();
    reference_handler::get_divisions(age_group_id, reference).await
}

/// Team candidates for the selected competition scope
#[get("/teams")]
async fn get_team_candidates(
    query: web::Query<TeamCandidatesQuery>,
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    reference_handler::get_team_candidates(query, reference).await
}
