// src/handlers/league/reference_handler.rs
//
// Read-only proxies over the reference data the scheduling form needs:
// dropdown options and the team-candidate list for the selected scope.
// Maintaining this data is the surrounding application's business.
use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ReferenceDataProvider;
use crate::errors::StoreError;

#[derive(Debug, Deserialize)]
pub struct TeamCandidatesQuery {
    pub age_group_id: Uuid,
    pub division_id: Option<Uuid>,
}

fn reference_failure(what: &str, e: StoreError) -> HttpResponse {
    tracing::error!("Failed to fetch {}: {}", what, e);
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": format!("Failed to retrieve {}", what)
    }))
}

#[tracing::instrument(name = "Get seasons", skip(reference))]
pub async fn get_seasons(
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    match reference.seasons().await {
        Ok(seasons) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": seasons
        }))),
        Err(e) => Ok(reference_failure("seasons", e)),
    }
}

#[tracing::instrument(name = "Get age groups", skip(reference))]
pub async fn get_age_groups(
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    match reference.age_groups().await {
        Ok(age_groups) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": age_groups
        }))),
        Err(e) => Ok(reference_failure("age groups", e)),
    }
}

#[tracing::instrument(name = "Get match types", skip(reference))]
pub async fn get_match_types(
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    match reference.match_types().await {
        Ok(match_types) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": match_types
        }))),
        Err(e) => Ok(reference_failure("match types", e)),
    }
}

#[tracing::instrument(
    name = "Get divisions",
    skip(reference),
    fields(age_group_id = %age_group_id)
)]
pub async fn get_divisions(
    age_group_id: Uuid,
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    match reference.divisions(age_group_id).await {
        Ok(divisions) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": divisions
        }))),
        Err(e) => Ok(reference_failure("divisions", e)),
    }
}

/// Teams eligible for the selected competition scope. The division filter
/// applies to league play only; the client omits it otherwise.
#[tracing::instrument(
    name = "Get team candidates",
    skip(query, reference),
    fields(
        age_group_id = %query.age_group_id,
        division_id = ?query.division_id
    )
)]
pub async fn get_team_candidates(
    query: web::Query<TeamCandidatesQuery>,
    reference: web::Data<Arc<dyn ReferenceDataProvider>>,
) -> Result<HttpResponse> {
    match reference
        .teams_in_scope(query.age_group_id, query.division_id)
        .await
    {
        Ok(teams) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": teams,
            "total_count": teams.len()
        }))),
        Err(e) => Ok(reference_failure("teams", e)),
    }
}
