use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{http, web, App, HttpServer};
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod game;
mod handlers;
pub mod league;
pub mod middleware;
pub mod models;
mod routes;
pub mod telemetry;

use crate::auth::gate::{AuthorizationGate, PgTeamManagerGate};
use crate::config::jwt::JwtSettings;
use crate::config::settings::LeagueSettings;
use crate::db::{
    MatchEventStore, MatchStore, PgMatchEventStore, PgMatchStore, PgPlayerStatStore,
    PgReferenceData, PlayerStatStore, ReferenceDataProvider,
};
use crate::game::event_log::MatchEventLog;
use crate::game::stats_projector::StatsProjector;
use crate::league::duplicates::DuplicateMatchResolver;
use crate::league::lifecycle::MatchLifecycleManager;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    league_settings: LeagueSettings,
) -> Result<Server, std::io::Error> {
    let reference_offset = league_settings
        .reference_offset()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // Wire the core services against the Postgres stores once; handlers
    // share them through web::Data.
    let matches: Arc<dyn MatchStore> = Arc::new(PgMatchStore::new(db_pool.clone()));
    let events: Arc<dyn MatchEventStore> = Arc::new(PgMatchEventStore::new(db_pool.clone()));
    let stats: Arc<dyn PlayerStatStore> = Arc::new(PgPlayerStatStore::new(db_pool.clone()));
    let reference: Arc<dyn ReferenceDataProvider> = Arc::new(PgReferenceData::new(db_pool.clone()));
    let gate: Arc<dyn AuthorizationGate> = Arc::new(PgTeamManagerGate::new(db_pool.clone()));

    let duplicates = DuplicateMatchResolver::new(
        matches.clone(),
        Duration::from_secs(league_settings.duplicate_check_timeout_secs),
    );
    let lifecycle =
        MatchLifecycleManager::new(matches.clone(), reference.clone(), duplicates, reference_offset);
    let projector = Arc::new(StatsProjector::new(events.clone(), stats.clone(), gate.clone()));
    let event_log = MatchEventLog::new(matches, events, gate, projector.clone());

    let lifecycle_data = web::Data::new(lifecycle);
    let event_log_data = web::Data::new(event_log);
    let projector_data = web::Data::new(projector);
    let stats_data = web::Data::new(stats);
    let reference_data = web::Data::new(reference);
    let jwt_settings = web::Data::new(jwt_settings);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("https://matchday-admin.fly.dev")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(lifecycle_data.clone())
            .app_data(event_log_data.clone())
            .app_data(projector_data.clone())
            .app_data(stats_data.clone())
            .app_data(reference_data.clone())
            .app_data(jwt_settings.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
