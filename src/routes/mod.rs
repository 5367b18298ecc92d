use actix_web::web;

pub mod backend_health;
pub mod league;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // League routes (require authentication)
    cfg.service(
        web::scope("/league")
            .wrap(AuthMiddleware)
            .service(league::check_existing_match)
            .service(league::submit_match)
            .service(league::get_match)
            .service(league::update_match_status)
            .service(league::add_match_event)
            .service(league::remove_match_event)
            .service(league::get_match_events)
            .service(league::get_player_stats)
            .service(league::save_player_stats)
            .service(league::get_team_roster)
            .service(league::get_seasons)
            .service(league::get_age_groups)
            .service(league::get_match_types)
            .service(league::get_divisions)
            .service(league::get_team_candidates),
    );
}
