mod common;

use matchday_backend::auth::jwt::generate_token;
use matchday_backend::config::jwt::JwtSettings;
use matchday_backend::models::user::UserRole;
use secrecy::ExposeSecret;
use uuid::Uuid;

use common::spawn_app;

#[tokio::test]
async fn backend_health_works_without_authentication() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/backend_health", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn league_routes_reject_missing_tokens() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/league/matches/existing?date=2024-05-01&home_team_id={}&away_team_id={}",
            app.address,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn league_routes_reject_garbage_tokens() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/league/matches/existing?date=2024-05-01&home_team_id={}&away_team_id={}",
            app.address,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .bearer_auth("not-a-token")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
    let body = response.text().await.unwrap();
    assert!(body.contains("Invalid token"));
}

/// Session expiry is a distinct, actionable condition, not a generic
/// failure.
#[tokio::test]
async fn expired_tokens_get_a_distinct_message() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let expired_settings = JwtSettings::new(
        app.jwt_settings.secret.expose_secret().to_string(),
        -2, // already expired
    );
    let token = generate_token(
        &expired_settings,
        Uuid::new_v4(),
        "expired-user",
        UserRole::Manager,
    )
    .unwrap();

    let response = client
        .get(format!(
            "{}/league/matches/existing?date=2024-05-01&home_team_id={}&away_team_id={}",
            app.address,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
    let body = response.text().await.unwrap();
    assert!(body.contains("re-authenticate"));
}

/// With a valid token but no reachable database, the duplicate pre-check
/// still answers "no match found": the lookup fails open end to end.
#[tokio::test]
async fn duplicate_precheck_fails_open_over_http() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let token = generate_token(
        &app.jwt_settings,
        Uuid::new_v4(),
        "manager-user",
        UserRole::Manager,
    )
    .unwrap();

    let response = client
        .get(format!(
            "{}/league/matches/existing?date=2024-05-01&home_team_id={}&away_team_id={}",
            app.address,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["exists"], false);
}
