// src/auth/jwt.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::user::{UserRole, UserStatus};

/// Mint an HS256 token for the given user. Settings are passed in
/// explicitly; nothing here reads the environment.
pub fn generate_token(
    jwt_settings: &JwtSettings,
    user_id: Uuid,
    username: &str,
    role: UserRole,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(jwt_settings.expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        status: UserStatus::Active,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
}
