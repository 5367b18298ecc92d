// src/auth/gate.rs
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::actor::ActorContext;
use crate::errors::StoreError;

/// Decides whether an actor may edit a team's match data. Admins may edit
/// any team; otherwise only the team's manager of record.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    async fn can_edit(&self, team_id: Uuid, actor: &ActorContext) -> Result<bool, StoreError>;
}

pub struct PgTeamManagerGate {
    pool: PgPool,
}

impl PgTeamManagerGate {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationGate for PgTeamManagerGate {
    async fn can_edit(&self, team_id: Uuid, actor: &ActorContext) -> Result<bool, StoreError> {
        if actor.is_admin() {
            return Ok(true);
        }

        let manager_id: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT manager_id FROM teams WHERE id = $1")
                .bind(team_id)
                .fetch_optional(&self.pool)
                .await?;

        // Unknown team or no manager of record both mean "not yours".
        Ok(manager_id.flatten() == Some(actor.user_id))
    }
}
