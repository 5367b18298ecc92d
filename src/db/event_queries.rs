// src/db/event_queries.rs
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::{MatchEventStore, NewMatchEvent};
use crate::errors::StoreError;
use crate::models::events::{MatchEvent, MatchEventPayload};

pub struct PgMatchEventStore {
    pool: PgPool,
}

impl PgMatchEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// The payload columns are nullable per event type; `event_type` decides
/// which set is meaningful.
fn event_from_row(row: &PgRow) -> Result<MatchEvent, sqlx::Error> {
    let event_type: String = row.try_get("event_type")?;
    let payload = match event_type.as_str() {
        "goal" => MatchEventPayload::Goal {
            scorer_id: row.try_get("scorer_id")?,
            assist_id: row.try_get("assist_id")?,
        },
        "substitution" => MatchEventPayload::Substitution {
            player_off_id: row.try_get("player_off_id")?,
            player_on_id: row.try_get("player_on_id")?,
        },
        other => {
            return Err(sqlx::Error::Decode(
                format!("unknown event_type: {}", other).into(),
            ))
        }
    };

    Ok(MatchEvent {
        id: row.try_get("id")?,
        match_id: row.try_get("match_id")?,
        team_id: row.try_get("team_id")?,
        minute: row.try_get("minute")?,
        payload,
        is_deleted: row.try_get("is_deleted")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl MatchEventStore for PgMatchEventStore {
    async fn append(&self, event: NewMatchEvent) -> Result<MatchEvent, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let (scorer_id, assist_id, player_off_id, player_on_id) = match &event.payload {
            MatchEventPayload::Goal { scorer_id, assist_id } => {
                (Some(*scorer_id), *assist_id, None, None)
            }
            MatchEventPayload::Substitution { player_off_id, player_on_id } => {
                (None, None, Some(*player_off_id), Some(*player_on_id))
            }
        };

        let row = sqlx::query(
            r#"
            INSERT INTO match_events
                (id, match_id, team_id, event_type, minute,
                 scorer_id, assist_id, player_off_id, player_on_id,
                 is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, $10)
            RETURNING id, match_id, team_id, event_type, minute,
                      scorer_id, assist_id, player_off_id, player_on_id,
                      is_deleted, created_at
            "#,
        )
        .bind(id)
        .bind(event.match_id)
        .bind(event.team_id)
        .bind(event.payload.kind())
        .bind(event.minute)
        .bind(scorer_id)
        .bind(assist_id)
        .bind(player_off_id)
        .bind(player_on_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        event_from_row(&row).map_err(StoreError::from)
    }

    async fn find(&self, id: Uuid) -> Result<Option<MatchEvent>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, match_id, team_id, event_type, minute,
                   scorer_id, assist_id, player_off_id, player_on_id,
                   is_deleted, created_at
            FROM match_events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(event_from_row)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE match_events SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn live_events(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<MatchEvent>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, match_id, team_id, event_type, minute,
                   scorer_id, assist_id, player_off_id, player_on_id,
                   is_deleted, created_at
            FROM match_events
            WHERE match_id = $1 AND team_id = $2 AND is_deleted = FALSE
            ORDER BY minute NULLS LAST, created_at
            "#,
        )
        .bind(match_id)
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(event_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }
}
