// src/db/match_queries.rs
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{MatchStore, NewMatch};
use crate::errors::StoreError;
use crate::models::league::{Match, MatchStatus};

pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const MATCH_COLUMNS: &str = "id, date, kickoff_at, home_team_id, away_team_id, \
     home_score, away_score, season_id, age_group_id, match_type_id, \
     division_id, status, created_at, updated_at";

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn insert(&self, record: NewMatch) -> Result<Match, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let created = sqlx::query_as::<_, Match>(&format!(
            r#"
            INSERT INTO matches
                (id, date, kickoff_at, home_team_id, away_team_id,
                 home_score, away_score, season_id, age_group_id,
                 match_type_id, division_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(record.date)
        .bind(record.kickoff_at)
        .bind(record.home_team_id)
        .bind(record.away_team_id)
        .bind(record.home_score)
        .bind(record.away_score)
        .bind(record.season_id)
        .bind(record.age_group_id)
        .bind(record.match_type_id)
        .bind(record.division_id)
        .bind(record.status)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: Uuid, record: NewMatch) -> Result<Match, StoreError> {
        let updated = sqlx::query_as::<_, Match>(&format!(
            r#"
            UPDATE matches
            SET date = $2,
                kickoff_at = $3,
                home_team_id = $4,
                away_team_id = $5,
                home_score = $6,
                away_score = $7,
                season_id = $8,
                age_group_id = $9,
                match_type_id = $10,
                division_id = $11,
                status = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(record.date)
        .bind(record.kickoff_at)
        .bind(record.home_team_id)
        .bind(record.away_team_id)
        .bind(record.home_score)
        .bind(record.away_score)
        .bind(record.season_id)
        .bind(record.age_group_id)
        .bind(record.match_type_id)
        .bind(record.division_id)
        .bind(record.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn set_status(&self, id: Uuid, status: MatchStatus) -> Result<Match, StoreError> {
        let updated = sqlx::query_as::<_, Match>(&format!(
            r#"
            UPDATE matches
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        let found = sqlx::query_as::<_, Match>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found)
    }

    async fn find_by_date_and_teams(
        &self,
        date: NaiveDate,
        team_a: Uuid,
        team_b: Uuid,
    ) -> Result<Option<Match>, StoreError> {
        // Team pair is unordered: a rematch with sides swapped on the same
        // day still counts as the same fixture.
        let found = sqlx::query_as::<_, Match>(&format!(
            r#"
            SELECT {MATCH_COLUMNS} FROM matches
            WHERE date = $1
              AND ((home_team_id = $2 AND away_team_id = $3)
                OR (home_team_id = $3 AND away_team_id = $2))
            LIMIT 1
            "#
        ))
        .bind(date)
        .bind(team_a)
        .bind(team_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found)
    }
}
