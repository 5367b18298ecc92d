// src/db/reference_queries.rs
//
// Read-only access to reference data owned by the surrounding application.
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::db::ReferenceDataProvider;
use crate::errors::StoreError;
use crate::models::reference::{AgeGroup, Division, MatchType, Player, Season, Team};

pub struct PgReferenceData {
    pool: PgPool,
}

impl PgReferenceData {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn match_type_from_row(row: &PgRow) -> Result<MatchType, sqlx::Error> {
    let kind: String = row.try_get("kind")?;
    Ok(MatchType {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        kind: kind
            .parse()
            .map_err(|e: String| sqlx::Error::Decode(e.into()))?,
    })
}

#[async_trait]
impl ReferenceDataProvider for PgReferenceData {
    async fn seasons(&self) -> Result<Vec<Season>, StoreError> {
        let rows = sqlx::query_as::<_, Season>(
            "SELECT id, name, is_current FROM seasons ORDER BY name DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn age_groups(&self) -> Result<Vec<AgeGroup>, StoreError> {
        let rows = sqlx::query_as::<_, AgeGroup>(
            "SELECT id, name, sort_order FROM age_groups ORDER BY sort_order",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn match_types(&self) -> Result<Vec<MatchType>, StoreError> {
        let rows = sqlx::query("SELECT id, name, kind FROM match_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(match_type_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    async fn match_type(&self, id: Uuid) -> Result<Option<MatchType>, StoreError> {
        let row = sqlx::query("SELECT id, name, kind FROM match_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(match_type_from_row)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn divisions(&self, age_group_id: Uuid) -> Result<Vec<Division>, StoreError> {
        let rows = sqlx::query_as::<_, Division>(
            r#"
            SELECT id, name, age_group_id
            FROM divisions
            WHERE age_group_id = $1
            ORDER BY name
            "#,
        )
        .bind(age_group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn team(&self, id: Uuid) -> Result<Option<Team>, StoreError> {
        let row = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, age_group_id, division_id, manager_id
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn teams_in_scope(
        &self,
        age_group_id: Uuid,
        division_id: Option<Uuid>,
    ) -> Result<Vec<Team>, StoreError> {
        let rows = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, age_group_id, division_id, manager_id
            FROM teams
            WHERE age_group_id = $1
              AND ($2::uuid IS NULL OR division_id = $2)
            ORDER BY name
            "#,
        )
        .bind(age_group_id)
        .bind(division_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn roster(&self, team_id: Uuid) -> Result<Vec<Player>, StoreError> {
        let rows = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, team_id, name, shirt_number
            FROM players
            WHERE team_id = $1
            ORDER BY shirt_number NULLS LAST, name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
