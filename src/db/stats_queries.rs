// src/db/stats_queries.rs
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::PlayerStatStore;
use crate::errors::StoreError;
use crate::models::stats::{PlayerMatchStat, StatLine, StatOverride};

pub struct PgPlayerStatStore {
    pool: PgPool,
}

impl PgPlayerStatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStatStore for PgPlayerStatStore {
    async fn team_stats(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<PlayerMatchStat>, StoreError> {
        let rows = sqlx::query_as::<_, PlayerMatchStat>(
            r#"
            SELECT match_id, team_id, player_id, goals, assists,
                   minutes_played, updated_at
            FROM player_match_stats
            WHERE match_id = $1 AND team_id = $2
            ORDER BY player_id
            "#,
        )
        .bind(match_id)
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn apply_projection(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        lines: &HashMap<Uuid, StatLine>,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Rows no longer backed by any live event fall back to zero.
        // Override fields are deliberately not in the SET list.
        let projected: Vec<Uuid> = lines.keys().copied().collect();
        sqlx::query(
            r#"
            UPDATE player_match_stats
            SET goals = 0, assists = 0, updated_at = NOW()
            WHERE match_id = $1 AND team_id = $2
              AND player_id <> ALL($3)
            "#,
        )
        .bind(match_id)
        .bind(team_id)
        .bind(&projected)
        .execute(&mut *tx)
        .await?;

        for (player_id, line) in lines {
            sqlx::query(
                r#"
                INSERT INTO player_match_stats
                    (match_id, team_id, player_id, goals, assists, updated_at)
                VALUES ($1, $2, $3, $4, $5, NOW())
                ON CONFLICT (match_id, team_id, player_id)
                DO UPDATE SET goals = $4, assists = $5, updated_at = NOW()
                "#,
            )
            .bind(match_id)
            .bind(team_id)
            .bind(player_id)
            .bind(line.goals)
            .bind(line.assists)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn save_overrides(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        entries: &[StatOverride],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO player_match_stats
                    (match_id, team_id, player_id, goals, assists,
                     minutes_played, updated_at)
                VALUES ($1, $2, $3, 0, 0, $4, NOW())
                ON CONFLICT (match_id, team_id, player_id)
                DO UPDATE SET minutes_played = $4, updated_at = NOW()
                "#,
            )
            .bind(match_id)
            .bind(team_id)
            .bind(entry.player_id)
            .bind(entry.minutes_played)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
