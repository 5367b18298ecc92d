// src/db/mod.rs
//
// Storage boundary for the match core. The services talk to these traits;
// the Postgres implementations live in the sibling query modules and the
// test suite substitutes in-memory ones.
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::events::{MatchEvent, MatchEventPayload};
use crate::models::league::{Match, MatchStatus};
use crate::models::reference::{AgeGroup, Division, MatchType, Player, Season, Team};
use crate::models::stats::{PlayerMatchStat, StatLine, StatOverride};

pub mod event_queries;
pub mod match_queries;
pub mod reference_queries;
pub mod stats_queries;

pub use event_queries::PgMatchEventStore;
pub use match_queries::PgMatchStore;
pub use reference_queries::PgReferenceData;
pub use stats_queries::PgPlayerStatStore;

/// A fully validated match record ready to be written.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub date: NaiveDate,
    pub kickoff_at: Option<DateTime<Utc>>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub season_id: Uuid,
    pub age_group_id: Uuid,
    pub match_type_id: Uuid,
    pub division_id: Option<Uuid>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone)]
pub struct NewMatchEvent {
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub minute: Option<i32>,
    pub payload: MatchEventPayload,
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn insert(&self, record: NewMatch) -> Result<Match, StoreError>;

    /// Overwrite the mutable fields of an existing match, keeping its id.
    /// This is the schedule→score upsert path.
    async fn update(&self, id: Uuid, record: NewMatch) -> Result<Match, StoreError>;

    async fn set_status(&self, id: Uuid, status: MatchStatus) -> Result<Match, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<Match>, StoreError>;

    /// Look up a match on `date` between the given teams, in either
    /// home/away orientation.
    async fn find_by_date_and_teams(
        &self,
        date: NaiveDate,
        team_a: Uuid,
        team_b: Uuid,
    ) -> Result<Option<Match>, StoreError>;
}

#[async_trait]
pub trait MatchEventStore: Send + Sync {
    async fn append(&self, event: NewMatchEvent) -> Result<MatchEvent, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<MatchEvent>, StoreError>;

    /// Soft delete. The row stays for audit; projections skip it.
    async fn mark_deleted(&self, id: Uuid) -> Result<(), StoreError>;

    /// Non-deleted events for one team in one match, ordered by minute
    /// then insertion time.
    async fn live_events(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<MatchEvent>, StoreError>;
}

#[async_trait]
pub trait PlayerStatStore: Send + Sync {
    async fn team_stats(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<PlayerMatchStat>, StoreError>;

    /// Write a fresh projection: upsert goals/assists for every player in
    /// `lines`, zero goals/assists on stored rows absent from `lines`.
    /// Override fields (minutes played) are left untouched either way.
    async fn apply_projection(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        lines: &HashMap<Uuid, StatLine>,
    ) -> Result<(), StoreError>;

    /// Persist manually entered override fields. Never touches the
    /// derived tallies.
    async fn save_overrides(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        entries: &[StatOverride],
    ) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn seasons(&self) -> Result<Vec<Season>, StoreError>;

    async fn age_groups(&self) -> Result<Vec<AgeGroup>, StoreError>;

    async fn match_types(&self) -> Result<Vec<MatchType>, StoreError>;

    async fn match_type(&self, id: Uuid) -> Result<Option<MatchType>, StoreError>;

    async fn divisions(&self, age_group_id: Uuid) -> Result<Vec<Division>, StoreError>;

    async fn team(&self, id: Uuid) -> Result<Option<Team>, StoreError>;

    /// Teams eligible for the given competition scope. League scope
    /// filters by division as well.
    async fn teams_in_scope(
        &self,
        age_group_id: Uuid,
        division_id: Option<Uuid>,
    ) -> Result<Vec<Team>, StoreError>;

    async fn roster(&self, team_id: Uuid) -> Result<Vec<Player>, StoreError>;
}
