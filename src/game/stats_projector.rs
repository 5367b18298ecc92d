// src/game/stats_projector.rs
use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::auth::actor::ActorContext;
use crate::auth::gate::AuthorizationGate;
use crate::db::{MatchEventStore, PlayerStatStore};
use crate::errors::EventError;
use crate::models::events::{MatchEvent, MatchEventPayload};
use crate::models::stats::{StatLine, StatOverride};

/// Derive per-player goal/assist tallies from an event set. Only live goal
/// events count; players without any contribution are omitted from the
/// result. Aggregates are always rebuilt from the log, never incremented
/// in place.
pub fn project(events: &[MatchEvent]) -> HashMap<Uuid, StatLine> {
    let mut lines: HashMap<Uuid, StatLine> = HashMap::new();

    for event in events.iter().filter(|e| e.is_live()) {
        if let MatchEventPayload::Goal { scorer_id, assist_id } = &event.payload {
            lines.entry(*scorer_id).or_default().goals += 1;
            if let Some(assist_id) = assist_id {
                lines.entry(*assist_id).or_default().assists += 1;
            }
        }
    }

    lines
}

/// Keeps stored per-player stats in line with the event log, and accepts
/// the manually entered fields the log cannot derive.
pub struct StatsProjector {
    events: Arc<dyn MatchEventStore>,
    stats: Arc<dyn PlayerStatStore>,
    gate: Arc<dyn AuthorizationGate>,
}

impl StatsProjector {
    pub fn new(
        events: Arc<dyn MatchEventStore>,
        stats: Arc<dyn PlayerStatStore>,
        gate: Arc<dyn AuthorizationGate>,
    ) -> Self {
        Self { events, stats, gate }
    }

    /// Rebuild one team's goal/assist tallies from the live event set and
    /// write them through. Rows that lost their last backing event are
    /// zeroed; override fields survive untouched.
    pub async fn reconcile(&self, match_id: Uuid, team_id: Uuid) -> Result<(), EventError> {
        let live = self.events.live_events(match_id, team_id).await?;
        let lines = project(&live);
        self.stats.apply_projection(match_id, team_id, &lines).await?;

        tracing::debug!(
            "Reconciled stats for match {} team {}: {} players with tallies",
            match_id,
            team_id,
            lines.len()
        );
        Ok(())
    }

    /// Explicit save of override fields (minutes played). Gated like every
    /// other mutation; the derived tallies cannot be written through here.
    pub async fn save_player_stats(
        &self,
        actor: &ActorContext,
        match_id: Uuid,
        team_id: Uuid,
        entries: &[StatOverride],
    ) -> Result<(), EventError> {
        if !self.gate.can_edit(team_id, actor).await? {
            return Err(EventError::Unauthorized);
        }

        self.stats.save_overrides(match_id, team_id, entries).await?;
        tracing::info!(
            "Saved {} stat overrides for match {} team {} by {}",
            entries.len(),
            match_id,
            team_id,
            actor.user_id
        );
        Ok(())
    }
}
