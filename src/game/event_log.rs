// src/game/event_log.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::auth::actor::ActorContext;
use crate::auth::gate::AuthorizationGate;
use crate::db::{MatchEventStore, MatchStore, NewMatchEvent};
use crate::errors::EventError;
use crate::game::stats_projector::StatsProjector;
use crate::models::events::{MatchEvent, MatchEventPayload};

/// Append-only log of in-game events, with soft delete.
///
/// Every entry point consults the authorization gate before any write, and
/// every goal mutation reconciles the affected team's stats before
/// returning, so callers never observe an aggregate that disagrees with
/// the log. Substitution mutations skip the reconcile: they carry no
/// goal/assist weight. If minutes played ever becomes event-derived, the
/// trigger below is the single place to extend.
pub struct MatchEventLog {
    matches: Arc<dyn MatchStore>,
    events: Arc<dyn MatchEventStore>,
    gate: Arc<dyn AuthorizationGate>,
    projector: Arc<StatsProjector>,
}

impl MatchEventLog {
    pub fn new(
        matches: Arc<dyn MatchStore>,
        events: Arc<dyn MatchEventStore>,
        gate: Arc<dyn AuthorizationGate>,
        projector: Arc<StatsProjector>,
    ) -> Self {
        Self { matches, events, gate, projector }
    }

    pub async fn add_goal(
        &self,
        actor: &ActorContext,
        match_id: Uuid,
        team_id: Uuid,
        scorer_id: Uuid,
        assist_id: Option<Uuid>,
        minute: Option<i32>,
    ) -> Result<MatchEvent, EventError> {
        let payload = MatchEventPayload::Goal { scorer_id, assist_id };
        let event = self.append(actor, match_id, team_id, minute, payload).await?;
        self.projector.reconcile(match_id, team_id).await?;
        Ok(event)
    }

    pub async fn add_substitution(
        &self,
        actor: &ActorContext,
        match_id: Uuid,
        team_id: Uuid,
        player_off_id: Uuid,
        player_on_id: Uuid,
        minute: Option<i32>,
    ) -> Result<MatchEvent, EventError> {
        let payload = MatchEventPayload::Substitution { player_off_id, player_on_id };
        self.append(actor, match_id, team_id, minute, payload).await
    }

    /// Soft-delete a goal event and reconcile. Removing an event that is
    /// already deleted is a successful no-op.
    pub async fn remove_goal(
        &self,
        actor: &ActorContext,
        event_id: Uuid,
    ) -> Result<(), EventError> {
        if let Some(removed) = self.remove(actor, event_id, true).await? {
            self.projector
                .reconcile(removed.match_id, removed.team_id)
                .await?;
        }
        Ok(())
    }

    pub async fn remove_substitution(
        &self,
        actor: &ActorContext,
        event_id: Uuid,
    ) -> Result<(), EventError> {
        self.remove(actor, event_id, false).await?;
        Ok(())
    }

    /// Remove either kind of event by id, reconciling when a live goal
    /// disappears.
    pub async fn remove_event(&self, actor: &ActorContext, event_id: Uuid) -> Result<(), EventError> {
        let event = self
            .events
            .find(event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;

        if event.payload.is_goal() {
            self.remove_goal(actor, event_id).await
        } else {
            self.remove_substitution(actor, event_id).await
        }
    }

    pub async fn live_events(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<MatchEvent>, EventError> {
        Ok(self.events.live_events(match_id, team_id).await?)
    }

    async fn append(
        &self,
        actor: &ActorContext,
        match_id: Uuid,
        team_id: Uuid,
        minute: Option<i32>,
        payload: MatchEventPayload,
    ) -> Result<MatchEvent, EventError> {
        if !self.gate.can_edit(team_id, actor).await? {
            tracing::warn!(
                "User {} denied {} edit for team {}",
                actor.user_id,
                payload.kind(),
                team_id
            );
            return Err(EventError::Unauthorized);
        }

        let m = self
            .matches
            .find(match_id)
            .await?
            .ok_or(EventError::MatchNotFound)?;

        if team_id != m.home_team_id && team_id != m.away_team_id {
            return Err(EventError::TeamNotInMatch);
        }

        let event = self
            .events
            .append(NewMatchEvent { match_id, team_id, minute, payload })
            .await?;

        tracing::info!(
            "Appended {} event {} to match {} for team {}",
            event.payload.kind(),
            event.id,
            match_id,
            team_id
        );
        Ok(event)
    }

    /// Shared soft-delete path. Returns the event when a live one of the
    /// expected kind was deleted, None for the idempotent repeat.
    async fn remove(
        &self,
        actor: &ActorContext,
        event_id: Uuid,
        expect_goal: bool,
    ) -> Result<Option<MatchEvent>, EventError> {
        let event = self
            .events
            .find(event_id)
            .await?
            .ok_or(EventError::EventNotFound)?;

        if event.payload.is_goal() != expect_goal {
            return Err(EventError::EventNotFound);
        }

        if event.is_deleted {
            // Already gone from every projection; repeating the removal
            // must not fail or trigger another reconcile.
            return Ok(None);
        }

        if !self.gate.can_edit(event.team_id, actor).await? {
            return Err(EventError::Unauthorized);
        }

        self.events.mark_deleted(event_id).await?;
        tracing::info!(
            "Soft-deleted {} event {} on match {}",
            event.payload.kind(),
            event_id,
            event.match_id
        );
        Ok(Some(event))
    }
}
