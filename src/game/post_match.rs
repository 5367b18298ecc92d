// src/game/post_match.rs
//
// Post-match editing session for one match: lazily loads both teams'
// rosters and stat rows on first expand, then routes edits to the event
// log for whichever team tab is active.
use std::sync::Arc;

use futures::try_join;
use uuid::Uuid;

use crate::auth::actor::ActorContext;
use crate::db::{PlayerStatStore, ReferenceDataProvider};
use crate::errors::EventError;
use crate::game::event_log::MatchEventLog;
use crate::game::stats_projector::StatsProjector;
use crate::models::events::MatchEvent;
use crate::models::league::Match;
use crate::models::reference::Player;
use crate::models::stats::{PlayerMatchStat, StatOverride};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing fetched yet.
    Collapsed,
    Loading,
    Loaded,
    LoadFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamTab {
    Home,
    Away,
}

#[derive(Debug, Clone)]
pub struct TeamPanel {
    pub team_id: Uuid,
    pub roster: Vec<Player>,
    pub stats: Vec<PlayerMatchStat>,
}

pub struct PostMatchSession {
    match_id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    state: LoadState,
    active_tab: TeamTab,
    home: Option<TeamPanel>,
    away: Option<TeamPanel>,
    reference: Arc<dyn ReferenceDataProvider>,
    stats: Arc<dyn PlayerStatStore>,
    event_log: Arc<MatchEventLog>,
    projector: Arc<StatsProjector>,
}

impl PostMatchSession {
    pub fn new(
        m: &Match,
        reference: Arc<dyn ReferenceDataProvider>,
        stats: Arc<dyn PlayerStatStore>,
        event_log: Arc<MatchEventLog>,
        projector: Arc<StatsProjector>,
    ) -> Self {
        Self {
            match_id: m.id,
            home_team_id: m.home_team_id,
            away_team_id: m.away_team_id,
            state: LoadState::Collapsed,
            active_tab: TeamTab::Home,
            home: None,
            away: None,
            reference,
            stats,
            event_log,
            projector,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn active_tab(&self) -> TeamTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: TeamTab) {
        self.active_tab = tab;
    }

    pub fn active_team_id(&self) -> Uuid {
        match self.active_tab {
            TeamTab::Home => self.home_team_id,
            TeamTab::Away => self.away_team_id,
        }
    }

    pub fn home_panel(&self) -> Option<&TeamPanel> {
        self.home.as_ref()
    }

    pub fn away_panel(&self) -> Option<&TeamPanel> {
        self.away.as_ref()
    }

    /// First expand fetches both rosters and both stat sets concurrently
    /// and only then becomes Loaded; no partially loaded panel is ever
    /// observable. Expanding an already-loaded session fetches nothing. A
    /// failed load leaves editing unavailable and may be retried by
    /// expanding again.
    pub async fn expand(&mut self) {
        if self.state == LoadState::Loaded {
            return;
        }
        self.state = LoadState::Loading;

        let fetched = try_join!(
            self.reference.roster(self.home_team_id),
            self.reference.roster(self.away_team_id),
            self.stats.team_stats(self.match_id, self.home_team_id),
            self.stats.team_stats(self.match_id, self.away_team_id),
        );

        match fetched {
            Ok((home_roster, away_roster, home_stats, away_stats)) => {
                self.home = Some(TeamPanel {
                    team_id: self.home_team_id,
                    roster: home_roster,
                    stats: home_stats,
                });
                self.away = Some(TeamPanel {
                    team_id: self.away_team_id,
                    roster: away_roster,
                    stats: away_stats,
                });
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to load post-match data for match {}: {}",
                    self.match_id,
                    e
                );
                self.state = LoadState::LoadFailed;
            }
        }
    }

    pub fn collapse(&mut self) {
        // Loaded data stays; the next expand is a no-op.
    }

    pub async fn add_goal(
        &mut self,
        actor: &ActorContext,
        scorer_id: Uuid,
        assist_id: Option<Uuid>,
        minute: Option<i32>,
    ) -> Result<MatchEvent, EventError> {
        let team_id = self.active_team_id();
        let event = self
            .event_log
            .add_goal(actor, self.match_id, team_id, scorer_id, assist_id, minute)
            .await?;
        self.refresh_stats(team_id).await?;
        Ok(event)
    }

    pub async fn remove_goal(
        &mut self,
        actor: &ActorContext,
        event_id: Uuid,
    ) -> Result<(), EventError> {
        self.event_log.remove_goal(actor, event_id).await?;
        self.refresh_stats(self.active_team_id()).await
    }

    pub async fn add_substitution(
        &mut self,
        actor: &ActorContext,
        player_off_id: Uuid,
        player_on_id: Uuid,
        minute: Option<i32>,
    ) -> Result<MatchEvent, EventError> {
        let team_id = self.active_team_id();
        self.event_log
            .add_substitution(actor, self.match_id, team_id, player_off_id, player_on_id, minute)
            .await
    }

    pub async fn remove_substitution(
        &mut self,
        actor: &ActorContext,
        event_id: Uuid,
    ) -> Result<(), EventError> {
        self.event_log.remove_substitution(actor, event_id).await
    }

    /// Explicit save of manually entered fields for the active team.
    pub async fn save_stats(
        &mut self,
        actor: &ActorContext,
        entries: &[StatOverride],
    ) -> Result<(), EventError> {
        let team_id = self.active_team_id();
        self.projector
            .save_player_stats(actor, self.match_id, team_id, entries)
            .await?;
        self.refresh_stats(team_id).await
    }

    /// Re-read one team's stat rows so the panel reflects the reconciled
    /// aggregates before control returns to the caller.
    async fn refresh_stats(&mut self, team_id: Uuid) -> Result<(), EventError> {
        let rows = self.stats.team_stats(self.match_id, team_id).await?;
        let panel = if team_id == self.home_team_id {
            self.home.as_mut()
        } else {
            self.away.as_mut()
        };
        if let Some(panel) = panel {
            panel.stats = rows;
        }
        Ok(())
    }
}
