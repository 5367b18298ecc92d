// src/league/setup.rs
//
// Selection state that precedes a match submission: which competition the
// match belongs to, and which two teams play. Team candidates depend on the
// selected match type, age group and (for league play) division, so any
// filter change drops the current selection immediately and stamps a new
// generation; a candidate list that arrives for an older generation is
// ignored rather than allowed to resurrect a stale selection.
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::models::league::MatchDraft;
use crate::models::reference::{Division, MatchType, Team};

#[derive(Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The team is not in the current candidate list.
    TeamNotInScope,
    /// The same team cannot play itself.
    TeamConflict,
}

#[derive(Debug)]
pub struct MatchSetup {
    season_id: Option<Uuid>,
    age_group_id: Option<Uuid>,
    match_type: Option<MatchType>,
    division_id: Option<Uuid>,
    home_team_id: Option<Uuid>,
    away_team_id: Option<Uuid>,
    candidates: Vec<Team>,
    generation: u64,
    default_division: Option<String>,
}

impl MatchSetup {
    pub fn new(default_division: Option<String>) -> Self {
        Self {
            season_id: None,
            age_group_id: None,
            match_type: None,
            division_id: None,
            home_team_id: None,
            away_team_id: None,
            candidates: Vec::new(),
            generation: 0,
            default_division,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn division_id(&self) -> Option<Uuid> {
        self.division_id
    }

    pub fn home_team_id(&self) -> Option<Uuid> {
        self.home_team_id
    }

    pub fn away_team_id(&self) -> Option<Uuid> {
        self.away_team_id
    }

    pub fn candidates(&self) -> &[Team] {
        &self.candidates
    }

    pub fn select_season(&mut self, season_id: Uuid) {
        self.season_id = Some(season_id);
    }

    /// Divisions belong to an age group, so changing it drops the division
    /// along with the team selection.
    pub fn select_age_group(&mut self, age_group_id: Uuid) {
        self.age_group_id = Some(age_group_id);
        self.division_id = None;
        self.invalidate_selection();
    }

    /// Switching to league play auto-assigns a division when none is
    /// selected: the configured default by name if available, else the
    /// first on offer. Switching away clears the division entirely.
    pub fn select_match_type(&mut self, match_type: MatchType, available_divisions: &[Division]) {
        if match_type.kind.requires_division() {
            if self.division_id.is_none() {
                self.division_id = self
                    .default_division
                    .as_deref()
                    .and_then(|name| available_divisions.iter().find(|d| d.name == name))
                    .or_else(|| available_divisions.first())
                    .map(|d| d.id);
            }
        } else {
            self.division_id = None;
        }
        self.match_type = Some(match_type);
        self.invalidate_selection();
    }

    pub fn select_division(&mut self, division_id: Uuid) {
        self.division_id = Some(division_id);
        self.invalidate_selection();
    }

    /// The (age group, division) scope to fetch candidates for, once a
    /// match type is chosen. Division narrows the scope only for league
    /// play.
    pub fn candidate_scope(&self) -> Option<(Uuid, Option<Uuid>)> {
        let match_type = self.match_type.as_ref()?;
        let age_group_id = self.age_group_id?;
        let division = if match_type.kind.requires_division() {
            self.division_id
        } else {
            None
        };
        Some((age_group_id, division))
    }

    /// Install a freshly fetched candidate list. Returns false (and changes
    /// nothing) when the list belongs to a superseded filter generation.
    pub fn apply_candidates(&mut self, generation: u64, teams: Vec<Team>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                "Ignoring stale team candidates for generation {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.candidates = teams;
        true
    }

    pub fn select_home(&mut self, team_id: Uuid) -> Result<(), SelectionError> {
        if !self.candidates.iter().any(|t| t.id == team_id) {
            return Err(SelectionError::TeamNotInScope);
        }
        if self.away_team_id == Some(team_id) {
            return Err(SelectionError::TeamConflict);
        }
        self.home_team_id = Some(team_id);
        Ok(())
    }

    pub fn select_away(&mut self, team_id: Uuid) -> Result<(), SelectionError> {
        if !self.candidates.iter().any(|t| t.id == team_id) {
            return Err(SelectionError::TeamNotInScope);
        }
        if self.home_team_id == Some(team_id) {
            return Err(SelectionError::TeamConflict);
        }
        self.away_team_id = Some(team_id);
        Ok(())
    }

    /// Assemble a draft from the current selections. Submission-level
    /// validation still applies; this only gathers state.
    pub fn draft(&self, date: NaiveDate, kickoff_time: Option<NaiveTime>) -> Option<MatchDraft> {
        Some(MatchDraft {
            date,
            kickoff_time,
            home_team_id: self.home_team_id?,
            away_team_id: self.away_team_id?,
            season_id: self.season_id,
            age_group_id: self.age_group_id,
            match_type_id: self.match_type.as_ref().map(|mt| mt.id),
            division_id: self.division_id,
            home_score: None,
            away_score: None,
        })
    }

    /// Selections made under the old filters are meaningless under the new
    /// ones; drop them before any refetch can resolve.
    fn invalidate_selection(&mut self) {
        self.home_team_id = None;
        self.away_team_id = None;
        self.candidates.clear();
        self.generation += 1;
    }
}
