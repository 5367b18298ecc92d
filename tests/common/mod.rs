#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use matchday_backend::auth::actor::ActorContext;
use matchday_backend::auth::gate::AuthorizationGate;
use matchday_backend::db::{
    MatchEventStore, MatchStore, NewMatch, NewMatchEvent, PlayerStatStore, ReferenceDataProvider,
};
use matchday_backend::errors::StoreError;
use matchday_backend::game::event_log::MatchEventLog;
use matchday_backend::game::stats_projector::StatsProjector;
use matchday_backend::league::duplicates::DuplicateMatchResolver;
use matchday_backend::league::lifecycle::MatchLifecycleManager;
use matchday_backend::models::events::MatchEvent;
use matchday_backend::models::league::{Match, MatchDraft, MatchStatus};
use matchday_backend::models::reference::{
    AgeGroup, Division, MatchType, MatchTypeKind, Player, Season, Team,
};
use matchday_backend::models::stats::{PlayerMatchStat, StatLine, StatOverride};
use matchday_backend::models::user::UserRole;

// ---------------------------------------------------------------------------
// In-memory stores
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryMatchStore {
    rows: Mutex<HashMap<Uuid, Match>>,
    /// When set, the unordered-pair lookup fails; submissions must still
    /// go through (the duplicate check fails open).
    pub fail_duplicate_lookup: AtomicBool,
    /// When set, the unordered-pair lookup never resolves.
    pub stall_duplicate_lookup: AtomicBool,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn materialize(id: Uuid, record: NewMatch) -> Match {
        let now = Utc::now();
        Match {
            id,
            date: record.date,
            kickoff_at: record.kickoff_at,
            home_team_id: record.home_team_id,
            away_team_id: record.away_team_id,
            home_score: record.home_score,
            away_score: record.away_score,
            season_id: record.season_id,
            age_group_id: record.age_group_id,
            match_type_id: record.match_type_id,
            division_id: record.division_id,
            status: record.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn insert(&self, record: NewMatch) -> Result<Match, StoreError> {
        let m = Self::materialize(Uuid::new_v4(), record);
        self.rows.lock().unwrap().insert(m.id, m.clone());
        Ok(m)
    }

    async fn update(&self, id: Uuid, record: NewMatch) -> Result<Match, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let existing = rows.get(&id).ok_or(StoreError::NotFound)?;
        let mut updated = Self::materialize(id, record);
        updated.created_at = existing.created_at;
        rows.insert(id, updated.clone());
        Ok(updated)
    }

    async fn set_status(&self, id: Uuid, status: MatchStatus) -> Result<Match, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let m = rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        m.status = status;
        m.updated_at = Utc::now();
        Ok(m.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Match>, StoreError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_date_and_teams(
        &self,
        date: NaiveDate,
        team_a: Uuid,
        team_b: Uuid,
    ) -> Result<Option<Match>, StoreError> {
        if self.stall_duplicate_lookup.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        if self.fail_duplicate_lookup.load(Ordering::SeqCst) {
            return Err(StoreError::Transient("connection reset".into()));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|m| {
                m.date == date
                    && ((m.home_team_id == team_a && m.away_team_id == team_b)
                        || (m.home_team_id == team_b && m.away_team_id == team_a))
            })
            .cloned())
    }
}

#[derive(Default)]
pub struct MemoryEventStore {
    rows: Mutex<Vec<MatchEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_events(&self) -> Vec<MatchEvent> {
        self.rows.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl MatchEventStore for MemoryEventStore {
    async fn append(&self, event: NewMatchEvent) -> Result<MatchEvent, StoreError> {
        let stored = MatchEvent {
            id: Uuid::new_v4(),
            match_id: event.match_id,
            team_id: event.team_id,
            minute: event.minute,
            payload: event.payload,
            is_deleted: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find(&self, id: Uuid) -> Result<Option<MatchEvent>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn mark_deleted(&self, id: Uuid) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.is_deleted = true;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn live_events(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<MatchEvent>, StoreError> {
        let mut events: Vec<MatchEvent> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.match_id == match_id && e.team_id == team_id && !e.is_deleted)
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.minute.unwrap_or(i32::MAX), e.created_at));
        Ok(events)
    }
}

#[derive(Default)]
pub struct MemoryStatStore {
    rows: Mutex<HashMap<(Uuid, Uuid, Uuid), PlayerMatchStat>>,
    pub projection_count: AtomicUsize,
    pub fail_reads: AtomicBool,
}

impl MemoryStatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stat_for(&self, match_id: Uuid, team_id: Uuid, player_id: Uuid) -> Option<PlayerMatchStat> {
        self.rows
            .lock()
            .unwrap()
            .get(&(match_id, team_id, player_id))
            .cloned()
    }

    pub fn projections_applied(&self) -> usize {
        self.projection_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerStatStore for MemoryStatStore {
    async fn team_stats(
        &self,
        match_id: Uuid,
        team_id: Uuid,
    ) -> Result<Vec<PlayerMatchStat>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Transient("stats store unavailable".into()));
        }
        let mut rows: Vec<PlayerMatchStat> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.match_id == match_id && s.team_id == team_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.player_id);
        Ok(rows)
    }

    async fn apply_projection(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        lines: &HashMap<Uuid, StatLine>,
    ) -> Result<(), StoreError> {
        self.projection_count.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();

        for stat in rows.values_mut() {
            if stat.match_id == match_id
                && stat.team_id == team_id
                && !lines.contains_key(&stat.player_id)
            {
                stat.goals = 0;
                stat.assists = 0;
                stat.updated_at = Utc::now();
            }
        }

        for (player_id, line) in lines {
            let entry = rows
                .entry((match_id, team_id, *player_id))
                .or_insert_with(|| PlayerMatchStat {
                    match_id,
                    team_id,
                    player_id: *player_id,
                    goals: 0,
                    assists: 0,
                    minutes_played: None,
                    updated_at: Utc::now(),
                });
            entry.goals = line.goals;
            entry.assists = line.assists;
            entry.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn save_overrides(
        &self,
        match_id: Uuid,
        team_id: Uuid,
        entries: &[StatOverride],
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        for entry in entries {
            let stat = rows
                .entry((match_id, team_id, entry.player_id))
                .or_insert_with(|| PlayerMatchStat {
                    match_id,
                    team_id,
                    player_id: entry.player_id,
                    goals: 0,
                    assists: 0,
                    minutes_played: None,
                    updated_at: Utc::now(),
                });
            stat.minutes_played = entry.minutes_played;
            stat.updated_at = Utc::now();
        }
        Ok(())
    }
}

pub struct MemoryReference {
    pub seasons: Vec<Season>,
    pub age_groups: Vec<AgeGroup>,
    pub match_types: Vec<MatchType>,
    pub divisions: Vec<Division>,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub roster_calls: AtomicUsize,
    pub fail_rosters: AtomicBool,
}

#[async_trait]
impl ReferenceDataProvider for MemoryReference {
    async fn seasons(&self) -> Result<Vec<Season>, StoreError> {
        Ok(self.seasons.clone())
    }

    async fn age_groups(&self) -> Result<Vec<AgeGroup>, StoreError> {
        Ok(self.age_groups.clone())
    }

    async fn match_types(&self) -> Result<Vec<MatchType>, StoreError> {
        Ok(self.match_types.clone())
    }

    async fn match_type(&self, id: Uuid) -> Result<Option<MatchType>, StoreError> {
        Ok(self.match_types.iter().find(|mt| mt.id == id).cloned())
    }

    async fn divisions(&self, age_group_id: Uuid) -> Result<Vec<Division>, StoreError> {
        Ok(self
            .divisions
            .iter()
            .filter(|d| d.age_group_id == age_group_id)
            .cloned()
            .collect())
    }

    async fn team(&self, id: Uuid) -> Result<Option<Team>, StoreError> {
        Ok(self.teams.iter().find(|t| t.id == id).cloned())
    }

    async fn teams_in_scope(
        &self,
        age_group_id: Uuid,
        division_id: Option<Uuid>,
    ) -> Result<Vec<Team>, StoreError> {
        Ok(self
            .teams
            .iter()
            .filter(|t| {
                t.age_group_id == age_group_id
                    && (division_id.is_none() || t.division_id == division_id)
            })
            .cloned()
            .collect())
    }

    async fn roster(&self, team_id: Uuid) -> Result<Vec<Player>, StoreError> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_rosters.load(Ordering::SeqCst) {
            return Err(StoreError::Transient("roster service unavailable".into()));
        }
        Ok(self
            .players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect())
    }
}

/// Admins may edit anything; otherwise only the manager of record.
pub struct MemoryGate {
    managers: Mutex<HashMap<Uuid, Uuid>>,
}

impl MemoryGate {
    pub fn new() -> Self {
        Self { managers: Mutex::new(HashMap::new()) }
    }

    pub fn set_manager(&self, team_id: Uuid, user_id: Uuid) {
        self.managers.lock().unwrap().insert(team_id, user_id);
    }
}

#[async_trait]
impl AuthorizationGate for MemoryGate {
    async fn can_edit(&self, team_id: Uuid, actor: &ActorContext) -> Result<bool, StoreError> {
        if actor.is_admin() {
            return Ok(true);
        }
        Ok(self.managers.lock().unwrap().get(&team_id) == Some(&actor.user_id))
    }
}

// ---------------------------------------------------------------------------
// Fixture data
// ---------------------------------------------------------------------------

pub struct LeagueFixture {
    pub season: Season,
    pub age_group: AgeGroup,
    pub league_type: MatchType,
    pub friendly_type: MatchType,
    pub northeast: Division,
    pub southwest: Division,
    pub team_a: Team,
    pub team_b: Team,
    pub team_c: Team,
    pub players_a: Vec<Player>,
    pub players_b: Vec<Player>,
    pub manager_a: Uuid,
    pub manager_b: Uuid,
}

impl LeagueFixture {
    pub fn new() -> Self {
        let season = Season {
            id: Uuid::new_v4(),
            name: "S1".into(),
            is_current: true,
        };
        let age_group = AgeGroup {
            id: Uuid::new_v4(),
            name: "U14".into(),
            sort_order: 1,
        };
        let league_type = MatchType {
            id: Uuid::new_v4(),
            name: "League".into(),
            kind: MatchTypeKind::League,
        };
        let friendly_type = MatchType {
            id: Uuid::new_v4(),
            name: "Friendly".into(),
            kind: MatchTypeKind::Friendly,
        };
        let northeast = Division {
            id: Uuid::new_v4(),
            name: "Northeast".into(),
            age_group_id: age_group.id,
        };
        let southwest = Division {
            id: Uuid::new_v4(),
            name: "Southwest".into(),
            age_group_id: age_group.id,
        };
        let manager_a = Uuid::new_v4();
        let manager_b = Uuid::new_v4();
        let team_a = Team {
            id: Uuid::new_v4(),
            name: "TeamA".into(),
            age_group_id: age_group.id,
            division_id: Some(northeast.id),
            manager_id: Some(manager_a),
        };
        let team_b = Team {
            id: Uuid::new_v4(),
            name: "TeamB".into(),
            age_group_id: age_group.id,
            division_id: Some(northeast.id),
            manager_id: Some(manager_b),
        };
        let team_c = Team {
            id: Uuid::new_v4(),
            name: "TeamC".into(),
            age_group_id: age_group.id,
            division_id: Some(southwest.id),
            manager_id: None,
        };

        let players_a = (1..=3)
            .map(|n| Player {
                id: Uuid::new_v4(),
                team_id: team_a.id,
                name: format!("Player A{}", n),
                shirt_number: Some(n),
            })
            .collect();
        let players_b = (1..=3)
            .map(|n| Player {
                id: Uuid::new_v4(),
                team_id: team_b.id,
                name: format!("Player B{}", n),
                shirt_number: Some(n),
            })
            .collect();

        Self {
            season,
            age_group,
            league_type,
            friendly_type,
            northeast,
            southwest,
            team_a,
            team_b,
            team_c,
            players_a,
            players_b,
            manager_a,
            manager_b,
        }
    }

    pub fn reference(&self) -> MemoryReference {
        MemoryReference {
            seasons: vec![self.season.clone()],
            age_groups: vec![self.age_group.clone()],
            match_types: vec![self.league_type.clone(), self.friendly_type.clone()],
            divisions: vec![self.northeast.clone(), self.southwest.clone()],
            teams: vec![self.team_a.clone(), self.team_b.clone(), self.team_c.clone()],
            players: self
                .players_a
                .iter()
                .chain(self.players_b.iter())
                .cloned()
                .collect(),
            roster_calls: AtomicUsize::new(0),
            fail_rosters: AtomicBool::new(false),
        }
    }

    pub fn league_draft(&self, date: NaiveDate) -> MatchDraft {
        MatchDraft {
            date,
            kickoff_time: None,
            home_team_id: self.team_a.id,
            away_team_id: self.team_b.id,
            season_id: Some(self.season.id),
            age_group_id: Some(self.age_group.id),
            match_type_id: Some(self.league_type.id),
            division_id: Some(self.northeast.id),
            home_score: None,
            away_score: None,
        }
    }
}

pub fn admin() -> ActorContext {
    ActorContext::new(Uuid::new_v4(), UserRole::Admin)
}

pub fn manager(user_id: Uuid) -> ActorContext {
    ActorContext::new(user_id, UserRole::Manager)
}

pub fn plain_user() -> ActorContext {
    ActorContext::new(Uuid::new_v4(), UserRole::User)
}

pub fn may(date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, date).unwrap()
}

// ---------------------------------------------------------------------------
// Assembled core against in-memory stores
// ---------------------------------------------------------------------------

pub struct TestCore {
    pub fixture: LeagueFixture,
    pub matches: Arc<MemoryMatchStore>,
    pub events: Arc<MemoryEventStore>,
    pub stats: Arc<MemoryStatStore>,
    pub reference: Arc<MemoryReference>,
    pub gate: Arc<MemoryGate>,
    pub lifecycle: MatchLifecycleManager,
    pub projector: Arc<StatsProjector>,
    pub event_log: Arc<MatchEventLog>,
}

impl TestCore {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5))
    }

    pub fn with_timeout(duplicate_timeout: Duration) -> Self {
        let fixture = LeagueFixture::new();
        let matches = Arc::new(MemoryMatchStore::new());
        let events = Arc::new(MemoryEventStore::new());
        let stats = Arc::new(MemoryStatStore::new());
        let reference = Arc::new(fixture.reference());
        let gate = Arc::new(MemoryGate::new());
        gate.set_manager(fixture.team_a.id, fixture.manager_a);
        gate.set_manager(fixture.team_b.id, fixture.manager_b);

        let duplicates = DuplicateMatchResolver::new(matches.clone(), duplicate_timeout);
        let lifecycle = MatchLifecycleManager::new(
            matches.clone(),
            reference.clone(),
            duplicates,
            chrono::FixedOffset::east_opt(3600).unwrap(),
        );
        let projector = Arc::new(StatsProjector::new(
            events.clone(),
            stats.clone(),
            gate.clone(),
        ));
        let event_log = Arc::new(MatchEventLog::new(
            matches.clone(),
            events.clone(),
            gate.clone(),
            projector.clone(),
        ));

        Self {
            fixture,
            matches,
            events,
            stats,
            reference,
            gate,
            lifecycle,
            projector,
            event_log,
        }
    }

    /// Shortcut: a completed league match between team A and team B.
    pub async fn completed_match(&self) -> Match {
        let mut draft = self.fixture.league_draft(may(1));
        draft.home_score = Some(0);
        draft.away_score = Some(0);
        self.lifecycle
            .submit(
                &admin(),
                matchday_backend::models::league::MatchIntent::Score,
                draft,
            )
            .await
            .expect("failed to create completed match")
    }
}

// ---------------------------------------------------------------------------
// Spawned application for HTTP-level tests
// ---------------------------------------------------------------------------

use matchday_backend::config::jwt::JwtSettings;
use matchday_backend::config::settings::{get_config, get_jwt_settings};
use matchday_backend::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;

// Ensure that the `tracing` stack is only initialised once
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub jwt_settings: JwtSettings,
}

/// Boot the real server on a random port. The Postgres pool is lazy, so
/// routes that never reach the database (and the fail-open paths of those
/// that do) are exercisable without one.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let configuration = get_config().expect("Failed to read configuration.");
    let connection_pool = PgPoolOptions::new()
        .connect_lazy(secrecy::ExposeSecret::expose_secret(
            &configuration.database.connection_string(),
        ))
        .expect("Failed to create lazy Postgres pool");

    let jwt_settings = get_jwt_settings(&configuration);
    let server = matchday_backend::run(
        listener,
        connection_pool,
        get_jwt_settings(&configuration),
        configuration.league.clone(),
    )
    .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp { address, jwt_settings }
}
