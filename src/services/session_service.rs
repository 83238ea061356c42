use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::settings::{AppConfig, ExportSettings, SessionSettings};
use crate::domain::seed::default_sessions;
use crate::domain::{Clock, IdGenerator, Player, PlayerDraft, Session, Team};
use crate::roster::{self, RosterStats, SortCriteria};
use crate::scoring;
use crate::storage::SessionRepository;
use crate::store::Store;
use crate::teams::{self, BalanceReport};

/// Owns the current store and runs every command against it.
///
/// Commands never fail: missing sessions, players or teams make them no-ops.
/// Each command that changes the session collection is written through to
/// the repository.
pub struct SessionService {
    store: Store,
    repository: SessionRepository,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    settings: SessionSettings,
    export: ExportSettings,
}

impl SessionService {
    /// Load persisted sessions, falling back to the built-in demo session
    pub fn new(
        config: &AppConfig,
        repository: SessionRepository,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let sessions = repository
            .load()
            .unwrap_or_else(|| default_sessions(clock.now()));

        Self {
            store: Store::new(sessions),
            repository,
            ids,
            clock,
            settings: config.session.clone(),
            export: config.export.clone(),
        }
    }

    // --- Views ---

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn sessions(&self) -> &[Session] {
        self.store.sessions()
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.store.active_session()
    }

    pub fn players(&self) -> &[Player] {
        self.store.players()
    }

    pub fn present_players(&self) -> Vec<&Player> {
        self.store.present_players()
    }

    pub fn teams(&self) -> &[Team] {
        self.store.teams()
    }

    pub fn stats(&self) -> RosterStats {
        self.store.stats()
    }

    pub fn average_present_skill(&self) -> f64 {
        self.active_session()
            .map(roster::average_present_skill)
            .unwrap_or(0.0)
    }

    /// Mean skill weight per team, in team order
    pub fn team_averages(&self) -> Vec<f64> {
        self.teams().iter().map(teams::average_skill).collect()
    }

    pub fn balance_report(&self) -> BalanceReport {
        BalanceReport::for_teams(self.teams())
    }

    pub fn export_text(&self) -> String {
        roster::roster_text(self.players(), &self.export)
    }

    pub fn default_team_count(&self) -> usize {
        self.settings.default_team_count
    }

    // --- Session Commands ---

    /// Returns the id of the new, unselected session
    pub fn add_session(&mut self, name: &str, date: DateTime<Utc>) -> String {
        let id = self.ids.new_id();
        let session = Session::new(id.clone(), name, date, self.settings.default_fee);
        info!("Adding session '{}' ({})", name, id);

        self.apply(|store| store.add_session(session));
        id
    }

    pub fn delete_session(&mut self, session_id: &str) {
        self.apply(|store| store.delete_session(session_id));
    }

    /// Selection is not persisted
    pub fn select_session(&mut self, session_id: Option<&str>) {
        self.store = std::mem::take(&mut self.store).select_session(session_id);
    }

    /// Not validated; range checks belong to the caller
    pub fn update_fee(&mut self, fee: f64) {
        self.update_active(|mut session| {
            session.fee = fee;
            session
        });
    }

    // --- Roster Commands ---

    pub fn add_player(&mut self, draft: PlayerDraft) {
        self.add_players(vec![draft]);
    }

    /// One transition and one write for the whole batch
    pub fn add_players(&mut self, drafts: Vec<PlayerDraft>) {
        if drafts.is_empty() || self.active_session().is_none() {
            return;
        }

        let players: Vec<Player> = drafts
            .into_iter()
            .map(|draft| Player::new(self.ids.new_id(), draft))
            .collect();

        self.update_active(|session| roster::add_players(session, players));
    }

    pub fn update_player_details(&mut self, player_id: &str, details: PlayerDraft) {
        self.update_active(|session| roster::update_player_details(session, player_id, details));
    }

    pub fn remove_player(&mut self, player_id: &str) {
        self.update_active(|session| roster::remove_player(session, player_id));
    }

    pub fn toggle_presence(&mut self, player_id: &str) {
        self.update_active(|session| roster::toggle_presence(session, player_id));
    }

    pub fn toggle_payment(&mut self, player_id: &str) {
        self.update_active(|session| roster::toggle_payment(session, player_id));
    }

    pub fn mark_all_present(&mut self) {
        self.update_active(roster::mark_all_present);
    }

    pub fn mark_all_paid(&mut self) {
        self.update_active(roster::mark_all_paid);
    }

    pub fn reorder_players(&mut self, from_index: usize, to_index: usize) {
        self.update_active(|session| roster::reorder_players(session, from_index, to_index));
    }

    pub fn sort_players(&mut self, criteria: SortCriteria) {
        self.update_active(|session| roster::sort_players(session, criteria));
    }

    // --- Team Commands ---

    pub fn generate_teams(&mut self, team_count: usize) {
        self.update_active(|session| teams::generate_teams(session, team_count));
    }

    pub fn move_player_between_teams(
        &mut self,
        from_team: usize,
        to_team: usize,
        from_player_index: usize,
        to_player_index: Option<usize>,
    ) {
        self.update_active(|session| {
            teams::move_player_between_teams(session, from_team, to_team, from_player_index, to_player_index)
        });
    }

    // --- Scoring Commands ---

    pub fn update_score(&mut self, team_index: usize, delta: i32) {
        self.update_active(|session| scoring::update_score(session, team_index, delta));
    }

    pub fn save_match_result(&mut self) {
        let ready = self.teams().len() >= 2;
        if !ready {
            return;
        }

        let id = self.ids.new_id();
        let timestamp = self.clock.now();
        self.update_active(|session| scoring::save_match_result(session, id, timestamp));
    }

    pub fn reset_scores(&mut self) {
        self.update_active(scoring::reset_scores);
    }

    /// End the current match, optionally recording it first
    pub fn finish_match(&mut self, save: bool) {
        if save {
            self.save_match_result();
        }
        self.reset_scores();
    }

    // --- Helpers ---

    fn update_active<F>(&mut self, change: F)
    where
        F: FnOnce(Session) -> Session,
    {
        if self.active_session().is_none() {
            debug!("No active session, ignoring command");
            return;
        }
        self.apply(|store| store.update_active(change));
    }

    fn apply<F>(&mut self, transition: F)
    where
        F: FnOnce(Store) -> Store,
    {
        let next = transition(self.store.clone());

        if next.sessions() != self.store.sessions() {
            self.repository.save(next.sessions());
        }
        self.store = next;
    }
}
