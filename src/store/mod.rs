//! The session collection plus the active-selection pointer.
//!
//! Every transition consumes the store and returns the next one. The
//! pointer is either `None` or the id of a session in the collection.

use crate::domain::{Player, Session, Team};
use crate::roster::RosterStats;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    sessions: Vec<Session>,
    active_session_id: Option<String>,
}

impl Store {
    /// Nothing selected
    pub fn new(sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            active_session_id: None,
        }
    }

    // --- Derived Views ---

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn active_session_id(&self) -> Option<&str> {
        self.active_session_id.as_deref()
    }

    pub fn active_session(&self) -> Option<&Session> {
        let active_id = self.active_session_id()?;
        self.sessions.iter().find(|s| s.id == active_id)
    }

    pub fn players(&self) -> &[Player] {
        self.active_session()
            .map(|s| s.players.as_slice())
            .unwrap_or(&[])
    }

    pub fn present_players(&self) -> Vec<&Player> {
        self.players().iter().filter(|p| p.present).collect()
    }

    pub fn teams(&self) -> &[Team] {
        self.active_session()
            .map(|s| s.teams.as_slice())
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> RosterStats {
        self.active_session()
            .map(RosterStats::for_session)
            .unwrap_or_default()
    }

    // --- Transitions ---

    /// Insert and re-sort newest date first; equal dates keep the new session ahead
    pub fn add_session(mut self, session: Session) -> Self {
        self.sessions.insert(0, session);
        self.sessions.sort_by(|a, b| b.date.cmp(&a.date));
        self
    }

    /// Clears the selection when it pointed at the deleted session
    pub fn delete_session(mut self, session_id: &str) -> Self {
        self.sessions.retain(|s| s.id != session_id);
        if self.active_session_id() == Some(session_id) {
            self.active_session_id = None;
        }
        self
    }

    /// Unknown ids leave the selection as it was
    pub fn select_session(mut self, session_id: Option<&str>) -> Self {
        match session_id {
            None => self.active_session_id = None,
            Some(id) if self.sessions.iter().any(|s| s.id == id) => {
                self.active_session_id = Some(id.to_string());
            }
            Some(_) => {}
        }
        self
    }

    /// Replace the active session with `change(session)`; no-op without one
    pub fn update_active<F>(mut self, change: F) -> Self
    where
        F: FnOnce(Session) -> Session,
    {
        let Some(index) = self.active_index() else {
            return self;
        };

        let current = std::mem::take(&mut self.sessions[index]);
        self.sessions[index] = change(current);
        self
    }

    fn active_index(&self) -> Option<usize> {
        let active_id = self.active_session_id()?;
        self.sessions.iter().position(|s| s.id == active_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster;
    use chrono::{TimeZone, Utc};

    fn session(id: &str, day: u32) -> Session {
        let date = Utc.with_ymd_and_hms(2024, 5, day, 18, 0, 0).unwrap();
        Session::new(id.to_string(), format!("Session {}", id), date, 100.0)
    }

    fn ids(store: &Store) -> Vec<&str> {
        store.sessions().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_add_session_sorts_newest_first() {
        let store = Store::new(vec![session("b", 10), session("a", 1)])
            .add_session(session("c", 5))
            .add_session(session("d", 20))
            .add_session(session("e", 5));

        assert_eq!(ids(&store), vec!["d", "b", "e", "c", "a"]);
    }

    #[test]
    fn test_delete_active_session_clears_selection() {
        let store = Store::new(vec![session("a", 1), session("b", 2)])
            .select_session(Some("a"))
            .delete_session("a");

        assert_eq!(ids(&store), vec!["b"]);
        assert_eq!(store.active_session_id(), None);
    }

    #[test]
    fn test_delete_other_session_keeps_selection() {
        let store = Store::new(vec![session("a", 1), session("b", 2)])
            .select_session(Some("a"))
            .delete_session("b");

        assert_eq!(store.active_session_id(), Some("a"));
    }

    #[test]
    fn test_select_unknown_session_keeps_selection() {
        let store = Store::new(vec![session("a", 1)]).select_session(Some("a"));

        let store = store.select_session(Some("missing"));
        assert_eq!(store.active_session_id(), Some("a"));

        let store = store.select_session(None);
        assert_eq!(store.active_session_id(), None);
    }

    #[test]
    fn test_update_without_active_session_is_a_no_op() {
        let original = Store::new(vec![session("a", 1)]);

        let store = original.clone().update_active(roster::mark_all_present);

        assert_eq!(store, original);
        assert!(store.players().is_empty());
        assert_eq!(store.stats(), RosterStats::default());
    }

    #[test]
    fn test_update_touches_only_active_session() {
        let mut first = session("a", 1);
        first.fee = 10.0;
        let store = Store::new(vec![first, session("b", 2)])
            .select_session(Some("b"))
            .update_active(|mut s| {
                s.fee = 55.0;
                s
            });

        assert_eq!(store.sessions()[0].fee, 10.0);
        assert_eq!(store.active_session().map(|s| s.fee), Some(55.0));
    }
}
