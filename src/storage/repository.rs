use anyhow::{bail, Result};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

use super::Transport;
use crate::domain::Session;
use crate::errors::with_parse_context;

/// Reads and writes the whole session collection through a transport.
///
/// Nothing here ever fails towards the caller: unreadable or invalid
/// documents load as `None` and failed writes are dropped, both with a
/// warning in the log.
pub struct SessionRepository {
    transport: Box<dyn Transport>,
}

impl SessionRepository {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Stored sessions, or `None` when the caller should keep its defaults
    pub fn load(&self) -> Option<Vec<Session>> {
        let bytes = match self.transport.load() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!("No saved sessions found, using defaults");
                return None;
            }
            Err(e) => {
                warn!("Failed to read saved sessions, reverting to defaults: {:#}", e);
                return None;
            }
        };

        match decode_sessions(&bytes) {
            Ok(Some(sessions)) => {
                info!("Loaded {} saved sessions", sessions.len());
                Some(sessions)
            }
            Ok(None) => {
                info!("Saved session list is empty, using defaults");
                None
            }
            Err(e) => {
                warn!("Failed to parse saved data, reverting to defaults: {:#}", e);
                None
            }
        }
    }

    /// Replace the stored collection; failures are logged and swallowed
    pub fn save(&self, sessions: &[Session]) {
        let result = encode_sessions(sessions).and_then(|bytes| self.transport.save(&bytes));

        match result {
            Ok(()) => debug!("Saved {} sessions", sessions.len()),
            Err(e) => warn!("Failed to save sessions: {:#}", e),
        }
    }
}

/// `Err` for a collection that would not load back, so the last good blob stays
pub fn encode_sessions(sessions: &[Session]) -> Result<Vec<u8>> {
    for session in sessions {
        if !session.fee.is_finite() {
            bail!("session {} has a non-finite fee: {}", session.id, session.fee);
        }
    }
    with_parse_context(serde_json::to_vec(sessions), "session list")
}

/// `Ok(None)` for an empty array, `Err` for anything that is not a valid session array
pub fn decode_sessions(bytes: &[u8]) -> Result<Option<Vec<Session>>> {
    let document: Value = with_parse_context(serde_json::from_slice(bytes), "saved document")?;

    let Value::Array(items) = &document else {
        bail!("saved document is not an array");
    };

    if items.is_empty() {
        return Ok(None);
    }

    let sessions: Vec<Session> = with_parse_context(serde_json::from_value(document), "session list")?;
    validate_sessions(&sessions)?;

    Ok(Some(sessions))
}

fn validate_sessions(sessions: &[Session]) -> Result<()> {
    let mut session_ids = HashSet::new();

    for session in sessions {
        if !session_ids.insert(session.id.as_str()) {
            bail!("duplicate session id: {}", session.id);
        }
        validate_player_ids(session)?;
    }

    Ok(())
}

fn validate_player_ids(session: &Session) -> Result<()> {
    let mut player_ids = HashSet::new();

    for player in &session.players {
        if !player_ids.insert(player.id.as_str()) {
            bail!("duplicate player id {} in session {}", player.id, session.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::demo_session;
    use crate::domain::{MatchRecord, Team};
    use crate::storage::MemoryTransport;
    use chrono::{TimeZone, Utc};

    fn sample_sessions() -> Vec<Session> {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        let mut session = demo_session(now);
        session.teams = vec![Team {
            name: "Team 1".to_string(),
            players: session.players[..2].to_vec(),
            score: 7,
        }];
        session.matches = vec![MatchRecord {
            id: "m1".to_string(),
            team1_name: "Team 1".to_string(),
            team1_score: 25,
            team2_name: "Team 2".to_string(),
            team2_score: 23,
            timestamp: now,
        }];
        session.fee = 137.5;
        vec![session]
    }

    fn repository_with(bytes: &[u8]) -> SessionRepository {
        SessionRepository::new(Box::new(MemoryTransport::with_contents(bytes)))
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let transport = MemoryTransport::new();
        let repository = SessionRepository::new(Box::new(transport.clone()));
        let sessions = sample_sessions();

        repository.save(&sessions);

        assert!(transport.contents().is_some());
        assert_eq!(repository.load(), Some(sessions));
    }

    #[test]
    fn test_non_finite_fee_keeps_last_good_blob() {
        let transport = MemoryTransport::new();
        let repository = SessionRepository::new(Box::new(transport.clone()));
        let sessions = sample_sessions();
        repository.save(&sessions);

        for fee in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut broken = sessions.clone();
            broken[0].fee = fee;

            assert!(encode_sessions(&broken).is_err());
            repository.save(&broken);
            assert_eq!(repository.load(), Some(sessions.clone()));
        }
        assert_eq!(transport.write_count(), 1);
    }

    #[test]
    fn test_document_uses_wire_field_names() {
        let bytes = encode_sessions(&sample_sessions()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value[0]["id"], "demo-1");
        assert_eq!(value[0]["players"][2]["level"], "C+");
        assert_eq!(value[0]["matches"][0]["team1Score"], 25);
        assert_eq!(value[0]["date"], "2024-05-01T18:00:00Z");
    }

    #[test]
    fn test_garbage_loads_nothing() {
        assert_eq!(repository_with(b"not json at all").load(), None);
        assert_eq!(repository_with(b"{\"sessions\":[]}").load(), None);
        assert_eq!(repository_with(b"[]").load(), None);
        assert_eq!(repository_with(b"[{\"id\":\"x\"}]").load(), None);
    }

    #[test]
    fn test_missing_blob_loads_nothing() {
        let repository = SessionRepository::new(Box::new(MemoryTransport::new()));
        assert_eq!(repository.load(), None);
    }

    #[test]
    fn test_unknown_enum_value_rejects_document() {
        let bytes = encode_sessions(&sample_sessions()).unwrap();
        let tampered = String::from_utf8(bytes).unwrap().replace("\"C+\"", "\"Z\"");

        assert_eq!(repository_with(tampered.as_bytes()).load(), None);
    }

    #[test]
    fn test_negative_score_rejects_document() {
        let bytes = encode_sessions(&sample_sessions()).unwrap();
        let tampered = String::from_utf8(bytes).unwrap().replace("\"score\":7", "\"score\":-1");

        assert_eq!(repository_with(tampered.as_bytes()).load(), None);
    }

    #[test]
    fn test_duplicate_ids_reject_document() {
        let mut sessions = sample_sessions();
        sessions.push(sessions[0].clone());
        let bytes = encode_sessions(&sessions).unwrap();
        assert!(decode_sessions(&bytes).is_err());

        let mut sessions = sample_sessions();
        let copy = sessions[0].players[0].clone();
        sessions[0].players.push(copy);
        let bytes = encode_sessions(&sessions).unwrap();
        assert!(decode_sessions(&bytes).is_err());
    }

    #[test]
    fn test_accepts_offsetless_dates() {
        let json = r#"[{"id":"s1","name":"Gym A","date":"2024-05-01T18:00","fee":100,
            "players":[],"teams":[],"matches":[]}]"#;

        let sessions = decode_sessions(json.as_bytes()).unwrap().unwrap();

        assert_eq!(sessions[0].date, Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap());
        assert_eq!(sessions[0].fee, 100.0);
    }
}
