use chrono::{DateTime, Utc};

use crate::domain::{MatchRecord, Session};

/// Apply `delta` to one team's score, flooring at zero
pub fn update_score(mut session: Session, team_index: usize, delta: i32) -> Session {
    if let Some(team) = session.teams.get_mut(team_index) {
        team.score = apply_delta(team.score, delta);
    }
    session
}

fn apply_delta(score: u32, delta: i32) -> u32 {
    if delta.is_negative() {
        score.saturating_sub(delta.unsigned_abs())
    } else {
        score.saturating_add(delta.unsigned_abs())
    }
}

/// Prepend a record of the first two teams' current scores; needs two teams
pub fn save_match_result(mut session: Session, id: String, timestamp: DateTime<Utc>) -> Session {
    let [first, second, ..] = session.teams.as_slice() else {
        return session;
    };

    let record = MatchRecord {
        id,
        team1_name: first.name.clone(),
        team1_score: first.score,
        team2_name: second.name.clone(),
        team2_score: second.score,
        timestamp,
    };

    session.matches.insert(0, record);
    session
}

/// Zero every score; unsaved results are discarded
pub fn reset_scores(mut session: Session) -> Session {
    for team in &mut session.teams {
        team.score = 0;
    }
    session
}
