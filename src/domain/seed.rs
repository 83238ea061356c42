use chrono::{DateTime, Utc};

use super::models::{Gender, Player, Session, SkillLevel};

pub const DEMO_SESSION_ID: &str = "demo-1";
const DEMO_SESSION_NAME: &str = "Sunday Morning Open Play";
const DEMO_FEE: f64 = 150.0;

/// Built-in session set used when nothing usable was persisted
pub fn default_sessions(now: DateTime<Utc>) -> Vec<Session> {
    vec![demo_session(now)]
}

pub fn demo_session(now: DateTime<Utc>) -> Session {
    let mut session = Session::new(DEMO_SESSION_ID.to_string(), DEMO_SESSION_NAME, now, DEMO_FEE);
    session.players = vec![
        demo_player("1", "Alex", SkillLevel::A, Gender::Male, true, true),
        demo_player("2", "Bella", SkillLevel::B, Gender::Female, false, true),
        demo_player("3", "Charlie", SkillLevel::CPlus, Gender::Male, true, true),
        demo_player("4", "Diana", SkillLevel::BPlus, Gender::Female, true, true),
        demo_player("5", "Eve", SkillLevel::A, Gender::Female, false, false),
        demo_player("6", "Frank", SkillLevel::C, Gender::Male, true, true),
    ];
    session
}

fn demo_player(
    id: &str,
    name: &str,
    level: SkillLevel,
    gender: Gender,
    paid: bool,
    present: bool,
) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        level,
        gender,
        paid,
        present,
    }
}
