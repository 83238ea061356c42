use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::{Player, PlayerDraft, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriteria {
    Present,
    Paid,
    Name,
}

impl FromStr for SortCriteria {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(SortCriteria::Present),
            "paid" => Ok(SortCriteria::Paid),
            "name" => Ok(SortCriteria::Name),
            other => Err(format!("unknown sort criteria '{}' (expected present, paid or name)", other)),
        }
    }
}

impl fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortCriteria::Present => "present",
            SortCriteria::Paid => "paid",
            SortCriteria::Name => "name",
        };
        f.write_str(label)
    }
}

pub fn add_players(mut session: Session, players: Vec<Player>) -> Session {
    session.players.extend(players);
    session
}

pub fn update_player_details(session: Session, player_id: &str, details: PlayerDraft) -> Session {
    update_player(session, player_id, |player| {
        player.name = details.name;
        player.level = details.level;
        player.gender = details.gender;
    })
}

/// Team snapshots keep their copies of the removed player
pub fn remove_player(mut session: Session, player_id: &str) -> Session {
    session.players.retain(|p| p.id != player_id);
    session
}

pub fn toggle_presence(session: Session, player_id: &str) -> Session {
    update_player(session, player_id, |player| player.present = !player.present)
}

pub fn toggle_payment(session: Session, player_id: &str) -> Session {
    update_player(session, player_id, |player| player.paid = !player.paid)
}

pub fn mark_all_present(mut session: Session) -> Session {
    for player in &mut session.players {
        player.present = true;
    }
    session
}

/// Absent players cannot pre-pay
pub fn mark_all_paid(mut session: Session) -> Session {
    for player in session.players.iter_mut().filter(|p| p.present) {
        player.paid = true;
    }
    session
}

/// Out-of-range positions leave the roster untouched
pub fn reorder_players(mut session: Session, from_index: usize, to_index: usize) -> Session {
    let len = session.players.len();
    if from_index >= len || to_index >= len {
        return session;
    }

    let moved = session.players.remove(from_index);
    session.players.insert(to_index, moved);
    session
}

/// Stable sort
pub fn sort_players(mut session: Session, criteria: SortCriteria) -> Session {
    match criteria {
        SortCriteria::Present => session.players.sort_by(|a, b| b.present.cmp(&a.present)),
        SortCriteria::Paid => session.players.sort_by(|a, b| b.paid.cmp(&a.paid)),
        SortCriteria::Name => session.players.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }
    session
}

/// Case-insensitive first; lowercase ahead of uppercase when only case differs
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

fn update_player<F>(mut session: Session, player_id: &str, change: F) -> Session
where
    F: FnOnce(&mut Player),
{
    if let Some(player) = session.players.iter_mut().find(|p| p.id == player_id) {
        change(player);
    }
    session
}
