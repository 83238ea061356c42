use serde::Serialize;

use crate::domain::Session;

/// Attendance and payment summary of one session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub total: usize,
    pub present: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub collected: f64,
}

impl RosterStats {
    /// Only present players count towards payments
    pub fn for_session(session: &Session) -> Self {
        let present = session.present_players().count();
        let paid_count = session.present_players().filter(|p| p.paid).count();

        Self {
            total: session.players.len(),
            present,
            paid_count,
            unpaid_count: present - paid_count,
            collected: paid_count as f64 * session.fee,
        }
    }
}

/// Mean skill weight of the present players, `0` when nobody is present
pub fn average_present_skill(session: &Session) -> f64 {
    let weights: Vec<u32> = session.present_players().map(|p| p.level.weight()).collect();
    if weights.is_empty() {
        return 0.0;
    }
    weights.iter().sum::<u32>() as f64 / weights.len() as f64
}
