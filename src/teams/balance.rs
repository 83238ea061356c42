use serde::Serialize;

use crate::domain::Team;

/// Mean skill weight of a team, `0` when it has no players
pub fn average_skill(team: &Team) -> f64 {
    if team.players.is_empty() {
        return 0.0;
    }
    total_weight(team) as f64 / team.players.len() as f64
}

pub fn total_weight(team: &Team) -> u32 {
    team.players.iter().map(|p| p.level.weight()).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBalance {
    pub name: String,
    pub players: usize,
    pub total_weight: u32,
    pub average_skill: f64,
}

/// Per-team weights plus the gap between the strongest and weakest team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub teams: Vec<TeamBalance>,
    pub spread: u32,
}

impl BalanceReport {
    pub fn for_teams(teams: &[Team]) -> Self {
        let teams: Vec<TeamBalance> = teams
            .iter()
            .map(|team| TeamBalance {
                name: team.name.clone(),
                players: team.players.len(),
                total_weight: total_weight(team),
                average_skill: average_skill(team),
            })
            .collect();

        let max = teams.iter().map(|t| t.total_weight).max().unwrap_or(0);
        let min = teams.iter().map(|t| t.total_weight).min().unwrap_or(0);

        Self {
            teams,
            spread: max - min,
        }
    }
}
