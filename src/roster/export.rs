use crate::config::ExportSettings;
use crate::domain::{Gender, Player};

/// Numbered roster list: `"{n}. {name} {marker}"`, one line per player
pub fn roster_text(players: &[Player], settings: &ExportSettings) -> String {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {} {}", i + 1, p.name, gender_marker(p.gender, settings)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn gender_marker(gender: Gender, settings: &ExportSettings) -> &str {
    match gender {
        Gender::Male => &settings.male_marker,
        Gender::Female => &settings.female_marker,
    }
}
