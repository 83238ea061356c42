use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::timestamps;

/// Ranked skill level of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
}

impl SkillLevel {
    /// Strongest first
    pub const ALL: [SkillLevel; 6] = [
        SkillLevel::A,
        SkillLevel::BPlus,
        SkillLevel::B,
        SkillLevel::BMinus,
        SkillLevel::CPlus,
        SkillLevel::C,
    ];

    /// Integer proxy used for balancing, strictly descending with level
    pub fn weight(self) -> u32 {
        match self {
            SkillLevel::A => 6,
            SkillLevel::BPlus => 5,
            SkillLevel::B => 4,
            SkillLevel::BMinus => 3,
            SkillLevel::CPlus => 2,
            SkillLevel::C => 1,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SkillLevel::A => "A",
            SkillLevel::BPlus => "B+",
            SkillLevel::B => "B",
            SkillLevel::BMinus => "B-",
            SkillLevel::CPlus => "C+",
            SkillLevel::C => "C",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        SkillLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| format!("unknown skill level '{}' (expected A, B+, B, B-, C+ or C)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("unknown gender '{}' (expected male or female)", s)),
        }
    }
}

/// Rostered player of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
    pub gender: Gender,
    pub paid: bool,
    pub present: bool,
}

impl Player {
    /// New players start absent and unpaid
    pub fn new(id: String, draft: PlayerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            level: draft.level,
            gender: draft.gender,
            paid: false,
            present: false,
        }
    }
}

/// Player details before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: String,
    pub level: SkillLevel,
    pub gender: Gender,
}

impl PlayerDraft {
    pub fn new(name: impl Into<String>, level: SkillLevel, gender: Gender) -> Self {
        Self {
            name: name.into(),
            level,
            gender,
        }
    }
}

/// Team snapshot; players are copies taken at assignment time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    pub score: u32,
}

impl Team {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
            score: 0,
        }
    }
}

/// Saved result of one match between the first two teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub team1_name: String,
    pub team1_score: u32,
    pub team2_name: String,
    pub team2_score: u32,
    #[serde(with = "timestamps")]
    pub timestamp: DateTime<Utc>,
}

/// One scheduled event with its own roster, teams and match history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(with = "timestamps")]
    pub date: DateTime<Utc>,
    pub fee: f64,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    // Sessions saved before match history existed have no list
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl Session {
    pub fn new(id: String, name: impl Into<String>, date: DateTime<Utc>, fee: f64) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            fee,
            players: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub fn present_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.present)
    }

    pub fn find_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }
}
