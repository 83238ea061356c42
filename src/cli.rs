use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{Gender, SkillLevel};
use crate::roster::SortCriteria;
use crate::teams::{MAX_TEAM_COUNT, MIN_TEAM_COUNT};

#[derive(Parser, Debug)]
#[command(author, version, about = "volleymate session tracker")]
pub struct Cli {
    /// Session to act on (ids are listed by `sessions`)
    #[arg(short, long, global = true)]
    pub session: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Positions and team numbers are 1-based, as printed by `roster` and `teams`
#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// List all sessions, newest first
    Sessions,
    /// Create a new session
    AddSession {
        name: String,
        /// ISO-8601 date, e.g. 2024-05-01T18:00 (defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a session and everything in it
    DeleteSession { id: String },
    /// Set the per-player fee of the session
    Fee {
        #[arg(allow_negative_numbers = true, value_parser = parse_fee)]
        amount: f64,
    },
    /// Show the roster with attendance, payment and totals
    Roster,
    /// Add one player
    AddPlayer {
        name: String,
        #[arg(short, long, default_value = "B")]
        level: SkillLevel,
        #[arg(short, long, default_value = "male")]
        gender: Gender,
    },
    /// Add players from text, one per line ("Guest 3" adds three); reads stdin without a file
    Import {
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "B")]
        level: SkillLevel,
        #[arg(short, long, default_value = "male")]
        gender: Gender,
    },
    /// Change a player's name, level and gender
    Edit {
        player_id: String,
        name: String,
        #[arg(short, long)]
        level: SkillLevel,
        #[arg(short, long)]
        gender: Gender,
    },
    /// Remove a player from the roster
    Remove { player_id: String },
    /// Toggle a player's attendance
    CheckIn { player_id: String },
    /// Toggle a player's payment
    Pay { player_id: String },
    /// Mark every player present
    CheckInAll,
    /// Mark every present player paid
    PayAll,
    /// Move the player at one roster position to another
    Reorder { from: usize, to: usize },
    /// Sort the roster: present, paid or name
    Sort { criteria: SortCriteria },
    /// Print the numbered roster list for sharing
    Export,
    /// Show teams, optionally drafting them again from the present players
    Teams {
        /// Draft new teams before showing them
        #[arg(short, long)]
        generate: bool,
        /// Number of teams to draft, 2 to 4 (implies --generate; defaults to 2)
        #[arg(short, long, value_parser = parse_team_count)]
        count: Option<usize>,
    },
    /// Move a player between teams
    MoveTeamPlayer {
        from_team: usize,
        to_team: usize,
        player: usize,
        /// Insert position in the destination team (appends when omitted)
        #[arg(short, long)]
        position: Option<usize>,
    },
    /// Add to (or subtract from) a team's score
    Score {
        team: usize,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Record the current score of teams 1 and 2
    SaveMatch,
    /// Zero all scores without recording
    ResetScores,
    /// Record the current match (unless --discard) and reset the scores
    FinishMatch {
        #[arg(long)]
        discard: bool,
    },
    /// Show the match history of the session
    History,
    /// Generate shell completions
    Completions { shell: Shell },
}

fn parse_fee(raw: &str) -> Result<f64, String> {
    let amount: f64 = raw.parse().map_err(|_| format!("'{}' is not a number", raw))?;
    if !amount.is_finite() {
        return Err(format!("'{}' is not a finite amount", raw));
    }
    Ok(amount)
}

fn parse_team_count(raw: &str) -> Result<usize, String> {
    let count: usize = raw.parse().map_err(|_| format!("'{}' is not a team count", raw))?;
    if !(MIN_TEAM_COUNT..=MAX_TEAM_COUNT).contains(&count) {
        return Err(format!(
            "team count must be between {} and {}",
            MIN_TEAM_COUNT, MAX_TEAM_COUNT
        ));
    }
    Ok(count)
}
