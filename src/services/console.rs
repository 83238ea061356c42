use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use colored::Colorize;
use log::info;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::cli::Command;
use crate::domain::timestamps::{format_iso, parse_iso};
use crate::domain::{Gender, PlayerDraft, SkillLevel};
use crate::roster::BatchParser;
use crate::services::session_service::SessionService;

/// Runs one command-line command against the session service and prints the result
pub struct ConsoleService {
    service: SessionService,
}

impl ConsoleService {
    pub fn new(service: SessionService) -> Self {
        Self { service }
    }

    pub fn run(&mut self, session: Option<&str>, command: &Command) -> Result<()> {
        match command {
            Command::Sessions => {
                self.print_sessions();
                Ok(())
            }
            Command::AddSession { name, date } => self.add_session(name, date.as_deref()),
            Command::DeleteSession { id } => self.delete_session(id),
            Command::Completions { .. } => bail!("completions are generated before any session is loaded"),
            other => {
                self.select(session)?;
                self.run_in_session(other)
            }
        }
    }

    fn run_in_session(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Fee { amount } => self.service.update_fee(*amount),
            Command::Roster => {}
            Command::AddPlayer { name, level, gender } => {
                self.service.add_player(PlayerDraft::new(name.trim(), *level, *gender));
            }
            Command::Import { file, level, gender } => self.import(file.as_deref(), *level, *gender)?,
            Command::Edit {
                player_id,
                name,
                level,
                gender,
            } => {
                self.require_player(player_id)?;
                self.service
                    .update_player_details(player_id, PlayerDraft::new(name.trim(), *level, *gender));
            }
            Command::Remove { player_id } => {
                self.require_player(player_id)?;
                self.service.remove_player(player_id);
            }
            Command::CheckIn { player_id } => {
                self.require_player(player_id)?;
                self.service.toggle_presence(player_id);
            }
            Command::Pay { player_id } => {
                self.require_player(player_id)?;
                self.service.toggle_payment(player_id);
            }
            Command::CheckInAll => self.service.mark_all_present(),
            Command::PayAll => self.service.mark_all_paid(),
            Command::Reorder { from, to } => {
                self.service.reorder_players(to_index(*from)?, to_index(*to)?);
            }
            Command::Sort { criteria } => self.service.sort_players(*criteria),
            Command::Export => {
                println!("{}", self.service.export_text());
                return Ok(());
            }
            Command::Teams { generate, count } => {
                if *generate || count.is_some() {
                    let count = count.unwrap_or_else(|| self.service.default_team_count());
                    self.service.generate_teams(count);
                }
                self.print_teams();
                return Ok(());
            }
            Command::MoveTeamPlayer {
                from_team,
                to_team,
                player,
                position,
            } => {
                let to_position = (*position).map(to_index).transpose()?;
                self.service.move_player_between_teams(
                    to_index(*from_team)?,
                    to_index(*to_team)?,
                    to_index(*player)?,
                    to_position,
                );
                self.print_teams();
                return Ok(());
            }
            Command::Score { team, delta } => {
                self.service.update_score(to_index(*team)?, *delta);
                self.print_scores();
                return Ok(());
            }
            Command::SaveMatch => self.service.save_match_result(),
            Command::ResetScores => self.service.reset_scores(),
            Command::FinishMatch { discard } => self.service.finish_match(!discard),
            Command::History => {
                self.print_history();
                return Ok(());
            }
            Command::Sessions
            | Command::AddSession { .. }
            | Command::DeleteSession { .. }
            | Command::Completions { .. } => {}
        }

        self.print_roster();
        Ok(())
    }

    // --- Session Commands ---

    fn add_session(&mut self, name: &str, date: Option<&str>) -> Result<()> {
        let date = match date {
            Some(raw) => parse_iso(raw).ok_or_else(|| anyhow!("Invalid date: {}", raw))?,
            None => Utc::now(),
        };

        let id = self.service.add_session(name.trim(), date);
        println!("Created session {}", id.bold());
        Ok(())
    }

    fn delete_session(&mut self, id: &str) -> Result<()> {
        if !self.service.sessions().iter().any(|s| s.id == id) {
            bail!("Unknown session: {}", id);
        }
        self.service.delete_session(id);
        println!("Deleted session {}", id);
        Ok(())
    }

    fn select(&mut self, session: Option<&str>) -> Result<()> {
        let id = session.ok_or_else(|| anyhow!("This command needs --session <ID>"))?;
        self.service.select_session(Some(id));

        if self.service.active_session().is_none() {
            bail!("Unknown session: {}", id);
        }
        Ok(())
    }

    // --- Roster Helpers ---

    fn import(&mut self, file: Option<&Path>, level: SkillLevel, gender: Gender) -> Result<()> {
        let text = read_input(file)?;
        let drafts = BatchParser::new()?.parse(&text, level, gender);
        info!("Importing {} players", drafts.len());
        self.service.add_players(drafts);
        Ok(())
    }

    fn require_player(&self, player_id: &str) -> Result<()> {
        let found = self
            .service
            .active_session()
            .and_then(|s| s.find_player(player_id));

        if found.is_some() {
            Ok(())
        } else {
            bail!("Unknown player: {}", player_id)
        }
    }

    // --- Output ---

    fn print_sessions(&self) {
        for session in self.service.sessions() {
            println!(
                "{}  {}  {}  fee {}  {} players",
                session.id.bold(),
                format_iso(&session.date),
                session.name,
                session.fee,
                session.players.len()
            );
        }
    }

    fn print_roster(&self) {
        for (i, player) in self.service.players().iter().enumerate() {
            let present = if player.present { "present".green() } else { "absent".dimmed() };
            let paid = if player.paid { "paid".green() } else { "unpaid".yellow() };
            println!(
                "{:>3}. {:<20} {:<3} {:<7} {:<8} {:<7} {}",
                i + 1,
                player.name,
                player.level,
                player.gender,
                present,
                paid,
                player.id.dimmed()
            );
        }

        let stats = self.service.stats();
        println!(
            "{} players, {} present, {} paid, {} unpaid, collected {}, avg skill {:.2}",
            stats.total,
            stats.present,
            stats.paid_count,
            stats.unpaid_count,
            stats.collected.to_string().bold(),
            self.service.average_present_skill()
        );
    }

    fn print_teams(&self) {
        let report = self.service.balance_report();

        for (team, balance) in self.service.teams().iter().zip(&report.teams) {
            println!(
                "{} (score {}, avg skill {:.2})",
                team.name.bold(),
                team.score,
                balance.average_skill
            );
            for (i, player) in team.players.iter().enumerate() {
                println!("  {:>2}. {} [{}]", i + 1, player.name, player.level);
            }
        }

        if !report.teams.is_empty() {
            println!("Weight spread: {}", report.spread);
        }
    }

    fn print_scores(&self) {
        for team in self.service.teams() {
            println!("{}: {}", team.name, team.score.to_string().bold());
        }
    }

    fn print_history(&self) {
        let Some(session) = self.service.active_session() else {
            return;
        };

        for record in &session.matches {
            println!(
                "{}  {} {} : {} {}",
                format_iso(&record.timestamp).dimmed(),
                record.team1_name,
                record.team1_score,
                record.team2_score,
                record.team2_name
            );
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read import file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read players from stdin")?;
            Ok(text)
        }
    }
}

fn to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Positions start at 1"))
}
