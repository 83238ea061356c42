pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod roster;
pub mod scoring;
pub mod services;
pub mod storage;
pub mod store;
pub mod teams;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::config::settings::AppConfig;
use crate::domain::{SystemClock, UuidGenerator};
use crate::services::{ConsoleService, SessionService};
use crate::storage::SessionRepository;

pub fn interpret() -> Cli {
    Cli::parse()
}

/// Engine wired to the configured storage, real ids and the system clock
pub fn build_service(config: &AppConfig) -> Result<SessionService> {
    let transport = storage::open_transport(&config.storage)?;
    let repository = SessionRepository::new(transport);
    Ok(SessionService::new(
        config,
        repository,
        Box::new(UuidGenerator),
        Box::new(SystemClock),
    ))
}

pub fn handle_command(session: Option<&str>, command: &cli::Command) -> Result<()> {
    let config = AppConfig::from_env();
    let service = build_service(&config)?;
    let mut console = ConsoleService::new(service);
    console.run(session, command)
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
