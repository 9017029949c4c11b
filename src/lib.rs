//! mjledger library root.
//! Exposes the CLI parser, the high-level run() function, and the engines
//! (sequencing, fees, rankings) for embedding.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Fees { .. } => cli::commands::fees::handle(&cli.command, cfg),
        Commands::Ranking { .. } => cli::commands::ranking::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // loaded once; command-line overrides win over the file
    let mut cfg = Config::load()?;

    if let Some(backend) = cli.backend.filter(|b| *b != cfg.backend) {
        cfg.backend = backend;
        cfg.store = Config::store_file(backend).to_string_lossy().to_string();
    }
    if let Some(custom) = &cli.store {
        cfg.store = custom.clone();
    }

    dispatch(&cli, &cfg)
}
