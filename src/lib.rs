//! clockify-timesheet library root.
//! Exposes the CLI parser, the high-level run() function and the
//! reconciliation pipeline used to build monthly timesheets.

pub mod cli;
pub mod clockify;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod http;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli),
        Commands::Config { .. } => {
            let path = cli.config.clone().unwrap_or_else(Config::config_file);
            cli::commands::config::handle(&cli.command, cfg, &path)
        }
        Commands::Generate { .. } => cli::commands::generate::handle(&cli.command, cfg).await,
        Commands::Workspaces => cli::commands::workspaces::handle(cfg).await,
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg).await,
    }
}

/// Entry point usato da main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // carica config UNA sola volta (file + variabili d'ambiente);
    // `init` must work even when the existing file is broken
    let cfg = match cli.command {
        Commands::Init { .. } => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };

    logging::init(&cfg.log_level);

    dispatch(&cli, &cfg).await
}
