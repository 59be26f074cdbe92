use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Writes a default configuration file at the `--config` path (or
/// `~/.clockify-timesheet/clockify-timesheet.conf`). An existing file is
/// kept unless `--force` is given.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init { force } = &cli.command else {
        return Ok(());
    };

    let path = cli.config.clone().unwrap_or_else(Config::config_file);

    if path.exists() && !*force {
        return Err(AppError::Config(format!(
            "configuration file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    info("Initializing clockify-timesheet…");
    Config::default().save(&path)?;

    success(format!("Configuration file created: {}", path.display()));
    info("Fill in clockify.api_key, workspace_id and user_id (or set CLOCKIFY_* variables).");
    info("`clockify-timesheet user` and `clockify-timesheet workspaces` print the ids.");
    Ok(())
}
