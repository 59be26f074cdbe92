use crate::cli::parser::Commands;
use crate::config::{Config, check};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        header(format!("Current configuration ({})", path.display()));
        let yaml = serde_yaml::to_string(&cfg.redacted())
            .map_err(|e| AppError::Other(format!("cannot serialize configuration: {e}")))?;
        println!("{yaml}");
    }

    if *check {
        let problems = check::problems(cfg);
        if problems.is_empty() {
            success("Configuration is complete.");
        } else {
            for p in &problems {
                warning(p);
            }
            return Err(AppError::Config(format!(
                "{} problem(s) found in {}",
                problems.len(),
                path.display()
            )));
        }
    }

    if *edit_config {
        edit(path, editor.as_deref());
    }

    Ok(())
}

fn edit(path: &Path, requested: Option<&str>) {
    // Default editor basato sulla piattaforma
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.map(str::to_string).unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{editor_to_use}'"
            ));
        }
        _ => {
            warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            ));
            match Command::new(&default_editor).arg(path).status() {
                Ok(s) if s.success() => success(format!(
                    "Configuration file edited successfully using fallback '{default_editor}'"
                )),
                _ => error(format!(
                    "Failed to edit configuration file using fallback '{default_editor}'"
                )),
            }
        }
    }
}
