// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `<dir>/<stem>.<ext>`, creating `dir` if needed.
pub(crate) fn output_path(dir: &Path, stem: &str, ext: &str) -> AppResult<PathBuf> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.join(format!("{stem}.{ext}")))
}

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Ask on the terminal.
    Prompt,
    /// `--force`
    Always,
    Never,
}

/// Verifica se un file può essere creato o sovrascritto.
///
/// - file missing → Ok
/// - exists + `Always` → Ok
/// - exists + `Prompt` → asks the user
/// - exists + `Never` → error
///
/// Blocks on stdin; renderers call it from `run_blocking`.
pub(crate) fn ensure_writable(path: &Path, overwrite: Overwrite) -> AppResult<()> {
    if !path.exists() || overwrite == Overwrite::Always {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    if overwrite == Overwrite::Never {
        return Err(AppError::Export(format!(
            "refusing to overwrite '{}' (use --force)",
            path.display()
        )));
    }

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".to_string(),
        ))
    }
}
