//! Unified application error type.
//! All modules (core, clockify, export, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Remote services
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    // ---------------------------
    // Core pipeline
    // ---------------------------
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Malformed interval in entry {entry_id}: end {end} precedes start {start}")]
    MalformedInterval {
        entry_id: String,
        start: String,
        end: String,
    },

    #[error(
        "Entry {entry_id} spans more than one local midnight ({start_date} → {end_date}); \
         split it in the time tracker before exporting"
    )]
    UnsupportedSpan {
        entry_id: String,
        start_date: String,
        end_date: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
