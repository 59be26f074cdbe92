//! User-facing console output. Diagnostics go through `tracing` instead.

use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Section header followed by a rule.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}{}{}{}", FG_BLUE, BOLD, msg, RESET);
    rule(50);
}

pub fn rule(width: usize) {
    println!("{}{}{}", DIM, "━".repeat(width), RESET);
}

/// `label: value` line, label padded to a fixed width.
pub fn field<T: fmt::Display>(label: &str, value: T) {
    println!("{}{:<22}{} {}", BOLD, format!("{label}:"), RESET, value);
}
