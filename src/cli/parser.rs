use crate::export::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for clockify-timesheet
/// CLI application turning Clockify time entries into a monthly timesheet
#[derive(Parser)]
#[command(
    name = "clockify-timesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a monthly timesheet (xlsx, csv or Google Sheets) from Clockify time entries",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or multiple accounts)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file with default values
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration (secrets masked)")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration for missing or invalid fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Generate the monthly timesheet
    Generate {
        #[arg(long, help = "Year (default: current year in the configured timezone)")]
        year: Option<i32>,

        #[arg(
            long,
            value_name = "MONTH",
            help = "Month as 1-12 or YYYY-MM (default: current month)"
        )]
        month: Option<String>,

        #[arg(long, value_enum, help = "Output format (default: from config)")]
        format: Option<OutputFormat>,

        #[arg(long = "output-dir", value_name = "DIR", help = "Directory for xlsx/csv output")]
        output_dir: Option<PathBuf>,

        #[arg(long, short = 'd', help = "Include the description column")]
        description: bool,

        #[arg(long, value_name = "ZONE", help = "IANA timezone overriding the config")]
        tz: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing output file without asking")]
        force: bool,
    },

    /// List the workspaces visible to the API key
    Workspaces,

    /// Show the current user (or look one up by email) and its ids
    User {
        #[arg(long, value_name = "EMAIL", help = "Look up a workspace member by email")]
        email: Option<String>,
    },
}
