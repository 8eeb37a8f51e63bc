//! Command-line interface definitions

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "gulmarket-cli", version, about = "Import and browse plantation delivery sheets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a published Google Sheet of plantation deliveries into the database
    Import {
        /// Spreadsheet id of the sheet to import (must be publicly exportable)
        spreadsheet_id: String,
    },
    /// List all stored plantation deliveries
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
