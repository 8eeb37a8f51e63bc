use anyhow::Result;
use clap::Parser;

mod api;
mod cli;
mod config;
mod services;
mod storage;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { spreadsheet_id } => {
            cli::commands::import::handle_import(&spreadsheet_id).await
        }
        Commands::List { format } => cli::commands::list::handle_list(format).await,
    }
}
