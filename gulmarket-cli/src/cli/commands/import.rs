//! Import command handler

use anyhow::Result;
use colored::*;

use crate::api::SheetsClient;
use crate::config::Config;
use crate::services::ingestion;
use crate::storage;

/// Fetch a spreadsheet export and write its delivery rows to the database.
pub async fn handle_import(spreadsheet_id: &str) -> Result<()> {
    let config = Config::load()?;
    let pool = storage::connect(&config.database.resolve_path()?).await?;
    let client = SheetsClient::new(&config.sheets)?;

    let count = ingestion::import_spreadsheet(&pool, &client, spreadsheet_id).await?;

    println!(
        "Imported {} deliveries from spreadsheet {}",
        count.to_string().bright_green().bold(),
        spreadsheet_id.cyan()
    );

    Ok(())
}
