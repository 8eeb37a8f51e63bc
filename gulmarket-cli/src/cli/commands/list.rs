//! List command handler

use anyhow::{Context, Result};
use colored::*;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::services::ingestion::Delivery;
use crate::storage;

/// Print every stored delivery, either as a table or as JSON.
pub async fn handle_list(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let pool = storage::connect(&config.database.resolve_path()?).await?;

    let deliveries = storage::deliveries::list_deliveries(&pool).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&deliveries)
                .context("Failed to serialize deliveries")?;
            println!("{}", json);
        }
        OutputFormat::Table => print_table(&deliveries),
    }

    Ok(())
}

fn print_table(deliveries: &[Delivery]) {
    if deliveries.is_empty() {
        println!("{}", "No deliveries stored".dimmed());
        return;
    }

    println!(
        "{:>6}  {:<20} {:<12} {:<8} {:<6} {:<14} {:<14} {:<10} {:<8} {:>9} {:>6} {:>8}  {}",
        "id".bold(),
        "farm/box".bold(),
        "box type".bold(),
        "size".bold(),
        "mixed".bold(),
        "species".bold(),
        "product".bold(),
        "color".bold(),
        "length".bold(),
        "price".bold(),
        "boxes".bold(),
        "packing".bold(),
        "spreadsheet".bold(),
    );

    for d in deliveries {
        println!(
            "{:>6}  {:<20} {:<12} {:<8} {:<6} {:<14} {:<14} {:<10} {:<8} {:>9.2} {:>6} {:>8}  {}",
            d.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            d.farm_box,
            d.box_type,
            d.box_size,
            d.mixed,
            d.species,
            d.product,
            d.color,
            d.length,
            d.price,
            d.boxes,
            d.packing,
            d.spreadsheet_id.dimmed(),
        );
    }

    println!();
    println!("{} deliveries", deliveries.len().to_string().bright_green());
}
