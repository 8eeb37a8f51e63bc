//! Spreadsheet ingestion pipeline
//!
//! Composes the export fetch, the fixed-position row parse and the
//! per-record insert for one spreadsheet. Fetch and parse failures abort
//! with nothing persisted; the insert loop is best-effort and keeps
//! whatever was already written.

pub mod models;
pub mod parser;

pub use models::Delivery;
pub use parser::parse_deliveries;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::api::SheetsClient;
use crate::storage::deliveries::insert_delivery;

/// Import one spreadsheet: fetch its xlsx export, parse every delivery row
/// and insert the records in row order. Returns the number of records
/// written.
pub async fn import_spreadsheet(
    pool: &SqlitePool,
    client: &SheetsClient,
    spreadsheet_id: &str,
) -> Result<usize> {
    let document = client.fetch_export(spreadsheet_id).await?;

    let mut deliveries = parse_deliveries(&document)
        .with_context(|| format!("Failed to parse spreadsheet {}", spreadsheet_id))?;

    log::info!(
        "parsed {} delivery rows from spreadsheet {}",
        deliveries.len(),
        spreadsheet_id
    );

    // The correlation key comes from the import call, never from sheet content.
    for delivery in &mut deliveries {
        delivery.spreadsheet_id = spreadsheet_id.to_string();
    }

    persist_deliveries(pool, &deliveries).await
}

/// Insert records one at a time, in order. Not transactional: when an
/// insert fails, records already written stay in the store and the
/// remainder is not attempted.
pub async fn persist_deliveries(pool: &SqlitePool, deliveries: &[Delivery]) -> Result<usize> {
    for (i, delivery) in deliveries.iter().enumerate() {
        let id = insert_delivery(pool, delivery).await.with_context(|| {
            format!("Failed to insert delivery {} of {}", i + 1, deliveries.len())
        })?;
        log::debug!("inserted delivery id={}", id);
    }

    Ok(deliveries.len())
}
