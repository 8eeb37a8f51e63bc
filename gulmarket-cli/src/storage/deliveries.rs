//! Deliveries repository

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::services::ingestion::Delivery;

/// Insert one delivery and return its store-assigned id.
pub async fn insert_delivery(pool: &SqlitePool, delivery: &Delivery) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO deliveries (
            farm_box, box_type, box_size, mixed, species, product,
            color, length, price, boxes, packing, spreadsheet_id
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&delivery.farm_box)
    .bind(&delivery.box_type)
    .bind(&delivery.box_size)
    .bind(&delivery.mixed)
    .bind(&delivery.species)
    .bind(&delivery.product)
    .bind(&delivery.color)
    .bind(&delivery.length)
    .bind(delivery.price)
    .bind(delivery.boxes)
    .bind(delivery.packing)
    .bind(&delivery.spreadsheet_id)
    .fetch_one(pool)
    .await
    .context("Failed to insert delivery")?;

    Ok(id)
}

/// Fetch every stored delivery, ordered by id.
pub async fn list_deliveries(pool: &SqlitePool) -> Result<Vec<Delivery>> {
    let rows = sqlx::query(
        r#"
        SELECT id, farm_box, box_type, box_size, mixed, species, product,
               color, length, price, boxes, packing, spreadsheet_id
        FROM deliveries
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to list deliveries")?;

    let mut deliveries = Vec::new();
    for row in rows {
        deliveries.push(Delivery {
            id: Some(row.try_get("id")?),
            farm_box: row.try_get("farm_box")?,
            box_type: row.try_get("box_type")?,
            box_size: row.try_get("box_size")?,
            mixed: row.try_get("mixed")?,
            species: row.try_get("species")?,
            product: row.try_get("product")?,
            color: row.try_get("color")?,
            length: row.try_get("length")?,
            price: row.try_get("price")?,
            boxes: row.try_get("boxes")?,
            packing: row.try_get("packing")?,
            spreadsheet_id: row.try_get("spreadsheet_id")?,
        });
    }

    Ok(deliveries)
}
