//! Delivery record model

use serde::{Deserialize, Serialize};

/// One row of plantation delivery data.
///
/// Text fields carry the trimmed cell content verbatim; `length` in
/// particular is free-form and preserves range formatting like "40-50".
/// `id` is assigned by the store and is `None` until the record is inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Option<i64>,
    pub farm_box: String,
    pub box_type: String,
    pub box_size: String,
    pub mixed: String,
    pub species: String,
    pub product: String,
    pub color: String,
    pub length: String,
    pub price: f64,
    pub boxes: i64,
    pub packing: i64,
    /// Id of the spreadsheet this row was imported from. Stamped from the
    /// import call, never read from sheet content.
    pub spreadsheet_id: String,
}
