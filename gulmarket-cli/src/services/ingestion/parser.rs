//! Fixed-position row parsing for delivery sheets
//!
//! The source sheet's layout is a contract: columns are mapped by position,
//! never by header name. Row 0 is always a header and is discarded without
//! looking at it. A single bad price or count cell rejects the whole
//! document, so callers can treat the parse stage as all-or-nothing.

use std::io::Cursor;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx};

use super::models::Delivery;

/// Column layout of the delivery sheet, zero-based.
mod cols {
    pub const FARM_BOX: usize = 0;
    pub const BOX_TYPE: usize = 1;
    pub const BOX_SIZE: usize = 2;
    pub const MIXED: usize = 3;
    pub const SPECIES: usize = 4;
    pub const PRODUCT: usize = 5;
    pub const COLOR: usize = 6;
    pub const LENGTH: usize = 7;
    pub const PRICE: usize = 8;
    pub const BOXES: usize = 9;
    pub const PACKING: usize = 10;
}

/// Parse an xlsx document into delivery records, preserving row order.
///
/// Reads the first worksheet by position. Returns an empty list for a
/// sheet that holds only the header row.
pub fn parse_deliveries(document: &[u8]) -> Result<Vec<Delivery>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(document))
        .context("Failed to open document as a spreadsheet workbook")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Workbook has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut deliveries = Vec::new();
    for (idx, row) in range.rows().enumerate().skip(1) {
        deliveries.push(parse_row(row, idx)?);
    }

    Ok(deliveries)
}

fn parse_row(row: &[Data], idx: usize) -> Result<Delivery> {
    // 1-based, as the row appears in a spreadsheet UI
    let row_number = idx + 1;

    // calamine pads every row to the full range width with empty cells;
    // trim those off so a short row zero-fills its trailing fields instead
    // of failing the numeric coercions below.
    let width = row
        .iter()
        .rposition(|cell| !matches!(cell, Data::Empty))
        .map_or(0, |pos| pos + 1);
    let row = &row[..width];

    let price = match row.get(cols::PRICE) {
        Some(cell) => parse_price(&cell_text(cell))
            .with_context(|| format!("Row {}: invalid price", row_number))?,
        None => 0.0,
    };
    let boxes = match row.get(cols::BOXES) {
        Some(cell) => parse_count(&cell_text(cell))
            .with_context(|| format!("Row {}: invalid box count", row_number))?,
        None => 0,
    };
    let packing = match row.get(cols::PACKING) {
        Some(cell) => parse_count(&cell_text(cell))
            .with_context(|| format!("Row {}: invalid packing count", row_number))?,
        None => 0,
    };

    Ok(Delivery {
        id: None,
        farm_box: text_cell(row, cols::FARM_BOX),
        box_type: text_cell(row, cols::BOX_TYPE),
        box_size: text_cell(row, cols::BOX_SIZE),
        mixed: text_cell(row, cols::MIXED),
        species: text_cell(row, cols::SPECIES),
        product: text_cell(row, cols::PRODUCT),
        color: text_cell(row, cols::COLOR),
        length: text_cell(row, cols::LENGTH),
        price,
        boxes,
        packing,
        spreadsheet_id: String::new(),
    })
}

/// Parse a price cell. Accepts a comma decimal separator, which is how the
/// source sheets format prices.
fn parse_price(text: &str) -> Result<f64> {
    let price: f64 = text
        .replace(',', ".")
        .parse()
        .with_context(|| format!("'{}' is not a number", text))?;

    if !price.is_finite() || price < 0.0 {
        anyhow::bail!("'{}' is not a non-negative price", text);
    }

    Ok(price)
}

fn parse_count(text: &str) -> Result<i64> {
    let count: i64 = text
        .parse()
        .with_context(|| format!("'{}' is not an integer", text))?;

    if count < 0 {
        anyhow::bail!("'{}' is negative", text);
    }

    Ok(count)
}

fn text_cell(row: &[Data], col: usize) -> String {
    row.get(col).map(cell_text).unwrap_or_default()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    const HEADER: &[&str] = &[
        "Farm/Box", "Box type", "Box size", "Mixed", "Species", "Product", "Color", "Length",
        "Price", "Boxes", "Packing",
    ];

    fn data_row() -> Vec<&'static str> {
        vec![
            "FarmA", "Standard", "50cm", "No", "Rose", "Cut Flower", "Red", "40-50", "15,00",
            "10", "1",
        ]
    }

    fn workbook_bytes(rows: &[Vec<&str>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                worksheet.write_string(r as u32, c as u16, *cell).unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn with_header(rows: &[Vec<&'static str>]) -> Vec<Vec<&'static str>> {
        let mut all = vec![HEADER.to_vec()];
        all.extend_from_slice(rows);
        all
    }

    #[test]
    fn test_parses_rows_in_order() {
        let mut second = data_row();
        second[0] = "FarmB";
        let mut third = data_row();
        third[0] = "FarmC";

        let document = workbook_bytes(&with_header(&[data_row(), second, third]));
        let deliveries = parse_deliveries(&document).unwrap();

        assert_eq!(deliveries.len(), 3);
        assert_eq!(deliveries[0].farm_box, "FarmA");
        assert_eq!(deliveries[1].farm_box, "FarmB");
        assert_eq!(deliveries[2].farm_box, "FarmC");
    }

    #[test]
    fn test_maps_all_columns_by_position() {
        let document = workbook_bytes(&with_header(&[data_row()]));
        let delivery = parse_deliveries(&document).unwrap().remove(0);

        assert_eq!(delivery.id, None);
        assert_eq!(delivery.farm_box, "FarmA");
        assert_eq!(delivery.box_type, "Standard");
        assert_eq!(delivery.box_size, "50cm");
        assert_eq!(delivery.mixed, "No");
        assert_eq!(delivery.species, "Rose");
        assert_eq!(delivery.product, "Cut Flower");
        assert_eq!(delivery.color, "Red");
        assert_eq!(delivery.length, "40-50");
        assert_eq!(delivery.price, 15.0);
        assert_eq!(delivery.boxes, 10);
        assert_eq!(delivery.packing, 1);
        assert_eq!(delivery.spreadsheet_id, "");
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let document = workbook_bytes(&with_header(&[]));
        assert!(parse_deliveries(&document).unwrap().is_empty());
    }

    #[test]
    fn test_header_content_is_ignored() {
        // Row 0 is discarded even when it looks nothing like a header
        let mut rows = vec![data_row()];
        rows.push(data_row());
        let document = workbook_bytes(&rows);

        let deliveries = parse_deliveries(&document).unwrap();
        assert_eq!(deliveries.len(), 1);
    }

    #[test]
    fn test_comma_decimal_price() {
        let mut row = data_row();
        row[cols::PRICE] = "12,50";
        let document = workbook_bytes(&with_header(&[row]));

        let deliveries = parse_deliveries(&document).unwrap();
        assert_eq!(deliveries[0].price, 12.50);
    }

    #[test]
    fn test_invalid_price_fails_whole_parse() {
        let mut bad = data_row();
        bad[cols::PRICE] = "abc";

        // Even with a valid row after it, the whole document is rejected
        let document = workbook_bytes(&with_header(&[bad, data_row()]));
        let err = parse_deliveries(&document).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid price"));
    }

    #[test]
    fn test_invalid_count_fails_whole_parse() {
        let mut bad = data_row();
        bad[cols::BOXES] = "ten";
        let document = workbook_bytes(&with_header(&[data_row(), bad]));
        let err = parse_deliveries(&document).unwrap_err();
        assert!(format!("{:#}", err).contains("Row 3"));
        assert!(format!("{:#}", err).contains("invalid box count"));
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let mut negative_price = data_row();
        negative_price[cols::PRICE] = "-1,50";
        let document = workbook_bytes(&with_header(&[negative_price]));
        assert!(parse_deliveries(&document).is_err());

        let mut negative_packing = data_row();
        negative_packing[cols::PACKING] = "-2";
        let document = workbook_bytes(&with_header(&[negative_packing]));
        assert!(parse_deliveries(&document).is_err());
    }

    #[test]
    fn test_short_row_zero_fills_trailing_fields() {
        let row = vec!["FarmA", "Standard", "50cm", "No", "Rose", "Cut Flower", "Red", "40-50"];
        let document = workbook_bytes(&with_header(&[row]));

        let delivery = parse_deliveries(&document).unwrap().remove(0);
        assert_eq!(delivery.length, "40-50");
        assert_eq!(delivery.price, 0.0);
        assert_eq!(delivery.boxes, 0);
        assert_eq!(delivery.packing, 0);
    }

    #[test]
    fn test_empty_cell_inside_populated_row_fails() {
        // A blank price with populated cells after it is a coercion error,
        // not a short row
        let mut row = data_row();
        row[cols::PRICE] = "";
        let document = workbook_bytes(&with_header(&[row]));
        assert!(parse_deliveries(&document).is_err());
    }

    #[test]
    fn test_numeric_cells_coerce_to_text() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (c, cell) in HEADER.iter().enumerate() {
            worksheet.write_string(0, c as u16, *cell).unwrap();
        }
        for (c, cell) in data_row().iter().enumerate() {
            worksheet.write_string(1, c as u16, *cell).unwrap();
        }
        worksheet.write_number(1, cols::BOXES as u16, 10.0).unwrap();
        let document = workbook.save_to_buffer().unwrap();

        let deliveries = parse_deliveries(&document).unwrap();
        assert_eq!(deliveries[0].boxes, 10);
    }

    #[test]
    fn test_cell_whitespace_is_trimmed() {
        let mut row = data_row();
        row[cols::FARM_BOX] = "  FarmA  ";
        row[cols::PRICE] = " 15,00 ";
        let document = workbook_bytes(&with_header(&[row]));

        let delivery = parse_deliveries(&document).unwrap().remove(0);
        assert_eq!(delivery.farm_box, "FarmA");
        assert_eq!(delivery.price, 15.0);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let document = workbook_bytes(&with_header(&[data_row(), data_row()]));
        let first = parse_deliveries(&document).unwrap();
        let second = parse_deliveries(&document).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_garbage_document_is_rejected() {
        let err = parse_deliveries(b"definitely not an xlsx file").unwrap_err();
        assert!(format!("{:#}", err).contains("workbook"));
    }
}
