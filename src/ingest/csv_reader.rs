use crate::models::{CellValue, TabularInput};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use tracing::{info, warn};

/// Reads a campaign export into a `TabularInput`: first record is the
/// header row, everything after it is data. Rows shorter or longer than
/// the header row are accepted as-is; the table pads reads with `Empty`.
pub fn read_table(path: &str) -> Result<TabularInput> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open export file: {}", path))?;
    read_table_from_reader(file)
}

pub fn read_table_from_reader<R: Read>(reader: R) -> Result<TabularInput> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                skipped += 1;
                warn!("Skipping unreadable record at line {}: {}", index + 1, e);
                continue;
            }
        };

        if index == 0 {
            headers = record.iter().map(|h| h.to_string()).collect();
            continue;
        }

        // Blank lines come through as a single empty field.
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        rows.push(record.iter().map(coerce_cell).collect());
    }

    if skipped > 0 {
        warn!("Skipped {} unreadable records", skipped);
    }
    info!(
        "Ingested export: {} headers, {} data rows",
        headers.len(),
        rows.len()
    );

    Ok(TabularInput::new(headers, rows))
}

/// Unambiguous numerics become `Number`; symbol-bearing values such as
/// "$15.50" stay `Text` for the aggregator's looser conversion to handle.
fn coerce_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) => CellValue::Number(n),
        Err(_) => CellValue::Text(raw.to_string()),
    }
}
