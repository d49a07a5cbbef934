//! Replace the inventory with an uploaded CSV or spreadsheet file

use crate::error::{Error, Result};
use crate::models::InventoryTable;
use crate::store::{read_csv_table, Store};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Spreadsheet,
}

impl UploadFormat {
    /// Names ending in `.csv` are CSV; everything else is read as a spreadsheet
    pub fn detect<P: AsRef<Path>>(path: P) -> Self {
        let is_csv = path
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(".csv"))
            .unwrap_or(false);

        if is_csv {
            UploadFormat::Csv
        } else {
            UploadFormat::Spreadsheet
        }
    }
}

/// Parse `path`, replace the stored inventory with it and return the new table.
///
/// No schema validation happens here; absent columns surface later when an
/// operation needs them.
pub fn import<P: AsRef<Path>>(store: &Store, path: P) -> Result<InventoryTable> {
    let path = path.as_ref();
    let format = UploadFormat::detect(path);
    log::info!("Importing {} as {:?}", path.display(), format);

    let table = match format {
        UploadFormat::Csv => read_csv_table(path)?,
        UploadFormat::Spreadsheet => read_spreadsheet_table(path)?,
    };

    let duplicates = table.duplicate_products();
    if !duplicates.is_empty() {
        log::warn!(
            "Imported inventory has duplicate products, updates will change every match: {}",
            duplicates.join(", ")
        );
    }

    store.save(&table)?;
    log::info!("Imported {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Read the first worksheet; its first row is the header
pub fn read_spreadsheet_table<P: AsRef<Path>>(path: P) -> Result<InventoryTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet("workbook has no worksheets".to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => Vec::new(),
    };

    let records: Vec<Vec<String>> = rows
        .filter(|row| !row.iter().all(|c| matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    InventoryTable::from_records(headers, records)
}

/// Text form of a cell. Whole-number floats print without a fraction.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
