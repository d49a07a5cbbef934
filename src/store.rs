//! Flat-file storage for the inventory table, audit log and low stock report
//!
//! Every save is a full overwrite of the target file; there is no locking and
//! no backup. The audit log is append-only and has no header row.

use crate::config::Config;
use crate::error::Result;
use crate::models::{AuditEntry, InventoryTable};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Owns the paths of the files backing the dashboard
#[derive(Debug, Clone)]
pub struct Store {
    config: Config,
}

impl Store {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn inventory_path(&self) -> &Path {
        &self.config.inventory_path
    }

    pub fn audit_path(&self) -> &Path {
        &self.config.audit_path
    }

    pub fn report_path(&self) -> &Path {
        &self.config.report_path
    }

    /// Read the inventory file. Missing or malformed files are an error.
    pub fn load(&self) -> Result<InventoryTable> {
        let table = read_csv_table(&self.config.inventory_path)?;
        log::debug!(
            "Loaded {} rows from {}",
            table.len(),
            self.config.inventory_path.display()
        );
        Ok(table)
    }

    /// Overwrite the inventory file with the full table
    pub fn save(&self, table: &InventoryTable) -> Result<()> {
        write_csv_table(&self.config.inventory_path, table)?;
        log::info!(
            "Saved {} rows to {}",
            table.len(),
            self.config.inventory_path.display()
        );
        Ok(())
    }

    /// Append one entry to the audit log, creating the file if needed
    pub fn append_audit(&self, entry: &AuditEntry) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.audit_path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(entry)?;
        writer.flush()?;

        log::info!(
            "Audit: {:?} {} {} -> {}",
            entry.action,
            entry.product,
            entry.old,
            entry.new
        );
        Ok(())
    }

    /// Read the whole audit log, oldest first
    pub fn read_audit(&self) -> Result<Vec<AuditEntry>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_path(&self.config.audit_path)?;

        let mut entries = Vec::new();
        for result in rdr.deserialize() {
            let entry: AuditEntry = result?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `n` audit entries, oldest first
    pub fn audit_tail(&self, n: usize) -> Result<Vec<AuditEntry>> {
        let mut entries = self.read_audit()?;
        let start = entries.len().saturating_sub(n);
        Ok(entries.split_off(start))
    }

    /// Overwrite the low stock report with `table`. Returns the report path.
    pub fn write_report(&self, table: &InventoryTable) -> Result<PathBuf> {
        write_csv_table(&self.config.report_path, table)?;
        log::info!(
            "Exported {} low stock rows to {}",
            table.len(),
            self.config.report_path.display()
        );
        Ok(self.config.report_path.clone())
    }
}

/// Parse a headed CSV file into an inventory table
pub fn read_csv_table<P: AsRef<Path>>(path: P) -> Result<InventoryTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }

    InventoryTable::from_records(headers, records)
}

fn write_csv_table(path: &Path, table: &InventoryTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(table.record(row))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
