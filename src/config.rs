//! File locations used by the dashboard

use std::path::{Path, PathBuf};

pub const INVENTORY_FILE: &str = "inventory.csv";
pub const AUDIT_LOG_FILE: &str = "audit_log.csv";
pub const LOW_STOCK_REPORT_FILE: &str = "low_stock_report.csv";

/// Resolved paths for the inventory, audit log and low stock report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub inventory_path: PathBuf,
    pub audit_path: PathBuf,
    pub report_path: PathBuf,
}

impl Config {
    /// All three files under `data_dir` with their default names
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();
        Self {
            inventory_path: dir.join(INVENTORY_FILE),
            audit_path: dir.join(AUDIT_LOG_FILE),
            report_path: dir.join(LOW_STOCK_REPORT_FILE),
        }
    }

    pub fn with_inventory_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.inventory_path = path;
        }
        self
    }

    pub fn with_audit_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.audit_path = path;
        }
        self
    }

    pub fn with_report_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.report_path = path;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::in_dir(".")
    }
}
