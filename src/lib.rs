//! Stock Dashboard - inventory KPIs, low stock alerts and audited updates
//!
//! The inventory lives in a flat CSV file. Every interaction reloads it,
//! applies an optional import, update or export, recomputes the KPIs and
//! renders the dashboard.

pub mod analyzer;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod importer;
pub mod models;
pub mod report;
pub mod store;
pub mod updater;

// Re-export commonly used items
pub use analyzer::{Kpis, FILL_RATE};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardView, Interaction, Notice};
pub use error::{Error, Result};
pub use models::{AuditAction, AuditEntry, Column, InventoryRow, InventoryTable};
pub use report::{ChartSpec, Severity};
pub use store::Store;
pub use updater::UpdateOutcome;
