//! One dashboard interaction: load, apply the trigger, recompute, render
//!
//! Nothing is kept between interactions. The table is always read from the
//! inventory file, and after a mutation it is read back again so the view
//! reflects what was persisted.

use crate::analyzer::Kpis;
use crate::error::Result;
use crate::importer;
use crate::models::{AuditEntry, Column, InventoryTable};
use crate::report::{
    category_chart, export_low_stock, format_audit, format_chart, format_low_stock, format_table,
    low_stock_rows, lowest_stock_chart, ChartSpec, LowStockRow,
};
use crate::store::Store;
use crate::updater;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Number of audit entries shown on the dashboard
pub const AUDIT_TAIL_LEN: usize = 10;

/// The user action that triggered this pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    View,
    Import(PathBuf),
    Update { product: String, stock: u64 },
    ExportLowStock,
}

/// Outcome message of an interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Info(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "[ok] {msg}"),
            Notice::Info(msg) => write!(f, "[info] {msg}"),
        }
    }
}

/// Everything the dashboard shows after one interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub notices: Vec<Notice>,
    pub kpis: Kpis,
    pub inventory: InventoryTable,
    pub low_stock: Vec<LowStockRow>,
    pub charts: Vec<ChartSpec>,
    /// Choices for the product selector
    pub products: Vec<String>,
    /// `None` when the audit log is missing or unreadable
    pub audit_tail: Option<Vec<AuditEntry>>,
}

impl DashboardView {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inventory Management Dashboard")?;
        writeln!(f, "==============================")?;

        if !self.notices.is_empty() {
            writeln!(f)?;
            for notice in &self.notices {
                writeln!(f, "{notice}")?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Total Stock Units: {}    Days on Hand (avg): {:.1}    Inventory Turnover: {:.2}",
            self.kpis.total_stock, self.kpis.days_on_hand, self.kpis.turnover
        )?;

        section(f, "Current Inventory")?;
        write!(f, "{}", format_table(&self.inventory))?;

        section(f, "Low Stock Alerts")?;
        if self.low_stock.is_empty() {
            writeln!(f, "All items sufficiently stocked.")?;
        } else {
            writeln!(f, "WARNING: Low stock items detected! (!! critical, ! warning)")?;
            write!(f, "{}", format_low_stock(&self.inventory, &self.low_stock))?;
        }

        section(f, "Stock Analysis")?;
        for (i, chart) in self.charts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", format_chart(chart))?;
        }

        section(f, "Audit Log")?;
        match &self.audit_tail {
            Some(entries) => write!(f, "{}", format_audit(entries)),
            None => writeln!(f, "No audit log yet."),
        }
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.len()))
}

/// Runs interactions against one store
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: Store,
}

impl Dashboard {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Perform `interaction` and build the resulting view
    pub fn run(&self, interaction: Interaction) -> Result<DashboardView> {
        log::debug!("Interaction: {:?}", interaction);
        let mut notices = Vec::new();

        let table = match interaction {
            Interaction::View => self.store.load()?,
            Interaction::Import(path) => {
                importer::import(&self.store, &path)?;
                notices.push(Notice::Success(
                    "Inventory updated from uploaded file.".to_string(),
                ));
                self.store.load()?
            }
            Interaction::Update { product, stock } => {
                let mut table = self.store.load()?;
                // A table the dashboard cannot show must not be changed
                Analysis::of(&table)?;
                updater::update(&self.store, &mut table, &product, stock)?;
                notices.push(Notice::Success(format!(
                    "Stock updated for {product}: {stock} units"
                )));
                self.store.load()?
            }
            Interaction::ExportLowStock => {
                let table = self.store.load()?;
                Analysis::of(&table)?;
                match export_low_stock(&self.store, &table)? {
                    Some(path) => notices.push(Notice::Success(format!(
                        "Low stock report exported ({})",
                        path.display()
                    ))),
                    None => notices.push(Notice::Info(
                        "No low stock items, nothing exported.".to_string(),
                    )),
                }
                table
            }
        };

        self.render(table, notices)
    }

    /// Recent audit entries, or `None` when the log is missing or unreadable
    pub fn audit_tail(&self, limit: usize) -> Option<Vec<AuditEntry>> {
        match self.store.audit_tail(limit) {
            Ok(entries) => Some(entries),
            Err(e) => {
                log::info!("No audit log available: {}", e);
                None
            }
        }
    }

    fn render(&self, table: InventoryTable, notices: Vec<Notice>) -> Result<DashboardView> {
        let Analysis {
            kpis,
            low_stock,
            charts,
            products,
        } = Analysis::of(&table)?;

        Ok(DashboardView {
            notices,
            kpis,
            inventory: table,
            low_stock,
            charts,
            products,
            audit_tail: self.audit_tail(AUDIT_TAIL_LEN),
        })
    }
}

/// The computed parts of a view
struct Analysis {
    kpis: Kpis,
    low_stock: Vec<LowStockRow>,
    charts: Vec<ChartSpec>,
    products: Vec<String>,
}

impl Analysis {
    fn of(table: &InventoryTable) -> Result<Self> {
        let kpis = Kpis::compute(table)?;
        let low_stock = low_stock_rows(table)?;

        let mut charts = Vec::new();
        if let Some(chart) = category_chart(table)? {
            charts.push(chart);
        }
        charts.push(lowest_stock_chart(table)?);

        table.require(Column::Product)?;
        let products = table.products().into_iter().map(str::to_string).collect();

        Ok(Self {
            kpis,
            low_stock,
            charts,
            products,
        })
    }
}
