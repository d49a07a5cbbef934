//! Text rendering, low stock highlighting, chart data and report export

use crate::analyzer::{checked_sum, low_stock, stock_by_category, top_n_lowest};
use crate::error::Result;
use crate::models::{AuditEntry, Column, InventoryRow, InventoryTable};
use crate::store::Store;
use serde::Serialize;
use std::path::PathBuf;

/// Stock below this is critical regardless of the reorder level
pub const CRITICAL_STOCK: u64 = 5;

/// Number of products in the lowest stock chart
pub const LOWEST_STOCK_CHART_SIZE: usize = 5;

/// Width of the longest bar in text charts
const BAR_WIDTH: usize = 40;

/// How urgently a low stock row needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    /// `None` for rows that are not low on stock
    pub fn classify(row: &InventoryRow) -> Option<Self> {
        if !row.is_low_stock() {
            None
        } else if row.stock < CRITICAL_STOCK {
            Some(Severity::Critical)
        } else {
            Some(Severity::Warning)
        }
    }

    /// Marker appended to the Stock cell in text output
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Critical => "!!",
            Severity::Warning => "!",
        }
    }
}

/// A low stock row with its severity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockRow {
    #[serde(flatten)]
    pub row: InventoryRow,
    pub severity: Severity,
}

/// Low stock rows of `table` in table order, each with its severity
pub fn low_stock_rows(table: &InventoryTable) -> Result<Vec<LowStockRow>> {
    Ok(low_stock(table)?
        .into_iter()
        .filter_map(|row| Severity::classify(&row).map(|severity| LowStockRow { row, severity }))
        .collect())
}

/// Write the current low stock rows to the report file.
///
/// Returns `None` without touching the file when nothing is low on stock.
pub fn export_low_stock(store: &Store, table: &InventoryTable) -> Result<Option<PathBuf>> {
    let rows = low_stock(table)?;
    if rows.is_empty() {
        log::info!("No low stock rows, report not written");
        return Ok(None);
    }
    store.write_report(&table.with_rows(rows)).map(Some)
}

/// One slice of a proportion chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    pub percent: f64,
}

/// One bar of a magnitude chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// Chart data, independent of how it is drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Proportion { title: String, slices: Vec<Slice> },
    Magnitude { title: String, bars: Vec<Bar> },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Proportion { title, .. } | ChartSpec::Magnitude { title, .. } => title,
        }
    }
}

/// Stock distribution by category, `None` when there is no Category column
pub fn category_chart(table: &InventoryTable) -> Result<Option<ChartSpec>> {
    let Some(totals) = stock_by_category(table)? else {
        return Ok(None);
    };

    let total = checked_sum(totals.iter().map(|(_, stock)| *stock), Column::Stock)?;
    let slices = totals
        .into_iter()
        .map(|(label, value)| {
            let percent = if total == 0 {
                0.0
            } else {
                (value as f64 * 1000.0 / total as f64).round() / 10.0
            };
            Slice {
                label,
                value,
                percent,
            }
        })
        .collect();

    Ok(Some(ChartSpec::Proportion {
        title: "Stock Distribution by Category".to_string(),
        slices,
    }))
}

/// The products with the least stock
pub fn lowest_stock_chart(table: &InventoryTable) -> Result<ChartSpec> {
    let bars = top_n_lowest(table, LOWEST_STOCK_CHART_SIZE)?
        .into_iter()
        .map(|row| Bar {
            label: row.product,
            value: row.stock,
        })
        .collect();

    Ok(ChartSpec::Magnitude {
        title: format!("Top {LOWEST_STOCK_CHART_SIZE} Low Stock Items"),
        bars,
    })
}

/// The whole table as aligned text columns
pub fn format_table(table: &InventoryTable) -> String {
    let rows = table.rows().iter().map(|r| table.record(r)).collect();
    format_grid(table.headers(), rows)
}

/// Low stock rows as aligned text, with the Stock cell marked by severity
pub fn format_low_stock(table: &InventoryTable, rows: &[LowStockRow]) -> String {
    let stock_index = table.headers().iter().position(|h| h == "Stock");
    let cells = rows
        .iter()
        .map(|low| {
            let mut record = table.record(&low.row);
            if let Some(i) = stock_index {
                record[i] = format!("{} {}", record[i], low.severity.marker());
            }
            record
        })
        .collect();
    format_grid(table.headers(), cells)
}

/// A chart drawn with horizontal bars scaled to the largest value
pub fn format_chart(chart: &ChartSpec) -> String {
    let entries: Vec<(String, u64, String)> = match chart {
        ChartSpec::Proportion { slices, .. } => slices
            .iter()
            .map(|s| (s.label.clone(), s.value, format!("{:.1}%", s.percent)))
            .collect(),
        ChartSpec::Magnitude { bars, .. } => bars
            .iter()
            .map(|b| (b.label.clone(), b.value, b.value.to_string()))
            .collect(),
    };

    let mut output = format!("{}\n", chart.title());
    if entries.is_empty() {
        output.push_str("  (no data)\n");
        return output;
    }

    let max_label = entries.iter().map(|(l, _, _)| l.chars().count()).max().unwrap_or(0);
    let max_value = entries.iter().map(|(_, v, _)| *v).max().unwrap_or(0);

    for (label, value, caption) in &entries {
        let len = if max_value == 0 {
            0
        } else {
            (*value as f64 / max_value as f64 * BAR_WIDTH as f64).round() as usize
        };
        output.push_str(&format!(
            "  {label:<max_label$} | {} {caption}\n",
            "#".repeat(len)
        ));
    }

    output
}

/// Audit entries under the `Time, Action, Product, Old, New` header
pub fn format_audit(entries: &[AuditEntry]) -> String {
    let headers: Vec<String> = ["Time", "Action", "Product", "Old", "New"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.time.clone(),
                e.action.as_str().to_string(),
                e.product.clone(),
                e.old.to_string(),
                e.new.to_string(),
            ]
        })
        .collect();
    format_grid(&headers, rows)
}

fn format_grid(headers: &[String], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();
    output.push_str(&format_line(headers, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&format_line(&rule, &widths));
    for row in &rows {
        output.push_str(&format_line(row, &widths));
    }
    output
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
