//! KPI computation and low stock detection
//!
//! All functions work on the in-memory table and fail with
//! [`Error::MissingColumn`] when a column they read is absent.

use crate::error::{Error, Result};
use crate::models::{Column, InventoryRow, InventoryTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder fill rate. Not derived from data.
pub const FILL_RATE: f64 = 0.95;

/// Headline numbers shown at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_stock: u64,
    pub fill_rate: f64,
    pub days_on_hand: f64,
    pub turnover: f64,
}

impl Kpis {
    pub fn compute(table: &InventoryTable) -> Result<Self> {
        Ok(Self {
            total_stock: total_stock(table)?,
            fill_rate: FILL_RATE,
            days_on_hand: days_on_hand(table)?,
            turnover: turnover(table)?,
        })
    }
}

/// Sum of Stock over all rows
pub fn total_stock(table: &InventoryTable) -> Result<u64> {
    table.require(Column::Stock)?;
    checked_sum(table.rows().iter().map(|r| r.stock), Column::Stock)
}

/// Mean ReorderLevel, NaN for an empty table
pub fn avg_reorder(table: &InventoryTable) -> Result<f64> {
    table.require(Column::ReorderLevel)?;
    if table.is_empty() {
        return Ok(f64::NAN);
    }
    Ok(reorder_sum(table)? as f64 / table.len() as f64)
}

/// `total_stock / (avg_reorder + 1)` rounded to one decimal.
///
/// The `+ 1` keeps the denominator non-zero. An empty table's undefined mean
/// counts as 0.
pub fn days_on_hand(table: &InventoryTable) -> Result<f64> {
    let total = total_stock(table)? as f64;
    let avg = avg_reorder(table)?;
    let avg = if avg.is_nan() { 0.0 } else { avg };
    Ok(round_to(total / (avg + 1.0), 1))
}

/// `total_stock / sum(ReorderLevel)` rounded to two decimals.
///
/// Fails with [`Error::DivideByZero`] when every ReorderLevel is 0.
pub fn turnover(table: &InventoryTable) -> Result<f64> {
    let total = total_stock(table)? as f64;
    table.require(Column::ReorderLevel)?;
    let sum = reorder_sum(table)?;
    if sum == 0 {
        return Err(Error::DivideByZero("turnover"));
    }
    Ok(round_to(total / sum as f64, 2))
}

/// Rows whose Stock is strictly below their ReorderLevel, in table order
pub fn low_stock(table: &InventoryTable) -> Result<Vec<InventoryRow>> {
    table.require(Column::Stock)?;
    table.require(Column::ReorderLevel)?;
    Ok(table
        .rows()
        .iter()
        .filter(|r| r.is_low_stock())
        .cloned()
        .collect())
}

/// The `n` rows with the smallest Stock; ties keep table order
pub fn top_n_lowest(table: &InventoryTable, n: usize) -> Result<Vec<InventoryRow>> {
    table.require(Column::Product)?;
    table.require(Column::Stock)?;
    let mut rows = table.rows().to_vec();
    rows.sort_by_key(|r| r.stock);
    rows.truncate(n);
    Ok(rows)
}

/// Stock summed per category, ordered by category name.
///
/// Returns `None` when the table has no Category column. Rows without a
/// category are left out.
pub fn stock_by_category(table: &InventoryTable) -> Result<Option<Vec<(String, u64)>>> {
    if !table.has_column(Column::Category) {
        return Ok(None);
    }
    table.require(Column::Stock)?;

    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in table.rows() {
        if let Some(category) = row.category.as_deref() {
            let total = totals.entry(category).or_insert(0);
            *total = total
                .checked_add(row.stock)
                .ok_or(Error::Overflow(Column::Stock.header()))?;
        }
    }

    Ok(Some(
        totals
            .into_iter()
            .map(|(category, stock)| (category.to_string(), stock))
            .collect(),
    ))
}

fn reorder_sum(table: &InventoryTable) -> Result<u64> {
    checked_sum(
        table.rows().iter().map(|r| r.reorder_level),
        Column::ReorderLevel,
    )
}

/// Sum that fails with [`Error::Overflow`] instead of wrapping
pub(crate) fn checked_sum<I>(values: I, column: Column) -> Result<u64>
where
    I: IntoIterator<Item = u64>,
{
    values
        .into_iter()
        .try_fold(0u64, |acc, v| acc.checked_add(v))
        .ok_or(Error::Overflow(column.header()))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
