//! Manual stock corrections with an audit trail

use crate::error::{Error, Result};
use crate::models::{AuditEntry, Column, InventoryTable};
use crate::store::Store;
use serde::Serialize;

/// What a stock update changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub product: String,
    pub old_stock: u64,
    pub new_stock: u64,
    /// Number of rows changed; more than one when the product is duplicated
    pub rows_updated: usize,
}

/// Set the stock of `product`, save the table and append an audit entry.
///
/// The old value is taken from the first matching row, but every row with
/// that product name receives the new value.
pub fn update(
    store: &Store,
    table: &mut InventoryTable,
    product: &str,
    new_stock: u64,
) -> Result<UpdateOutcome> {
    table.require(Column::Product)?;
    table.require(Column::Stock)?;

    let old_stock = table
        .find(product)
        .map(|row| row.stock)
        .ok_or_else(|| Error::ProductNotFound(product.to_string()))?;

    let mut rows_updated = 0;
    for row in table.rows_mut().iter_mut().filter(|r| r.product == product) {
        row.stock = new_stock;
        rows_updated += 1;
    }

    if rows_updated > 1 {
        log::warn!("Product {product} appears {rows_updated} times, all rows updated");
    }

    store.save(table)?;
    store.append_audit(&AuditEntry::update(product, old_stock, new_stock))?;

    log::info!("Stock updated for {product}: {old_stock} -> {new_stock}");
    Ok(UpdateOutcome {
        product: product.to_string(),
        old_stock,
        new_stock,
        rows_updated,
    })
}
