use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Format used for audit timestamps (local time, microsecond precision)
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// The inventory columns the dashboard understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Product,
    Stock,
    ReorderLevel,
    Category,
}

impl Column {
    /// Returns the header name as it appears in the inventory file
    pub fn header(&self) -> &'static str {
        match self {
            Column::Product => "Product",
            Column::Stock => "Stock",
            Column::ReorderLevel => "ReorderLevel",
            Column::Category => "Category",
        }
    }

    /// Parse a header name into a Column. Matching is case-sensitive.
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "Product" => Some(Column::Product),
            "Stock" => Some(Column::Stock),
            "ReorderLevel" => Some(Column::ReorderLevel),
            "Category" => Some(Column::Category),
            _ => None,
        }
    }

    /// Returns all known columns in canonical file order
    pub fn all() -> &'static [Column] {
        &[
            Column::Product,
            Column::Stock,
            Column::ReorderLevel,
            Column::Category,
        ]
    }
}

/// A single product line of the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Stock")]
    pub stock: u64,
    #[serde(rename = "ReorderLevel")]
    pub reorder_level: u64,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    /// Values of columns the dashboard does not interpret, in header order
    #[serde(skip)]
    pub extra: Vec<String>,
}

impl InventoryRow {
    pub fn new(product: &str, stock: u64, reorder_level: u64, category: Option<&str>) -> Self {
        Self {
            product: product.to_string(),
            stock,
            reorder_level,
            category: category.map(str::to_string),
            extra: Vec::new(),
        }
    }

    /// Returns true if stock has fallen below the reorder level
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.reorder_level
    }
}

/// Ordered inventory rows together with the header they were read with.
///
/// Columns missing from the header are not defaulted away: operations that
/// need them call [`InventoryTable::require`] and fail with
/// [`Error::MissingColumn`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryTable {
    headers: Vec<String>,
    rows: Vec<InventoryRow>,
}

impl Default for InventoryTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InventoryTable {
    /// Creates a table with the standard four-column header
    pub fn new(rows: Vec<InventoryRow>) -> Self {
        let headers = Column::all().iter().map(|c| c.header().to_string()).collect();
        Self { headers, rows }
    }

    /// Builds a table from a header row and raw string records.
    ///
    /// Stock and ReorderLevel cells must hold non-negative integers (integral
    /// floats such as `10.0` are accepted). Short records are padded with
    /// empty cells.
    pub fn from_records<I>(headers: Vec<String>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let slots = classify_headers(&headers);
        let mut rows = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let row_num = index + 1;
            let mut row = InventoryRow::new("", 0, 0, None);

            for (i, slot) in slots.iter().enumerate() {
                let raw = record.get(i).map(String::as_str).unwrap_or("");
                match slot {
                    Some(Column::Product) => row.product = raw.to_string(),
                    Some(Column::Stock) => row.stock = parse_count(raw, row_num, Column::Stock)?,
                    Some(Column::ReorderLevel) => {
                        row.reorder_level = parse_count(raw, row_num, Column::ReorderLevel)?
                    }
                    Some(Column::Category) => {
                        let trimmed = raw.trim();
                        row.category = (!trimmed.is_empty()).then(|| trimmed.to_string());
                    }
                    None => row.extra.push(raw.to_string()),
                }
            }

            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Returns a table with the same header but different rows
    pub fn with_rows(&self, rows: Vec<InventoryRow>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [InventoryRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.headers.iter().any(|h| h == column.header())
    }

    /// Fails with [`Error::MissingColumn`] when `column` is not in the header
    pub fn require(&self, column: Column) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(Error::MissingColumn(column.header()))
        }
    }

    /// Product names in table order, as offered for selection
    pub fn products(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.product.as_str()).collect()
    }

    /// First row matching `product`
    pub fn find(&self, product: &str) -> Option<&InventoryRow> {
        self.rows.iter().find(|r| r.product == product)
    }

    /// Product names that occur more than once, in first-seen order
    pub fn duplicate_products(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for row in &self.rows {
            if !seen.insert(row.product.as_str()) && !duplicates.contains(&row.product.as_str()) {
                duplicates.push(row.product.as_str());
            }
        }
        duplicates
    }

    /// Cell values of `row` in header order, for writing back to disk
    pub fn record(&self, row: &InventoryRow) -> Vec<String> {
        let mut extra = row.extra.iter();
        classify_headers(&self.headers)
            .into_iter()
            .map(|slot| match slot {
                Some(Column::Product) => row.product.clone(),
                Some(Column::Stock) => row.stock.to_string(),
                Some(Column::ReorderLevel) => row.reorder_level.to_string(),
                Some(Column::Category) => row.category.clone().unwrap_or_default(),
                None => extra.next().cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// Maps each header position to a known column. Unknown headers, and repeats
/// of a known header, map to `None` and are carried as extra values.
fn classify_headers(headers: &[String]) -> Vec<Option<Column>> {
    let mut seen = Vec::new();
    headers
        .iter()
        .map(|h| match Column::from_header(h) {
            Some(col) if !seen.contains(&col) => {
                seen.push(col);
                Some(col)
            }
            _ => None,
        })
        .collect()
}

fn parse_count(raw: &str, row: usize, column: Column) -> Result<u64> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(Error::InvalidValue {
            row,
            column: column.header(),
            value: raw.to_string(),
        }),
    }
}

/// Kind of change recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Update,
}

impl AuditAction {
    /// Returns the action as written to the audit log
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Update => "UPDATE",
        }
    }
}

/// One line of the audit log: `Time, Action, Product, Old, New`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Action")]
    pub action: AuditAction,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Old")]
    pub old: u64,
    #[serde(rename = "New")]
    pub new: u64,
}

impl AuditEntry {
    /// Creates an UPDATE entry stamped with the current local time
    pub fn update(product: &str, old: u64, new: u64) -> Self {
        Self {
            time: timestamp(),
            action: AuditAction::Update,
            product: product.to_string(),
            old,
            new,
        }
    }
}

/// Current local time in [`TIME_FORMAT`]
pub fn timestamp() -> String {
    chrono::Local::now().format(TIME_FORMAT).to_string()
}
