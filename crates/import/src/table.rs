//! Row-shape normalization for tables handed over by the spreadsheet reader.
//!
//! Rows are ordered key → cell maps. Both operations here work in place on the
//! caller's container; copy first if the original shape is still needed.

use serde_json::{Map, Value};
use tracing::debug;

pub type RawRow = Map<String, Value>;

/// Removes and returns the first row when it looks like a header.
///
/// A row is a header when none of its keys reads as a numeric index
/// (`"0"`, `" 12"`, `"-3"`, `"7b"`). Otherwise the table is left untouched.
pub fn detect_header_row(rows: &mut Vec<RawRow>) -> Option<RawRow> {
    let first = rows.first()?;
    if first.keys().any(|key| is_index_like(key)) {
        debug!("First row is keyed by column index; no header row");
        return None;
    }
    debug!(columns = first.len(), "Detected header row");
    Some(rows.remove(0))
}

fn is_index_like(key: &str) -> bool {
    let unsigned = key
        .trim_start()
        .strip_prefix(['+', '-'])
        .unwrap_or_else(|| key.trim_start());
    unsigned.starts_with(|c: char| c.is_ascii_digit())
}

/// Gives every row the first row's key set, in the first row's order.
///
/// Missing cells are filled with an empty string. Cells under keys the first
/// row lacks are dropped, so every row ends up with the same keys. Returns the
/// number of cells filled.
pub fn align_columns(rows: &mut [RawRow]) -> usize {
    let Some(first) = rows.first() else {
        return 0;
    };
    let canonical: Vec<String> = first.keys().cloned().collect();

    let mut filled = 0;
    let mut dropped = 0;
    for row in rows.iter_mut().skip(1) {
        if row.len() == canonical.len() && row.keys().eq(canonical.iter()) {
            continue;
        }
        let mut source = std::mem::take(row);
        for key in &canonical {
            let value = source.remove(key).unwrap_or_else(|| {
                filled += 1;
                Value::String(String::new())
            });
            row.insert(key.clone(), value);
        }
        dropped += source.len();
    }

    if filled > 0 {
        debug!(filled, columns = canonical.len(), "Backfilled missing cells");
    }
    if dropped > 0 {
        debug!(dropped, "Dropped cells outside the canonical columns");
    }
    filled
}

/// A table ready for column-based extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub header: Option<RawRow>,
    pub rows: Vec<RawRow>,
}

impl NormalizedTable {
    /// Canonical column keys, taken from the header when there is one.
    pub fn columns(&self) -> Vec<&str> {
        self.header
            .as_ref()
            .or_else(|| self.rows.first())
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Display label for a column key, read from the header row.
    pub fn label(&self, column: &str) -> Option<&str> {
        self.header.as_ref()?.get(column)?.as_str()
    }
}

/// Aligns columns and then splits off the header row.
///
/// Alignment runs first so the header, which normally spans every column,
/// supplies the canonical key set.
pub fn normalize_table(mut rows: Vec<RawRow>) -> NormalizedTable {
    align_columns(&mut rows);
    let header = detect_header_row(&mut rows);
    NormalizedTable { header, rows }
}
