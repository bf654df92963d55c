use serde_json::Value;
use std::io::Read;
use thiserror::Error;
use tracing::debug;

use crate::table::RawRow;
use crate::util::column_letter;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone)]
pub struct CsvTableOptions {
    pub delimiter: String,
    /// Whether the first record holds column titles. Rows are keyed by column
    /// letter when it does and by zero-based index when it does not, which is
    /// what header detection keys off.
    pub has_header: bool,
    /// Drop records whose cells are all blank.
    pub skip_blank_records: bool,
}

impl Default for CsvTableOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            has_header: true,
            skip_blank_records: true,
        }
    }
}

/// Reads delimited text into a raw table.
///
/// Every record, including a header line if the file has one, becomes a row;
/// splitting the header off is left to [`crate::table::detect_header_row`].
/// Ragged records yield rows with fewer keys.
pub fn read_csv_table<R: Read>(
    data: R,
    options: &CsvTableOptions,
) -> Result<Vec<RawRow>, TableError> {
    let delimiter = options.delimiter.as_bytes().first().copied().unwrap_or(b',');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if options.skip_blank_records && record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRow = record
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let key = column_key(idx, options.has_header);
                (key, Value::String(cell.to_string()))
            })
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), "Read CSV table");
    Ok(rows)
}

fn column_key(idx: usize, has_header: bool) -> String {
    if has_header {
        column_letter(idx)
    } else {
        idx.to_string()
    }
}
