//! One provider import: validate → default → normalize, then typed access to
//! each row through the provider's column mapping.

use fti_core::{
    Coordinate, DataField, FormatMessageCatalog, MessageCatalog, ProviderConfiguration,
    ValidationVerdict,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::defaults::apply_defaults;
use crate::location::parse_location;
use crate::table::{normalize_table, NormalizedTable, RawRow};
use crate::validator::validate_configuration;
use crate::values::{parse_float_value, parse_string, parse_string_value, ValueError};

/// Validates `config` and, when it passes, applies defaults.
///
/// The rejection is the verdict itself; nothing is logged as an error here.
pub fn prepare_provider(
    mut config: ProviderConfiguration,
    messages: &MessageCatalog,
    format_messages: &FormatMessageCatalog,
) -> Result<ProviderConfiguration, ValidationVerdict> {
    let verdict = validate_configuration(&config, messages, format_messages);
    if !verdict.is_valid {
        return Err(verdict);
    }
    apply_defaults(&mut config);
    debug!(provider = config.name.as_deref().unwrap_or_default(), "Provider ready");
    Ok(config)
}

/// A validated provider paired with its normalized table. The configuration
/// is read-only for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct ImportSession {
    config: ProviderConfiguration,
    table: NormalizedTable,
}

impl ImportSession {
    pub fn start(
        config: ProviderConfiguration,
        messages: &MessageCatalog,
        format_messages: &FormatMessageCatalog,
        rows: Vec<RawRow>,
    ) -> Result<Self, ValidationVerdict> {
        let config = prepare_provider(config, messages, format_messages)?;
        let table = normalize_table(rows);
        info!(
            provider = config.name.as_deref().unwrap_or_default(),
            rows = table.rows.len(),
            header = table.header.is_some(),
            "Import session started"
        );
        Ok(ImportSession { config, table })
    }

    pub fn config(&self) -> &ProviderConfiguration {
        &self.config
    }

    pub fn table(&self) -> &NormalizedTable {
        &self.table
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.table.rows.iter().map(|row| RowView {
            config: &self.config,
            row,
        })
    }
}

/// A normalized row read through a provider's column mapping.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    config: &'a ProviderConfiguration,
    row: &'a RawRow,
}

impl<'a> RowView<'a> {
    pub fn new(config: &'a ProviderConfiguration, row: &'a RawRow) -> Self {
        RowView { config, row }
    }

    pub fn cell(&self, field: DataField) -> Option<&'a Value> {
        self.config.cell(self.row, field)
    }

    /// Cleaned text for `field`, at most `max_len` characters. `None` when the
    /// field is unmapped or the cell is missing.
    pub fn text(&self, field: DataField, max_len: usize) -> Result<Option<String>, ValueError> {
        let Some(value) = self.cell(field) else {
            return Ok(None);
        };
        let cleaned = parse_string_value(&parse_string(value, usize::MAX)?);
        parse_string(&Value::String(cleaned), max_len).map(Some)
    }

    /// Numeric value for `field`. Blank and `(null)` cells read as `None`;
    /// anything else must parse.
    pub fn number(&self, field: DataField) -> Result<Option<f64>, ValueError> {
        let Some(value) = self.cell(field) else {
            return Ok(None);
        };
        if let Value::String(s) = value {
            let cleaned = parse_string_value(s);
            if cleaned.is_empty() {
                return Ok(None);
            }
            return parse_float_value(&Value::String(cleaned)).map(Some);
        }
        parse_float_value(value).map(Some)
    }

    /// Position from the two columns named by the `location` mapping, given as
    /// `[longitudeColumn, latitudeColumn]`.
    pub fn location(&self) -> Option<Coordinate> {
        let Value::Array(columns) = self.config.column(DataField::Location)? else {
            return None;
        };
        let pair = columns
            .iter()
            .map(|column| {
                let cell = self.row.get(column.as_str()?)?;
                parse_float_value(cell).ok().map(Value::from)
            })
            .collect::<Option<Vec<Value>>>()?;
        parse_location(&Value::Array(pair))
    }
}
