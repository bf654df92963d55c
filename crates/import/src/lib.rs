pub mod csv;
pub mod date_format;
pub mod defaults;
pub mod location;
pub mod session;
pub mod table;
pub mod validator;
pub mod values;
pub(crate) mod util;

pub use csv::{CsvTableOptions, TableError};
pub use date_format::{check_date_format, first_failed_rule, rule_holds};
pub use defaults::apply_defaults;
pub use location::parse_location;
pub use session::{prepare_provider, ImportSession, RowView};
pub use table::{align_columns, detect_header_row, normalize_table, NormalizedTable, RawRow};
pub use validator::{validate_configuration, validate_configuration_with, DateFormatCheck, GrammarCheck};
pub use values::{is_empty, is_empty_str, parse_float_value, parse_string, parse_string_value, ValueError};

pub mod import {
    use crate::*;
    use fti_core::{ConfigFileError, ProviderConfigurationFile};
    use std::path::Path;

    pub fn load_providers(path: &Path) -> Result<ProviderConfigurationFile, ConfigFileError> {
        ProviderConfigurationFile::load(path)
    }

    pub fn read_table<R: std::io::Read>(
        data: R,
        options: &CsvTableOptions,
    ) -> Result<Vec<RawRow>, TableError> {
        crate::csv::read_csv_table(data, options)
    }
}
