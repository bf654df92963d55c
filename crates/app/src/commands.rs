use anyhow::{Context, Result};
use fti_core::{
    Coordinate, DataField, FormatMessageCatalog, MessageCatalog, ProviderConfigurationFile,
};
use fti_import::{
    check_date_format, validate_configuration, CsvTableOptions, ImportSession, RowView, ValueError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const IDENTIFIER_MAX_LEN: usize = 50;
const VIN_MAX_LEN: usize = 17;
const TEXT_MAX_LEN: usize = 255;
const CURRENCY_MAX_LEN: usize = 3;

#[derive(Debug, Default, clap::Args)]
pub struct CatalogArgs {
    /// JSON file with validation messages (providerNameRequired, noVolume, ...).
    #[arg(long, value_name = "PATH")]
    pub messages: Option<PathBuf>,
    /// JSON file with date format messages (condition1..condition5).
    #[arg(long, value_name = "PATH")]
    pub format_messages: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct TableArgs {
    #[arg(long, default_value = ",")]
    pub delimiter: String,
    /// The export has no title row.
    #[arg(long)]
    pub no_header: bool,
    /// Stop at the first row with an unreadable value instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

impl Default for TableArgs {
    fn default() -> Self {
        TableArgs {
            delimiter: ",".to_string(),
            no_header: false,
            strict: false,
        }
    }
}

fn load_catalog<T: DeserializeOwned>(path: Option<&Path>, fallback: T) -> Result<T> {
    let Some(path) = path else {
        return Ok(fallback);
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading message catalog {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing message catalog {}", path.display()))
}

fn load_catalogs(args: &CatalogArgs) -> Result<(MessageCatalog, FormatMessageCatalog)> {
    let messages = load_catalog(args.messages.as_deref(), MessageCatalog::english())?;
    let formats = load_catalog(
        args.format_messages.as_deref(),
        FormatMessageCatalog::english(),
    )?;
    Ok((messages, formats))
}

fn load_providers(path: &Path) -> Result<ProviderConfigurationFile> {
    fti_import::import::load_providers(path)
        .with_context(|| format!("loading provider configuration {}", path.display()))
}

pub fn list_providers(config: &Path, out: &mut dyn Write) -> Result<bool> {
    let file = load_providers(config)?;
    for name in file.provider_names() {
        writeln!(out, "{name}")?;
    }
    Ok(true)
}

pub fn validate(
    config: &Path,
    provider: &str,
    catalogs: &CatalogArgs,
    out: &mut dyn Write,
) -> Result<bool> {
    let (messages, formats) = load_catalogs(catalogs)?;
    let provider = load_providers(config)?.select(provider)?;
    let verdict = validate_configuration(&provider, &messages, &formats);
    writeln!(out, "{}", serde_json::to_string_pretty(&verdict)?)?;
    Ok(verdict.is_valid)
}

pub fn check_format(
    pattern: &str,
    format_messages: Option<&Path>,
    out: &mut dyn Write,
) -> Result<bool> {
    let formats = load_catalog(format_messages, FormatMessageCatalog::english())?;
    let result = check_date_format(pattern, &formats);
    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    Ok(result.passed)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewRow {
    row: usize,
    device: Option<String>,
    licence_plate: Option<String>,
    serial_number: Option<String>,
    vehicle_identification_number: Option<String>,
    description: Option<String>,
    comments: Option<String>,
    date_time: Option<String>,
    volume: Option<f64>,
    cost: Option<f64>,
    odometer: Option<f64>,
    currency_code: String,
    location: Option<Coordinate>,
}

impl PreviewRow {
    fn read(row: usize, view: &RowView<'_>, default_currency: &str) -> Result<Self, ValueError> {
        let currency_code = view
            .text(DataField::CurrencyCode, CURRENCY_MAX_LEN)?
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| default_currency.to_string());
        Ok(PreviewRow {
            row,
            device: view.text(DataField::Device, IDENTIFIER_MAX_LEN)?,
            licence_plate: view.text(DataField::LicencePlate, IDENTIFIER_MAX_LEN)?,
            serial_number: view.text(DataField::SerialNumber, IDENTIFIER_MAX_LEN)?,
            vehicle_identification_number: view
                .text(DataField::VehicleIdentificationNumber, VIN_MAX_LEN)?,
            description: view.text(DataField::Description, TEXT_MAX_LEN)?,
            comments: view.text(DataField::Comments, TEXT_MAX_LEN)?,
            date_time: view.text(DataField::DateTime, TEXT_MAX_LEN)?,
            volume: view.number(DataField::Volume)?,
            cost: view.number(DataField::Cost)?,
            odometer: view.number(DataField::Odometer)?,
            currency_code,
            location: view.location(),
        })
    }
}

pub fn preview(
    config: &Path,
    provider: &str,
    table: &Path,
    catalogs: &CatalogArgs,
    table_args: &TableArgs,
    out: &mut dyn Write,
) -> Result<bool> {
    let (messages, formats) = load_catalogs(catalogs)?;
    let provider = load_providers(config)?.select(provider)?;

    let options = CsvTableOptions {
        delimiter: table_args.delimiter.clone(),
        has_header: !table_args.no_header,
        ..CsvTableOptions::default()
    };
    let reader = BufReader::new(
        File::open(table).with_context(|| format!("opening {}", table.display()))?,
    );
    let rows = fti_import::import::read_table(reader, &options)
        .with_context(|| format!("reading {}", table.display()))?;

    let session = match ImportSession::start(provider, &messages, &formats, rows) {
        Ok(session) => session,
        Err(verdict) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&verdict)?)?;
            return Ok(false);
        }
    };

    let default_currency = session.config().currency_code().to_string();
    let mut written = 0usize;
    let mut skipped = 0usize;
    for (idx, view) in session.rows().enumerate() {
        let row_number = idx + 1;
        match PreviewRow::read(row_number, &view, &default_currency) {
            Ok(row) => {
                writeln!(out, "{}", serde_json::to_string(&row)?)?;
                written += 1;
            }
            Err(e) if table_args.strict => {
                return Err(e).with_context(|| format!("row {row_number}"));
            }
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping row");
                skipped += 1;
            }
        }
    }

    info!(written, skipped, "Preview complete");
    Ok(skipped == 0)
}
