use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CURRENCY_CODE: &str = "USD";
pub const DEFAULT_FLAG: YesNo = YesNo::Yes;

/// Semantic transaction fields a provider maps onto its own columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataField {
    Device,
    LicencePlate,
    SerialNumber,
    VehicleIdentificationNumber,
    Description,
    Comments,
    DateTime,
    Volume,
    Cost,
    CurrencyCode,
    Odometer,
    Location,
}

impl DataField {
    /// Fields that can stand in for `device` when resolving the asset.
    pub const DEVICE_FALLBACKS: [DataField; 5] = [
        DataField::LicencePlate,
        DataField::SerialNumber,
        DataField::VehicleIdentificationNumber,
        DataField::Description,
        DataField::Comments,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DataField::Device => "device",
            DataField::LicencePlate => "licencePlate",
            DataField::SerialNumber => "serialNumber",
            DataField::VehicleIdentificationNumber => "vehicleIdentificationNumber",
            DataField::Description => "description",
            DataField::Comments => "comments",
            DataField::DateTime => "dateTime",
            DataField::Volume => "volume",
            DataField::Cost => "cost",
            DataField::CurrencyCode => "currencyCode",
            DataField::Odometer => "odometer",
            DataField::Location => "location",
        }
    }
}

impl fmt::Display for DataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Y",
            YesNo::No => "N",
        }
    }

    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Y" => Ok(YesNo::Yes),
            "N" => Ok(YesNo::No),
            other => Err(format!("Expected 'Y' or 'N', got '{other}'")),
        }
    }
}

/// Import rules for one fuel-card or telematics provider.
///
/// Field names follow the JSON shape of provider configuration files, so
/// `dateFormat`, `currencyCodeMapped` and friends round-trip unchanged. The
/// legacy capitalised `Name` key is accepted on input. Text fields holding a
/// value of another type read as absent, leaving validation and defaulting to
/// deal with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfiguration {
    #[serde(
        alias = "Name",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_format: Option<String>,
    /// Semantic field name → source column reference.
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_code_mapped: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_volume_liters: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_odo_km: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_cell_date_type: Option<String>,
    /// Keys the engine does not interpret (time zone hints, notes, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProviderConfiguration {
    pub fn new(name: &str, date_format: &str) -> Self {
        ProviderConfiguration {
            name: Some(name.to_string()),
            date_format: Some(date_format.to_string()),
            ..Default::default()
        }
    }

    /// Builder-style helper used when assembling configurations in code.
    pub fn with_column(mut self, field: DataField, column: &str) -> Self {
        self.data
            .insert(field.key().to_string(), Value::String(column.to_string()));
        self
    }

    pub fn column(&self, field: DataField) -> Option<&Value> {
        self.data.get(field.key())
    }

    /// Looks up the raw cell a normalized row holds for `field`.
    ///
    /// Column references are usually strings; numeric references are matched
    /// against their decimal rendering.
    pub fn cell<'r>(&self, row: &'r Map<String, Value>, field: DataField) -> Option<&'r Value> {
        match self.column(field)? {
            Value::String(key) => row.get(key),
            Value::Number(n) => row.get(&n.to_string()),
            _ => None,
        }
    }

    pub fn volume_in_liters(&self) -> bool {
        read_flag(self.unit_volume_liters.as_deref()).is_yes()
    }

    pub fn odometer_in_km(&self) -> bool {
        read_flag(self.unit_odo_km.as_deref()).is_yes()
    }

    pub fn cell_date_type(&self) -> bool {
        read_flag(self.is_cell_date_type.as_deref()).is_yes()
    }

    pub fn currency_code(&self) -> &str {
        self.currency_code_mapped
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_CODE)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn read_flag(raw: Option<&str>) -> YesNo {
    raw.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_FLAG)
}

#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Configuration file defines no providers")]
    NoProviders,
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),
}

/// The user-loaded file holding every provider the importer knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfigurationFile {
    #[serde(default)]
    pub providers: Vec<ProviderConfiguration>,
}

impl ProviderConfigurationFile {
    pub fn from_json(content: &str) -> Result<Self, ConfigFileError> {
        let file: Self = serde_json::from_str(content)?;
        file.non_empty()
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        let file: Self = toml::from_str(content)?;
        file.non_empty()
    }

    /// Reads a configuration file, picking the format from its extension.
    /// Anything other than `.toml` is treated as JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Provider names in file order; unnamed entries are skipped.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter_map(|p| p.name.as_deref())
            .collect()
    }

    /// Returns a copy of the first provider whose name matches exactly.
    pub fn select(&self, name: &str) -> Result<ProviderConfiguration, ConfigFileError> {
        self.providers
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| ConfigFileError::ProviderNotFound(name.to_string()))
    }

    fn non_empty(self) -> Result<Self, ConfigFileError> {
        if self.providers.is_empty() {
            return Err(ConfigFileError::NoProviders);
        }
        Ok(self)
    }
}
