pub mod catalog;
pub mod location;
pub mod provider;
pub mod verdict;

pub use catalog::{FormatMessageCatalog, FormatRule, MessageCatalog, ValidationMessage};
pub use location::Coordinate;
pub use provider::{
    ConfigFileError, DataField, ProviderConfiguration, ProviderConfigurationFile, YesNo,
    DEFAULT_CURRENCY_CODE, DEFAULT_FLAG,
};
pub use verdict::{FormatCheckResult, ValidationVerdict};
