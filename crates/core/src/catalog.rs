//! Display strings supplied by the localisation layer.
//!
//! The engine never carries locale text of its own: every failure points at a
//! catalog slot and the caller decides what that slot says. Missing keys
//! deserialize to empty strings.

use serde::{Deserialize, Serialize};

/// Reasons a provider configuration can be rejected, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMessage {
    ProviderNameRequired,
    DateFormatRequired,
    NoDeviceIdentifier,
    NoDateTime,
    DateTimeIncorrectFormat,
    NoVolume,
    NoCost,
    NoCurrency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageCatalog {
    pub provider_name_required: String,
    pub date_format_required: String,
    pub no_device_identifier: String,
    pub no_date_time: String,
    pub date_time_incorrect_format: String,
    pub no_volume: String,
    pub no_cost: String,
    pub no_currency: String,
}

impl MessageCatalog {
    pub fn english() -> Self {
        MessageCatalog {
            provider_name_required: "A provider name is required.".to_string(),
            date_format_required: "The dateFormat property is required.".to_string(),
            no_device_identifier: "No device identifier has been defined.".to_string(),
            no_date_time: "No date and time column has been defined.".to_string(),
            date_time_incorrect_format: "The date format is not valid. Reason:".to_string(),
            no_volume: "No volume column has been defined.".to_string(),
            no_cost: "No cost column has been defined.".to_string(),
            no_currency: "No currency code column or mapped currency has been defined."
                .to_string(),
        }
    }

    pub fn message(&self, key: ValidationMessage) -> &str {
        match key {
            ValidationMessage::ProviderNameRequired => &self.provider_name_required,
            ValidationMessage::DateFormatRequired => &self.date_format_required,
            ValidationMessage::NoDeviceIdentifier => &self.no_device_identifier,
            ValidationMessage::NoDateTime => &self.no_date_time,
            ValidationMessage::DateTimeIncorrectFormat => &self.date_time_incorrect_format,
            ValidationMessage::NoVolume => &self.no_volume,
            ValidationMessage::NoCost => &self.no_cost,
            ValidationMessage::NoCurrency => &self.no_currency,
        }
    }
}

/// The five date-format grammar rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatRule {
    /// Has `M`, `d` and `yy`.
    RequiredTokens,
    /// Patterns longer than 11 characters carry an hour and a minute.
    TimeTokens,
    /// No letters outside the token alphabet.
    AllowedCharacters,
    MinimumLength,
    MaximumLength,
}

impl FormatRule {
    pub const ALL: [FormatRule; 5] = [
        FormatRule::RequiredTokens,
        FormatRule::TimeTokens,
        FormatRule::AllowedCharacters,
        FormatRule::MinimumLength,
        FormatRule::MaximumLength,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatMessageCatalog {
    pub condition1: String,
    pub condition2: String,
    pub condition3: String,
    pub condition4: String,
    pub condition5: String,
}

impl FormatMessageCatalog {
    pub fn english() -> Self {
        FormatMessageCatalog {
            condition1: "It must contain an upper case M, a lower case d and yy.".to_string(),
            condition2: "It is longer than 11 characters but has no hour (H or h) and minute (m)."
                .to_string(),
            condition3: "It contains letters other than Y, M, D, d, H, h, m, s, S, T, y or Z."
                .to_string(),
            condition4: "It is shorter than 6 characters.".to_string(),
            condition5: "It is longer than 24 characters.".to_string(),
        }
    }

    pub fn message(&self, rule: FormatRule) -> &str {
        match rule {
            FormatRule::RequiredTokens => &self.condition1,
            FormatRule::TimeTokens => &self.condition2,
            FormatRule::AllowedCharacters => &self.condition3,
            FormatRule::MinimumLength => &self.condition4,
            FormatRule::MaximumLength => &self.condition5,
        }
    }
}
