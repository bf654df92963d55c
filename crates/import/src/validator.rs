//! Field-presence validation of a provider configuration.
//!
//! Requirements are checked in a fixed order and the first unmet one decides
//! the verdict. An invalid configuration is reported through
//! [`ValidationVerdict`], never as an error.

use fti_core::{
    DataField, FormatCheckResult, FormatMessageCatalog, MessageCatalog, ProviderConfiguration,
    ValidationMessage, ValidationVerdict,
};
use tracing::warn;

use crate::date_format::check_date_format;
use crate::values::{is_empty, is_empty_str};

/// Checks a `dateFormat` pattern. The grammar check is the production
/// implementation; tests substitute their own.
pub trait DateFormatCheck {
    fn check(&self, pattern: &str, messages: &FormatMessageCatalog) -> FormatCheckResult;
}

pub struct GrammarCheck;

impl DateFormatCheck for GrammarCheck {
    fn check(&self, pattern: &str, messages: &FormatMessageCatalog) -> FormatCheckResult {
        check_date_format(pattern, messages)
    }
}

type Satisfied = fn(&ProviderConfiguration) -> bool;

enum Requirement {
    Present(ValidationMessage, Satisfied),
    /// The date format grammar; its failure reason is nested in the verdict.
    DateFormatGrammar,
}

const REQUIREMENTS: [Requirement; 8] = [
    Requirement::Present(ValidationMessage::ProviderNameRequired, has_name),
    Requirement::Present(ValidationMessage::DateFormatRequired, has_date_format),
    Requirement::Present(ValidationMessage::NoDeviceIdentifier, has_device_identifier),
    Requirement::Present(ValidationMessage::NoDateTime, has_date_time),
    Requirement::DateFormatGrammar,
    Requirement::Present(ValidationMessage::NoVolume, has_volume),
    Requirement::Present(ValidationMessage::NoCost, has_cost),
    Requirement::Present(ValidationMessage::NoCurrency, has_currency),
];

fn has_name(config: &ProviderConfiguration) -> bool {
    !is_empty_str(config.name.as_deref())
}

fn has_date_format(config: &ProviderConfiguration) -> bool {
    !is_empty_str(config.date_format.as_deref())
}

fn has_column(config: &ProviderConfiguration, field: DataField) -> bool {
    !is_empty(config.column(field))
}

/// `device`, or failing that any of the fallback identifiers.
fn has_device_identifier(config: &ProviderConfiguration) -> bool {
    has_column(config, DataField::Device)
        || DataField::DEVICE_FALLBACKS
            .iter()
            .any(|field| has_column(config, *field))
}

fn has_date_time(config: &ProviderConfiguration) -> bool {
    has_column(config, DataField::DateTime)
}

fn has_volume(config: &ProviderConfiguration) -> bool {
    has_column(config, DataField::Volume)
}

fn has_cost(config: &ProviderConfiguration) -> bool {
    has_column(config, DataField::Cost)
}

/// A per-row currency column, or a configuration-level fallback code.
fn has_currency(config: &ProviderConfiguration) -> bool {
    has_column(config, DataField::CurrencyCode)
        || !is_empty_str(config.currency_code_mapped.as_deref())
}

pub fn validate_configuration(
    config: &ProviderConfiguration,
    messages: &MessageCatalog,
    format_messages: &FormatMessageCatalog,
) -> ValidationVerdict {
    validate_configuration_with(config, messages, format_messages, &GrammarCheck)
}

pub fn validate_configuration_with<C: DateFormatCheck>(
    config: &ProviderConfiguration,
    messages: &MessageCatalog,
    format_messages: &FormatMessageCatalog,
    format_check: &C,
) -> ValidationVerdict {
    for requirement in &REQUIREMENTS {
        let reason = match requirement {
            Requirement::Present(message, satisfied) => {
                if satisfied(config) {
                    continue;
                }
                messages.message(*message).to_string()
            }
            Requirement::DateFormatGrammar => {
                let pattern = config.date_format.as_deref().unwrap_or_default();
                let result = format_check.check(pattern, format_messages);
                if result.passed {
                    continue;
                }
                format!(
                    "{} {}",
                    messages.message(ValidationMessage::DateTimeIncorrectFormat),
                    result.problem
                )
            }
        };
        warn!(
            provider = config.name.as_deref().unwrap_or_default(),
            %reason,
            "Provider configuration rejected"
        );
        return ValidationVerdict::invalid(reason);
    }
    ValidationVerdict::valid()
}
