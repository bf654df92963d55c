use fti_core::{ProviderConfiguration, YesNo, DEFAULT_CURRENCY_CODE, DEFAULT_FLAG};
use tracing::debug;

const CURRENCY_CODE_LEN: usize = 3;

/// Fills the unit flags and mapped currency of a validated configuration.
///
/// Flags that are not exactly `Y` or `N` become `Y`; a mapped currency that is
/// not exactly three characters becomes `USD`. No validation is performed, so
/// call this only after a passing verdict. Applying it twice changes nothing.
pub fn apply_defaults(config: &mut ProviderConfiguration) {
    default_flag("unitVolumeLiters", &mut config.unit_volume_liters);
    default_flag("unitOdoKm", &mut config.unit_odo_km);
    default_flag("isCellDateType", &mut config.is_cell_date_type);

    let currency_ok = config
        .currency_code_mapped
        .as_deref()
        .is_some_and(|code| code.chars().count() == CURRENCY_CODE_LEN);
    if !currency_ok {
        debug!(
            previous = ?config.currency_code_mapped,
            default = DEFAULT_CURRENCY_CODE,
            "Defaulting currencyCodeMapped"
        );
        config.currency_code_mapped = Some(DEFAULT_CURRENCY_CODE.to_string());
    }
}

fn default_flag(name: &str, flag: &mut Option<String>) {
    if flag.as_deref().is_some_and(|v| v.parse::<YesNo>().is_ok()) {
        return;
    }
    debug!(flag = name, previous = ?flag, default = %DEFAULT_FLAG, "Defaulting flag");
    *flag = Some(DEFAULT_FLAG.as_str().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> ProviderConfiguration {
        ProviderConfiguration::new("WEX", "yyyy-MM-dd")
    }

    #[test]
    fn absent_fields_get_defaults() {
        let mut c = config();
        apply_defaults(&mut c);
        assert_eq!(c.unit_volume_liters.as_deref(), Some("Y"));
        assert_eq!(c.unit_odo_km.as_deref(), Some("Y"));
        assert_eq!(c.is_cell_date_type.as_deref(), Some("Y"));
        assert_eq!(c.currency_code_mapped.as_deref(), Some("USD"));
    }

    #[test]
    fn explicit_no_is_kept() {
        let mut c = config();
        c.unit_volume_liters = Some("N".into());
        c.unit_odo_km = Some("N".into());
        c.is_cell_date_type = Some("N".into());
        apply_defaults(&mut c);
        assert_eq!(c.unit_volume_liters.as_deref(), Some("N"));
        assert_eq!(c.unit_odo_km.as_deref(), Some("N"));
        assert_eq!(c.is_cell_date_type.as_deref(), Some("N"));
    }

    #[test]
    fn malformed_flags_become_yes() {
        let mut c = config();
        c.unit_volume_liters = Some("n".into());
        c.unit_odo_km = Some("No".into());
        c.is_cell_date_type = Some(String::new());
        apply_defaults(&mut c);
        assert_eq!(c.unit_volume_liters.as_deref(), Some("Y"));
        assert_eq!(c.unit_odo_km.as_deref(), Some("Y"));
        assert_eq!(c.is_cell_date_type.as_deref(), Some("Y"));
    }

    #[test]
    fn mistyped_values_from_a_file_get_defaults() {
        let file = fti_core::ProviderConfigurationFile::from_json(
            r#"{
                "providers": [
                    {
                        "Name": "WEX",
                        "dateFormat": "yyyy-MM-dd",
                        "unitVolumeLiters": true,
                        "unitOdoKm": "N",
                        "currencyCodeMapped": 840,
                        "data": { "device": "A" }
                    },
                    { "Name": "Fleetcor", "dateFormat": "yyyy-MM-dd", "data": {} }
                ]
            }"#,
        )
        .unwrap();
        let mut c = file.select("WEX").unwrap();
        apply_defaults(&mut c);
        assert_eq!(c.unit_volume_liters.as_deref(), Some("Y"));
        assert_eq!(c.unit_odo_km.as_deref(), Some("N"));
        assert_eq!(c.is_cell_date_type.as_deref(), Some("Y"));
        assert_eq!(c.currency_code_mapped.as_deref(), Some("USD"));
        assert!(file.select("Fleetcor").is_ok());
    }

    #[test]
    fn three_letter_currency_is_kept() {
        let mut c = config();
        c.currency_code_mapped = Some("CAD".into());
        apply_defaults(&mut c);
        assert_eq!(c.currency_code(), "CAD");
    }

    #[test]
    fn wrong_length_currency_is_overwritten() {
        for code in ["", "EU", "EURO"] {
            let mut c = config();
            c.currency_code_mapped = Some(code.into());
            apply_defaults(&mut c);
            assert_eq!(c.currency_code_mapped.as_deref(), Some("USD"), "{code:?}");
        }
    }

    #[test]
    fn other_fields_are_untouched() {
        let mut c = config();
        c.data.insert("device".into(), serde_json::json!("B"));
        let before = c.clone();
        apply_defaults(&mut c);
        assert_eq!(c.name, before.name);
        assert_eq!(c.date_format, before.date_format);
        assert_eq!(c.data, before.data);
    }

    fn optional_text() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("Y".to_string())),
            Just(Some("N".to_string())),
            "[A-Za-z]{0,5}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn apply_defaults_is_idempotent(
            volume in optional_text(),
            odo in optional_text(),
            cell in optional_text(),
            currency in optional_text(),
        ) {
            let mut c = config();
            c.unit_volume_liters = volume;
            c.unit_odo_km = odo;
            c.is_cell_date_type = cell;
            c.currency_code_mapped = currency;

            apply_defaults(&mut c);
            let once = c.clone();
            apply_defaults(&mut c);
            prop_assert_eq!(c, once);
        }
    }
}
