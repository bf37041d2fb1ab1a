//! Shared utility functions for skog crates.

/// Area, volume density and mass conversions used in forestry reporting.
pub mod units {
    /// Square meters per decare (daa), the usual Norwegian forestry unit.
    pub const SQM_PER_DECARE: f64 = 1000.0;

    /// Square meters per hectare.
    pub const SQM_PER_HECTARE: f64 = 10_000.0;

    /// Decares per hectare
    pub const DECARES_PER_HECTARE: f64 = 10.0;

    pub const KG_PER_TONNE: f64 = 1000.0;

    pub fn sqm_to_decares(sqm: f64) -> f64 {
        sqm / SQM_PER_DECARE
    }

    pub fn sqm_to_hectares(sqm: f64) -> f64 {
        sqm / SQM_PER_HECTARE
    }

    /// Convert a per-hectare quantity (e.g. m³/ha) to per decare.
    pub fn per_hectare_to_per_decare(value: f64) -> f64 {
        value / DECARES_PER_HECTARE
    }

    pub fn kg_to_tonnes(kg: f64) -> f64 {
        kg / KG_PER_TONNE
    }

}

/// Locale-aware fixed-decimal formatting.
pub mod number {
    use crate::error::{FormatError, Result};
    use fixed_decimal::{FixedDecimal, FloatPrecision};
    use icu::decimal::FixedDecimalFormatter;
    use icu::locid::Locale;

    /// Locale used when none is given: Norwegian Bokmål.
    pub const DEFAULT_LOCALE: &str = "nb-NO";

    /// Formats numbers with a locale's grouping and decimal separators.
    ///
    /// Construction loads locale data, so build one per locale and reuse it.
    pub struct NumberFormatter {
        locale: String,
        formatter: FixedDecimalFormatter,
    }

    impl std::fmt::Debug for NumberFormatter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("NumberFormatter")
                .field("locale", &self.locale)
                .finish()
        }
    }

    impl NumberFormatter {
        /// Create a formatter for a BCP 47 tag such as `nb-NO` or `en-US`.
        pub fn new(locale: &str) -> Result<Self> {
            let parsed: Locale = locale
                .parse()
                .map_err(|e| FormatError::InvalidLocale(locale.to_string(), format!("{}", e)))?;
            let formatter = FixedDecimalFormatter::try_new(&(&parsed).into(), Default::default())
                .map_err(|e| FormatError::LocaleData(locale.to_string(), format!("{}", e)))?;
            Ok(Self {
                locale: locale.to_string(),
                formatter,
            })
        }

        pub fn locale(&self) -> &str {
            &self.locale
        }

        /// Format `value` with exactly `fraction_digits` decimals.
        ///
        /// Rounds half away from zero. NaN renders as `NaN` and infinities
        /// as `∞`, so unknown values stay visible.
        pub fn format(&self, value: f64, fraction_digits: u8) -> String {
            if value.is_nan() {
                return "NaN".to_string();
            }
            if value.is_infinite() {
                return if value < 0.0 { "-∞" } else { "∞" }.to_string();
            }
            let position = -i16::from(fraction_digits);
            match FixedDecimal::try_from_f64(value, FloatPrecision::Floating) {
                Ok(mut decimal) => {
                    decimal.half_expand(position);
                    decimal.pad_end(position);
                    self.formatter.format_to_string(&decimal)
                }
                Err(e) => {
                    log::warn!("Could not convert {} to a decimal: {}", value, e);
                    "NaN".to_string()
                }
            }
        }
    }

    /// One-off formatting of `value` for `locale`.
    pub fn format_number(value: f64, locale: &str, fraction_digits: u8) -> Result<String> {
        Ok(NumberFormatter::new(locale)?.format(value, fraction_digits))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        const NBSP: char = '\u{a0}';

        #[test]
        fn test_norwegian_grouping_and_decimal_comma() {
            let formatted = format_number(1234.5, DEFAULT_LOCALE, 1).unwrap();
            assert_eq!(formatted, format!("1{}234,5", NBSP));
        }

        #[test]
        fn test_fraction_digits_are_fixed() {
            let nb = NumberFormatter::new("nb-NO").unwrap();
            assert_eq!(nb.format(12.5, 2), "12,50");
            assert_eq!(nb.format(620.0, 0), "620");
            assert_eq!(nb.format(6000.0, 0), format!("6{}000", NBSP));
            assert_eq!(nb.format(2.345, 2), "2,35");
            assert_eq!(nb.format(0.0, 1), "0,0");
        }

        #[test]
        fn test_rounds_half_away_from_zero() {
            let nb = NumberFormatter::new("nb-NO").unwrap();
            assert_eq!(nb.format(0.5, 0), "1");
            assert_eq!(nb.format(2.5, 0), "3");
        }

        #[test]
        fn test_negative_values_use_minus_sign() {
            let formatted = format_number(-1234.5, DEFAULT_LOCALE, 1).unwrap();
            assert_eq!(formatted, format!("\u{2212}1{}234,5", NBSP));
            let nb = NumberFormatter::new("nb-NO").unwrap();
            // Net value when the haul cost exceeds the price
            assert_eq!(nb.format(-2500.5, 0), format!("\u{2212}2{}501", NBSP));
        }

        #[test]
        fn test_other_locale() {
            let en = NumberFormatter::new("en-US").unwrap();
            assert_eq!(en.format(1234.5, 1), "1,234.5");
        }

        #[test]
        fn test_non_finite_values() {
            let nb = NumberFormatter::new("nb-NO").unwrap();
            assert_eq!(nb.format(f64::NAN, 2), "NaN");
            assert_eq!(nb.format(f64::INFINITY, 0), "∞");
        }

        #[test]
        fn test_invalid_locale() {
            let result = NumberFormatter::new("not a locale");
            assert!(matches!(result, Err(FormatError::InvalidLocale(_, _))));
        }
    }
}

/// Error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum FormatError {
        /// The locale tag could not be parsed
        #[error("Invalid locale '{0}': {1}")]
        InvalidLocale(String, String),

        /// No formatting data for the locale
        #[error("No number format data for locale '{0}': {1}")]
        LocaleData(String, String),
    }

    pub type Result<T> = std::result::Result<T, FormatError>;
}
