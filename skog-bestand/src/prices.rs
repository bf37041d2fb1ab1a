use crate::coerce::RawValue;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One stored price entry: a JSON number, or the text typed into the
/// price form.
///
/// The entry is kept as received so that a typed `"0"` can be told apart
/// from a numeric `0`. Only the latter switches the price off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(RawValue);

impl Price {
    /// Numeric value, NaN for text without a numeric prefix.
    pub fn value(&self) -> f64 {
        self.0.as_float()
    }

    /// Whether the entry enables the price.
    ///
    /// Numeric zero, NaN and empty text are unset. Any other text is set,
    /// `"0"` included, and prices at its numeric value.
    pub fn is_set(&self) -> bool {
        match &self.0 {
            RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RawValue::Text(t) => !t.is_empty(),
        }
    }

    /// True for an empty form field.
    pub fn is_empty(&self) -> bool {
        matches!(&self.0, RawValue::Text(t) if t.is_empty())
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price(RawValue::Number(value))
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price(RawValue::Text(value.to_string()))
    }
}

/// A user's timber prices and harvesting cost, all in kr per m³.
///
/// Serialized with the field names used by the persisted user document.
/// A field is `None` when it was absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceConfig {
    #[serde(rename = "granSagtommerPrice", default)]
    pub spruce_saw_wood_price: Option<Price>,
    #[serde(rename = "granMassevirkePrice", default)]
    pub spruce_pulp_wood_price: Option<Price>,
    #[serde(rename = "furuSagtommerPrice", default)]
    pub pine_saw_wood_price: Option<Price>,
    #[serde(rename = "furuMassevirkePrice", default)]
    pub pine_pulp_wood_price: Option<Price>,
    #[serde(rename = "lauvSagtommerPrice", default)]
    pub deciduous_saw_wood_price: Option<Price>,
    #[serde(rename = "lauvMassevirkePrice", default)]
    pub deciduous_pulp_wood_price: Option<Price>,
    /// Harvest and haul ("hogst og utkjøring") cost. Net values are only
    /// computed when this is set.
    #[serde(rename = "hogstUtkPrice", default)]
    pub harvest_and_haul_cost: Option<Price>,
}

/// Value of a price entry that is present and set, see [`Price::is_set`].
///
/// NaN from unparsable text still counts, so it shows up in the result
/// instead of silently pricing the stand at zero.
pub fn set_price(price: Option<&Price>) -> Option<f64> {
    price.filter(|p| p.is_set()).map(Price::value)
}

impl PriceConfig {
    pub fn from_json_str(json: &str) -> Result<PriceConfig> {
        Ok(serde_json::from_str(json)?)
    }

    /// The harvest and haul cost, if it enables net value calculation.
    pub fn harvest_and_haul_cost(&self) -> Option<f64> {
        set_price(self.harvest_and_haul_cost.as_ref())
    }

    /// Copy with every missing or empty price stored as `0`, the way the
    /// price form persists a submitted configuration. Other entries are
    /// kept as typed.
    pub fn zero_filled(&self) -> PriceConfig {
        let zero = |price: &Option<Price>| match price {
            Some(p) if !p.is_empty() => Some(p.clone()),
            _ => Some(Price::from(0.0)),
        };
        PriceConfig {
            spruce_saw_wood_price: zero(&self.spruce_saw_wood_price),
            spruce_pulp_wood_price: zero(&self.spruce_pulp_wood_price),
            pine_saw_wood_price: zero(&self.pine_saw_wood_price),
            pine_pulp_wood_price: zero(&self.pine_pulp_wood_price),
            deciduous_saw_wood_price: zero(&self.deciduous_saw_wood_price),
            deciduous_pulp_wood_price: zero(&self.deciduous_pulp_wood_price),
            harvest_and_haul_cost: zero(&self.harvest_and_haul_cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PRICES_JSON;

    fn set(price: &Option<Price>) -> Option<f64> {
        set_price(price.as_ref())
    }

    #[test]
    fn test_parse_fixture_prices() {
        let prices = PriceConfig::from_json_str(PRICES_JSON).unwrap();
        assert_eq!(set(&prices.spruce_saw_wood_price), Some(700.0));
        assert_eq!(set(&prices.spruce_pulp_wood_price), Some(500.0));
        assert_eq!(set(&prices.pine_saw_wood_price), Some(650.0));
        assert_eq!(set(&prices.deciduous_saw_wood_price), None);
        assert_eq!(set(&prices.deciduous_pulp_wood_price), Some(380.0));
        assert_eq!(prices.harvest_and_haul_cost(), Some(180.0));
    }

    #[test]
    fn test_empty_and_missing_fields_are_unset() {
        let prices =
            PriceConfig::from_json_str(r#"{"granSagtommerPrice": "700", "granMassevirkePrice": "", "furuSagtommerPrice": null}"#)
                .unwrap();
        assert_eq!(set(&prices.spruce_saw_wood_price), Some(700.0));
        assert_eq!(prices.spruce_pulp_wood_price, Some(Price::from("")));
        assert_eq!(set(&prices.spruce_pulp_wood_price), None);
        assert_eq!(prices.pine_saw_wood_price, None);
        assert_eq!(prices.harvest_and_haul_cost, None);
        assert_eq!(prices.harvest_and_haul_cost(), None);
    }

    #[test]
    fn test_numeric_zero_haul_cost_disables_net_value() {
        let prices = PriceConfig::from_json_str(r#"{"hogstUtkPrice": 0}"#).unwrap();
        assert_eq!(prices.harvest_and_haul_cost, Some(Price::from(0.0)));
        assert_eq!(prices.harvest_and_haul_cost(), None);
    }

    #[test]
    fn test_typed_zero_is_set() {
        let prices =
            PriceConfig::from_json_str(r#"{"granMassevirkePrice": "0", "hogstUtkPrice": "0"}"#)
                .unwrap();
        assert_eq!(set(&prices.spruce_pulp_wood_price), Some(0.0));
        assert_eq!(prices.harvest_and_haul_cost(), Some(0.0));
    }

    #[test]
    fn test_unparsable_text_is_set_as_nan() {
        let price = Price::from("ukjent");
        assert!(price.is_set());
        assert!(set_price(Some(&price)).unwrap().is_nan());
        assert!(!Price::from(f64::NAN).is_set());
    }

    #[test]
    fn test_zero_filled_keeps_values() {
        let prices = PriceConfig {
            pine_pulp_wood_price: Some(Price::from(410.0)),
            pine_saw_wood_price: Some(Price::from("0")),
            spruce_pulp_wood_price: Some(Price::from("")),
            ..Default::default()
        };
        let filled = prices.zero_filled();
        assert_eq!(filled.pine_pulp_wood_price, Some(Price::from(410.0)));
        assert_eq!(filled.pine_saw_wood_price, Some(Price::from("0")));
        assert_eq!(filled.spruce_pulp_wood_price, Some(Price::from(0.0)));
        assert_eq!(filled.spruce_saw_wood_price, Some(Price::from(0.0)));
        assert_eq!(filled.harvest_and_haul_cost(), None);
        let json = serde_json::to_string(&filled).unwrap();
        assert!(json.contains("\"furuMassevirkePrice\":410.0"));
        assert!(json.contains("\"furuSagtommerPrice\":\"0\""));
        assert!(json.contains("\"hogstUtkPrice\":0.0"));
    }
}
