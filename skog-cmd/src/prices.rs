//! Price form submit: normalise a price configuration for storage.

use crate::loader::load_prices;
use anyhow::Context;
use log::info;
use skog_bestand::PriceConfig;

pub fn normalise(prices: &PriceConfig) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&prices.zero_filled())?)
}

pub fn run_prices(input: &str, output: Option<&str>) -> anyhow::Result<()> {
    let prices = load_prices(Some(input))?;
    let json = normalise(&prices)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path))?;
            info!("Normalised prices written to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skog_bestand::{Price, PRICES_JSON};

    #[test]
    fn test_normalise_fills_unset_prices() {
        let prices = PriceConfig::from_json_str(PRICES_JSON).unwrap();
        let json = normalise(&prices).unwrap();
        let stored = PriceConfig::from_json_str(&json).unwrap();
        assert_eq!(stored.deciduous_saw_wood_price, Some(Price::from(0.0)));
        assert_eq!(stored.spruce_saw_wood_price, Some(Price::from("700")));
        assert_eq!(stored.harvest_and_haul_cost(), Some(180.0));
    }
}
