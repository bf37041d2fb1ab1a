//! Volume and value totals for the harvest-class map filter.

use crate::price::PriceTable;
use serde::{Deserialize, Serialize};
use skog_bestand::coerce::or_zero;
use skog_bestand::{PriceConfig, StandRecord};

/// Which harvest classes are highlighted on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestFilter {
    pub hk4: bool,
    pub hk5: bool,
}

impl HarvestFilter {
    pub fn includes(&self, stand: &StandRecord) -> bool {
        match stand.harvest_class.map(|class| class.0) {
            Some(4) => self.hk4,
            Some(5) => self.hk5,
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.hk4 || self.hk5
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterTotals {
    pub stand_count: usize,
    /// Standing volume in m³
    pub volume: f64,
    /// Standing volume at today's blended price, kr
    pub estimated_gross_value: f64,
}

/// Sum standing volume and value over every stand the filter includes.
///
/// The value is today's standing volume at the user's own blended price
/// from `prices`, the same price [`crate::resolve_price`] gives. It is not
/// a fixed per-species reference price, so stands whose species prices
/// are unset add volume but no value.
pub fn filter_totals<'a>(
    stands: impl IntoIterator<Item = &'a StandRecord>,
    filter: HarvestFilter,
    prices: &PriceConfig,
) -> FilterTotals {
    let mut totals = FilterTotals::default();
    if !filter.is_active() {
        return totals;
    }
    let table = PriceTable::from(prices);
    for stand in stands.into_iter().filter(|s| filter.includes(s)) {
        let volume = or_zero(stand.volume_no_bark);
        totals.stand_count += 1;
        totals.volume += volume;
        totals.estimated_gross_value += or_zero(volume * table.resolve(stand));
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use skog_bestand::{PRICES_JSON, STANDS_CSV};

    fn stands() -> Vec<StandRecord> {
        StandRecord::parse_stand_csv(STANDS_CSV).unwrap()
    }

    #[test]
    fn test_no_class_selected() {
        let prices = PriceConfig::from_json_str(PRICES_JSON).unwrap();
        let totals = filter_totals(&stands(), HarvestFilter::default(), &prices);
        assert_eq!(totals, FilterTotals::default());
    }

    #[test]
    fn test_hk5_only() {
        let prices = PriceConfig::from_json_str(PRICES_JSON).unwrap();
        let filter = HarvestFilter { hk4: false, hk5: true };
        let totals = filter_totals(&stands(), filter, &prices);
        // 1001 (Gran, 388.0 m³ at 620 kr) and 1005 (Furu, 138.6 m³ at 560 kr)
        assert_eq!(totals.stand_count, 2);
        assert_relative_eq!(totals.volume, 388.0 + 138.6);
        assert_relative_eq!(
            totals.estimated_gross_value,
            388.0 * 620.0 + 138.6 * 560.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_hk4_and_hk5() {
        let prices = PriceConfig::from_json_str(PRICES_JSON).unwrap();
        let filter = HarvestFilter { hk4: true, hk5: true };
        let totals = filter_totals(&stands(), filter, &prices);
        assert_eq!(totals.stand_count, 4);
        // 1006 has an unpriced species and adds volume but no value
        assert_relative_eq!(totals.volume, 388.0 + 151.1 + 138.6 + 125.0, max_relative = 1e-12);
    }

    #[test]
    fn test_value_follows_user_prices() {
        let filter = HarvestFilter { hk4: false, hk5: true };
        let unpriced = filter_totals(&stands(), filter, &PriceConfig::default());
        assert_eq!(unpriced.stand_count, 2);
        assert_relative_eq!(unpriced.volume, 388.0 + 138.6);
        assert_eq!(unpriced.estimated_gross_value, 0.0);
    }
}
