//! Blended timber price per m³ for a stand.

use log::warn;
use serde::Serialize;
use skog_bestand::prices::set_price;
use skog_bestand::{PriceConfig, Species, StandRecord};

/// Saw timber and pulpwood prices for one species. `None` where the
/// entry is not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpeciesPrices {
    pub saw: Option<f64>,
    pub pulp: Option<f64>,
}

impl SpeciesPrices {
    /// Average price for a volume split `saw_wood_portion` / rest.
    ///
    /// Both prices must be set; if either is unset the whole blend is
    /// zero. A missing term is never defaulted on its own.
    pub fn blend(&self, saw_wood_portion: f64) -> f64 {
        match (self.saw, self.pulp) {
            (Some(saw), Some(pulp)) => saw_wood_portion * saw + (1.0 - saw_wood_portion) * pulp,
            _ => 0.0,
        }
    }
}

/// Species-keyed view of a [`PriceConfig`], built once per valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    spruce: SpeciesPrices,
    pine: SpeciesPrices,
    deciduous: SpeciesPrices,
    harvest_and_haul_cost: Option<f64>,
}

impl From<&PriceConfig> for PriceTable {
    fn from(prices: &PriceConfig) -> Self {
        Self {
            spruce: SpeciesPrices {
                saw: set_price(prices.spruce_saw_wood_price.as_ref()),
                pulp: set_price(prices.spruce_pulp_wood_price.as_ref()),
            },
            pine: SpeciesPrices {
                saw: set_price(prices.pine_saw_wood_price.as_ref()),
                pulp: set_price(prices.pine_pulp_wood_price.as_ref()),
            },
            deciduous: SpeciesPrices {
                saw: set_price(prices.deciduous_saw_wood_price.as_ref()),
                pulp: set_price(prices.deciduous_pulp_wood_price.as_ref()),
            },
            harvest_and_haul_cost: prices.harvest_and_haul_cost(),
        }
    }
}

impl PriceTable {
    pub fn get(&self, species: Species) -> SpeciesPrices {
        match species {
            Species::Spruce => self.spruce,
            Species::Pine => self.pine,
            Species::Deciduous => self.deciduous,
        }
    }

    /// Cost per m³ if net values should be computed.
    pub fn harvest_and_haul_cost(&self) -> Option<f64> {
        self.harvest_and_haul_cost
    }

    /// Blended price per m³ for `stand`; zero for unknown species.
    pub fn resolve(&self, stand: &StandRecord) -> f64 {
        match stand.species {
            Some(species) => self.get(species).blend(stand.saw_wood_portion),
            None => {
                warn!(
                    "Stand {} has unpriced species '{}', using price 0",
                    stand.stand_id, stand.species_label
                );
                0.0
            }
        }
    }
}

/// Blended price per m³ for a single stand.
pub fn resolve_price(stand: &StandRecord, prices: &PriceConfig) -> f64 {
    PriceTable::from(prices).resolve(stand)
}
