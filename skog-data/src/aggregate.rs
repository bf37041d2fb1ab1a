//! Per-stand metrics and selection totals.

use crate::price::PriceTable;
use crate::selection::SelectionMode;
use serde::Serialize;
use skog_bestand::coerce::{or_zero, truncate_or_zero};
use skog_bestand::{HarvestClass, PriceConfig, Species, StandRecord};
use skog_utils::units::{kg_to_tonnes, per_hectare_to_per_decare, sqm_to_decares};

/// Derived figures for one selected stand.
///
/// Values are NaN wherever the underlying stand field was missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandRow {
    pub stand_id: String,
    pub harvest_class: Option<HarvestClass>,
    pub harvest_relevant: bool,
    pub site_quality: String,
    pub species: Option<Species>,
    pub species_label: String,
    pub age: Option<i64>,
    pub years_to_maturity: Option<i64>,
    /// Area in decares
    pub area_daa: f64,
    pub carbon_stored_tonnes: f64,
    pub carbon_captured_next_year_tonnes: f64,
    /// Timber density in m³ per decare
    pub density: f64,
    /// Standing volume in m³
    pub standing_volume: f64,
    /// Annual growth in percent
    pub growth_pct: f64,
    /// Blended price in kr per m³
    pub avg_price: f64,
    /// Expected gross value at maturity, kr
    pub gross_value: f64,
    /// Expected net value at maturity, kr. Only present when a harvest and
    /// haul cost is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_value: Option<f64>,
}

impl StandRow {
    pub fn new(stand: &StandRecord, table: &PriceTable) -> Self {
        let avg_price = table.resolve(stand);
        let gross_value = stand.volume_at_maturity_no_bark * avg_price;
        let net_value = table
            .harvest_and_haul_cost()
            .map(|cost| stand.volume_at_maturity_no_bark * (avg_price - cost));
        Self {
            stand_id: stand.stand_id.clone(),
            harvest_class: stand.harvest_class,
            harvest_relevant: stand.is_harvest_relevant(),
            site_quality: stand.site_quality.clone(),
            species: stand.species,
            species_label: stand.species_label.clone(),
            age: stand.age,
            years_to_maturity: stand.years_to_maturity,
            area_daa: sqm_to_decares(stand.area_sqm),
            carbon_stored_tonnes: kg_to_tonnes(stand.carbon_stored_kg),
            carbon_captured_next_year_tonnes: kg_to_tonnes(stand.carbon_captured_next_year_kg),
            density: per_hectare_to_per_decare(stand.volume_per_hectare_no_bark),
            standing_volume: stand.volume_no_bark,
            growth_pct: stand.volume_growth_factor * 100.0,
            avg_price,
            gross_value,
            net_value,
        }
    }
}

/// Sums across a multi-stand selection.
///
/// Each addend counts as zero when it is NaN, so one broken stand does not
/// blank the whole total. Area and carbon are summed as truncated integers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_area_sqm: i64,
    pub total_carbon_stored_kg: i64,
    pub total_carbon_captured_next_year_kg: i64,
    pub total_standing_volume: f64,
    pub total_gross_value: f64,
    /// Absent, not zero, when no harvest and haul cost is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_net_value: Option<f64>,
    /// Unweighted sum of the per-stand average prices.
    pub avg_price_sum: f64,
}

impl Totals {
    fn empty(net_enabled: bool) -> Self {
        Self {
            total_area_sqm: 0,
            total_carbon_stored_kg: 0,
            total_carbon_captured_next_year_kg: 0,
            total_standing_volume: 0.0,
            total_gross_value: 0.0,
            total_net_value: net_enabled.then_some(0.0),
            avg_price_sum: 0.0,
        }
    }

    fn add(&mut self, stand: &StandRecord, row: &StandRow) {
        self.total_area_sqm += truncate_or_zero(stand.area_sqm);
        self.total_carbon_stored_kg += truncate_or_zero(stand.carbon_stored_kg);
        self.total_carbon_captured_next_year_kg +=
            truncate_or_zero(stand.carbon_captured_next_year_kg);
        self.total_standing_volume += or_zero(row.standing_volume);
        self.avg_price_sum += or_zero(row.avg_price);
        self.total_gross_value += or_zero(row.gross_value);
        if let (Some(total), Some(net)) = (self.total_net_value.as_mut(), row.net_value) {
            *total += or_zero(net);
        }
    }

    pub fn total_area_daa(&self) -> f64 {
        sqm_to_decares(self.total_area_sqm as f64)
    }

    pub fn total_carbon_stored_tonnes(&self) -> f64 {
        kg_to_tonnes(self.total_carbon_stored_kg as f64)
    }

    pub fn total_carbon_captured_next_year_tonnes(&self) -> f64 {
        kg_to_tonnes(self.total_carbon_captured_next_year_kg as f64)
    }
}

/// Result of valuing a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub mode: SelectionMode,
    /// One row per selected stand, in selection order.
    pub rows: Vec<StandRow>,
    /// Present in multi-select mode only, even for a single stand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<Totals>,
}

impl AggregateSummary {
    /// Whether net values were computed for this summary.
    pub fn has_net_value(&self) -> bool {
        self.rows.iter().any(|row| row.net_value.is_some())
    }
}

/// Value every stand in `selection` against `prices`.
pub fn aggregate<'a>(
    selection: impl IntoIterator<Item = &'a StandRecord>,
    prices: &PriceConfig,
    mode: SelectionMode,
) -> AggregateSummary {
    let table = PriceTable::from(prices);
    let mut totals = Totals::empty(table.harvest_and_haul_cost().is_some());
    let mut rows = Vec::new();
    for stand in selection {
        let row = StandRow::new(stand, &table);
        totals.add(stand, &row);
        rows.push(row);
    }
    AggregateSummary {
        mode,
        rows,
        totals: match mode {
            SelectionMode::Multi => Some(totals),
            SelectionMode::Single => None,
        },
    }
}

/// Selection totals on their own. An empty selection gives all zeros.
pub fn totals<'a>(
    selection: impl IntoIterator<Item = &'a StandRecord>,
    prices: &PriceConfig,
) -> Totals {
    let table = PriceTable::from(prices);
    let mut totals = Totals::empty(table.harvest_and_haul_cost().is_some());
    for stand in selection {
        totals.add(stand, &StandRow::new(stand, &table));
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use skog_bestand::stand::RawStandRecord;
    use skog_bestand::Price;

    fn stand(id: &str, species: &str, volume_at_maturity: f64) -> StandRecord {
        let raw = RawStandRecord {
            bestand_id: Some(id.into()),
            hogstkl_verdi: Some("5".into()),
            treslag: Some(species.into()),
            arealm2: Some(1000.0_f64.into()),
            saw_wood_portion: Some(0.5_f64.into()),
            volume_per_hectare_without_bark: Some(200.0_f64.into()),
            volume_without_bark: Some(20.0_f64.into()),
            volume_at_maturity_without_bark: Some(volume_at_maturity.into()),
            volume_growth_factor: Some(0.025_f64.into()),
            carbon_stored: Some(1000.0_f64.into()),
            carbon_captured_next_year: Some(100.0_f64.into()),
            ..Default::default()
        };
        StandRecord::from_raw(&raw).unwrap()
    }

    /// Spruce blends to 100 kr/m³ and pine to 200 kr/m³ at any portion.
    fn flat_prices() -> PriceConfig {
        PriceConfig {
            spruce_saw_wood_price: Some(Price::from(100.0)),
            spruce_pulp_wood_price: Some(Price::from(100.0)),
            pine_saw_wood_price: Some(Price::from(200.0)),
            pine_pulp_wood_price: Some(Price::from(200.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_row_metrics() {
        let stands = [stand("1", "Gran", 40.0)];
        let summary = aggregate(&stands, &flat_prices(), SelectionMode::Single);
        let row = &summary.rows[0];
        assert_relative_eq!(row.density, 20.0);
        assert_relative_eq!(row.standing_volume, 20.0);
        assert_relative_eq!(row.growth_pct, 2.5);
        assert_relative_eq!(row.avg_price, 100.0);
        assert_relative_eq!(row.gross_value, 4000.0);
        assert_relative_eq!(row.area_daa, 1.0);
        assert_relative_eq!(row.carbon_stored_tonnes, 1.0);
        assert_relative_eq!(row.carbon_captured_next_year_tonnes, 0.1);
        assert!(row.harvest_relevant);
        assert_eq!(row.net_value, None);
    }

    #[test]
    fn test_single_mode_has_no_totals() {
        let stands = [stand("1", "Gran", 10.0), stand("2", "Gran", 20.0)];
        let summary = aggregate(&stands, &flat_prices(), SelectionMode::Single);
        assert_eq!(summary.rows.len(), 2);
        assert!(summary.totals.is_none());
    }

    #[test]
    fn test_single_member_multi_selection_has_totals() {
        let stands = [stand("1", "Gran", 10.0)];
        let summary = aggregate(&stands, &flat_prices(), SelectionMode::Multi);
        let totals = summary.totals.unwrap();
        assert_relative_eq!(totals.total_gross_value, 1000.0);
    }

    #[test]
    fn test_total_gross_value() {
        let stands = [
            stand("1", "Gran", 10.0),
            stand("2", "Gran", 20.0),
            stand("3", "Gran", 30.0),
        ];
        let summary = aggregate(&stands, &flat_prices(), SelectionMode::Multi);
        let totals = summary.totals.unwrap();
        assert_relative_eq!(totals.total_gross_value, 6000.0);
        assert_relative_eq!(totals.total_standing_volume, 60.0);
        assert_eq!(totals.total_area_sqm, 3000);
        assert_relative_eq!(totals.total_area_daa(), 3.0);
    }

    #[test]
    fn test_avg_price_total_is_an_unweighted_sum() {
        let stands = [stand("1", "Gran", 10.0), stand("2", "Furu", 10.0)];
        let totals = aggregate(&stands, &flat_prices(), SelectionMode::Multi)
            .totals
            .unwrap();
        // Sum of 100 and 200, not the mean 150
        assert_relative_eq!(totals.avg_price_sum, 300.0);
    }

    #[test]
    fn test_carbon_totals_truncate() {
        let mut a = stand("1", "Gran", 10.0);
        a.carbon_stored_kg = 1999.9;
        a.carbon_captured_next_year_kg = 10.99;
        let mut b = stand("2", "Gran", 10.0);
        b.carbon_stored_kg = 0.9;
        b.carbon_captured_next_year_kg = 5.5;
        let totals = totals(&[a, b], &flat_prices());
        assert_eq!(totals.total_carbon_stored_kg, 1999);
        assert_eq!(totals.total_carbon_captured_next_year_kg, 15);
        assert_relative_eq!(totals.total_carbon_stored_tonnes(), 1.999);
    }

    #[test]
    fn test_net_value_absent_without_haul_cost() {
        let stands = [stand("1", "Gran", 10.0), stand("2", "Furu", 20.0)];
        let summary = aggregate(&stands, &flat_prices(), SelectionMode::Multi);
        assert!(summary.rows.iter().all(|row| row.net_value.is_none()));
        assert_eq!(summary.totals.as_ref().unwrap().total_net_value, None);
        assert!(!summary.has_net_value());

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("net_value"));
    }

    #[test]
    fn test_net_value_with_haul_cost() {
        let mut prices = flat_prices();
        prices.harvest_and_haul_cost = Some(Price::from(40.0));
        let stands = [stand("1", "Gran", 10.0), stand("2", "Furu", 20.0)];
        let summary = aggregate(&stands, &prices, SelectionMode::Multi);
        assert_eq!(summary.rows[0].net_value, Some(10.0 * (100.0 - 40.0)));
        assert_eq!(summary.rows[1].net_value, Some(20.0 * (200.0 - 40.0)));
        assert_eq!(
            summary.totals.unwrap().total_net_value,
            Some(600.0 + 3200.0)
        );
    }

    #[test]
    fn test_typed_zero_haul_cost_still_gives_net_value() {
        let prices = PriceConfig::from_json_str(
            r#"{"granSagtommerPrice": "700", "granMassevirkePrice": "0", "hogstUtkPrice": "0"}"#,
        )
        .unwrap();
        let mut spruce = stand("1", "Gran", 100.0);
        spruce.saw_wood_portion = 0.6;
        let summary = aggregate(&[spruce], &prices, SelectionMode::Multi);
        let row = &summary.rows[0];
        assert_relative_eq!(row.avg_price, 420.0);
        assert_relative_eq!(row.net_value.unwrap(), 42_000.0);
        assert_relative_eq!(summary.totals.unwrap().total_net_value.unwrap(), 42_000.0);
    }

    #[test]
    fn test_nan_stays_on_the_row_but_not_the_total() {
        let mut broken = stand("2", "Gran", 10.0);
        broken.volume_at_maturity_no_bark = f64::NAN;
        broken.area_sqm = f64::NAN;
        let stands = [stand("1", "Gran", 10.0), broken];
        let summary = aggregate(&stands, &flat_prices(), SelectionMode::Multi);
        assert!(summary.rows[1].gross_value.is_nan());
        assert!(summary.rows[1].area_daa.is_nan());
        let totals = summary.totals.unwrap();
        assert_relative_eq!(totals.total_gross_value, 1000.0);
        assert_eq!(totals.total_area_sqm, 1000);
    }

    #[test]
    fn test_empty_selection_totals_are_identity() {
        let empty: [StandRecord; 0] = [];
        let totals = totals(&empty, &flat_prices());
        assert_eq!(totals.total_area_sqm, 0);
        assert_eq!(totals.total_gross_value, 0.0);
        assert_eq!(totals.avg_price_sum, 0.0);
        assert_eq!(totals.total_net_value, None);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let mut prices = flat_prices();
        prices.harvest_and_haul_cost = Some(Price::from(25.0));
        let stands = [stand("1", "Gran", 10.0), stand("2", "Furu", 30.0)];
        let first = aggregate(&stands, &prices, SelectionMode::Multi);
        let second = aggregate(&stands, &prices, SelectionMode::Multi);
        assert_eq!(first, second);
    }
}
