use crate::coerce::RawValue;
use crate::error::{BestandError, Result};
use crate::species::Species;
use csv::ReaderBuilder;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maturity class ("hogstklasse"), nominally 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarvestClass(pub u8);

impl HarvestClass {
    pub fn from_int(value: i64) -> Option<HarvestClass> {
        u8::try_from(value).ok().map(HarvestClass)
    }

    /// Classes 4 and 5 are harvestable or close to it.
    pub fn is_harvest_relevant(&self) -> bool {
        matches!(self.0, 4 | 5)
    }
}

/// Stand attributes exactly as exported, one optional loosely typed value
/// per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStandRecord {
    #[serde(default)]
    pub bestand_id: Option<RawValue>,
    #[serde(default)]
    pub hogstkl_verdi: Option<RawValue>,
    #[serde(default)]
    pub bonitet: Option<RawValue>,
    #[serde(default)]
    pub treslag: Option<RawValue>,
    #[serde(default)]
    pub alder: Option<RawValue>,
    #[serde(default)]
    pub arealm2: Option<RawValue>,
    #[serde(default)]
    pub saw_wood_portion: Option<RawValue>,
    #[serde(default)]
    pub volume_per_hectare_without_bark: Option<RawValue>,
    #[serde(default)]
    pub volume_without_bark: Option<RawValue>,
    #[serde(default)]
    pub volume_at_maturity_without_bark: Option<RawValue>,
    #[serde(default)]
    pub volume_growth_factor: Option<RawValue>,
    #[serde(default)]
    pub years_to_maturity: Option<RawValue>,
    #[serde(default)]
    pub carbon_stored: Option<RawValue>,
    #[serde(default)]
    pub carbon_captured_next_year: Option<RawValue>,
}

/// A forest stand with typed attributes.
///
/// Float fields are `NaN` when the source value was missing or not
/// numeric; the valuation code lets that propagate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandRecord {
    /// Matches the `teig_best_` property of the map polygon.
    pub stand_id: String,
    pub harvest_class: Option<HarvestClass>,
    /// Site quality ("bonitet") descriptor.
    pub site_quality: String,
    /// `None` when the label is not one of the priced species.
    pub species: Option<Species>,
    /// Species label as exported, kept for display.
    pub species_label: String,
    pub age: Option<i64>,
    /// Area in square meters
    pub area_sqm: f64,
    /// Fraction of the volume that is saw timber, 0 to 1
    pub saw_wood_portion: f64,
    /// m³ per hectare, without bark
    pub volume_per_hectare_no_bark: f64,
    /// m³, without bark
    pub volume_no_bark: f64,
    /// m³ at full maturity, without bark
    pub volume_at_maturity_no_bark: f64,
    /// Annual fractional volume growth
    pub volume_growth_factor: f64,
    pub years_to_maturity: Option<i64>,
    pub carbon_stored_kg: f64,
    pub carbon_captured_next_year_kg: f64,
}

fn float_field(value: &Option<RawValue>) -> f64 {
    value.as_ref().map_or(f64::NAN, RawValue::as_float)
}

fn int_field(value: &Option<RawValue>) -> Option<i64> {
    value.as_ref().and_then(RawValue::as_int)
}

fn text_field(value: &Option<RawValue>) -> String {
    value
        .as_ref()
        .map(|v| v.as_text().trim().to_string())
        .unwrap_or_default()
}

impl StandRecord {
    /// Build a typed record from raw export values.
    ///
    /// This is the only place numeric coercion happens. Returns `None` when
    /// the record has no stand id, since it could never be matched to a
    /// polygon.
    pub fn from_raw(raw: &RawStandRecord) -> Option<StandRecord> {
        let stand_id = text_field(&raw.bestand_id);
        if stand_id.is_empty() {
            return None;
        }
        let species_label = text_field(&raw.treslag);
        Some(StandRecord {
            harvest_class: int_field(&raw.hogstkl_verdi).and_then(HarvestClass::from_int),
            site_quality: text_field(&raw.bonitet),
            species: Species::from_label(&species_label),
            species_label,
            age: int_field(&raw.alder),
            area_sqm: float_field(&raw.arealm2),
            saw_wood_portion: float_field(&raw.saw_wood_portion),
            volume_per_hectare_no_bark: float_field(&raw.volume_per_hectare_without_bark),
            volume_no_bark: float_field(&raw.volume_without_bark),
            volume_at_maturity_no_bark: float_field(&raw.volume_at_maturity_without_bark),
            volume_growth_factor: float_field(&raw.volume_growth_factor),
            years_to_maturity: int_field(&raw.years_to_maturity),
            carbon_stored_kg: float_field(&raw.carbon_stored),
            carbon_captured_next_year_kg: float_field(&raw.carbon_captured_next_year),
            stand_id,
        })
    }

    pub fn is_harvest_relevant(&self) -> bool {
        self.harvest_class
            .is_some_and(|class| class.is_harvest_relevant())
    }

    /// Parse a CSV stand dataset.
    ///
    /// Expected header (order free, extra columns ignored):
    /// `bestand_id,hogstkl_verdi,bonitet,treslag,alder,arealm2,saw_wood_portion,
    /// volume_per_hectare_without_bark,volume_without_bark,volume_at_maturity_without_bark,
    /// volume_growth_factor,years_to_maturity,carbon_stored,carbon_captured_next_year`
    pub fn parse_stand_csv(csv_object: &str) -> Result<Vec<StandRecord>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());

        let columns: HashMap<String, usize> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        if !columns.contains_key("bestand_id") {
            return Err(BestandError::MissingColumn("bestand_id".to_string()));
        }

        let mut stands = Vec::new();
        let mut skipped = 0u32;
        for row in rdr.records() {
            let record = row?;
            let cell = |name: &str| -> Option<RawValue> {
                columns
                    .get(name)
                    .and_then(|&i| record.get(i))
                    .map(RawValue::from)
            };
            let raw = RawStandRecord {
                bestand_id: cell("bestand_id"),
                hogstkl_verdi: cell("hogstkl_verdi"),
                bonitet: cell("bonitet"),
                treslag: cell("treslag"),
                alder: cell("alder"),
                arealm2: cell("arealm2"),
                saw_wood_portion: cell("saw_wood_portion"),
                volume_per_hectare_without_bark: cell("volume_per_hectare_without_bark"),
                volume_without_bark: cell("volume_without_bark"),
                volume_at_maturity_without_bark: cell("volume_at_maturity_without_bark"),
                volume_growth_factor: cell("volume_growth_factor"),
                years_to_maturity: cell("years_to_maturity"),
                carbon_stored: cell("carbon_stored"),
                carbon_captured_next_year: cell("carbon_captured_next_year"),
            };
            match StandRecord::from_raw(&raw) {
                Some(stand) => stands.push(stand),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("Skipped {} stand rows without bestand_id", skipped);
        }
        info!("Parsed {} stands from CSV", stands.len());
        Ok(stands)
    }

    /// Parse a JSON stand export.
    ///
    /// Accepts either a record dump (`{"records": [{"fields": {...}}]}`) or
    /// a bare array of field objects.
    pub fn parse_stand_json(json: &str) -> Result<Vec<StandRecord>> {
        let rows = match serde_json::from_str::<StandExport>(json)? {
            StandExport::Records { records } => records.into_iter().map(|r| r.fields).collect(),
            StandExport::Rows(rows) => rows,
        };
        let total = rows.len();
        let stands: Vec<StandRecord> = rows.iter().filter_map(StandRecord::from_raw).collect();
        if stands.len() < total {
            warn!(
                "Skipped {} stand rows without bestand_id",
                total - stands.len()
            );
        }
        info!("Parsed {} stands from JSON", stands.len());
        Ok(stands)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StandExport {
    Records { records: Vec<ExportRow> },
    Rows(Vec<RawStandRecord>),
}

#[derive(Deserialize)]
struct ExportRow {
    fields: RawStandRecord,
}
