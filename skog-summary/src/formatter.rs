use crate::colors::{harvest_class_color, HarvestClassColor};
use crate::models::{FieldKey, PresentationField, PresentationRow, RowKind, SelectionHeader};
use log::debug;
use skog_data::{AggregateSummary, StandRow, Totals};
use skog_utils::error::Result;
use skog_utils::number::NumberFormatter;

/// Formats valuation summaries for one locale.
#[derive(Debug)]
pub struct SummaryFormatter {
    numbers: NumberFormatter,
}

impl SummaryFormatter {
    pub fn new(locale: &str) -> Result<Self> {
        Ok(Self {
            numbers: NumberFormatter::new(locale)?,
        })
    }

    /// One row per stand, then a total row when the summary has totals.
    pub fn format(&self, summary: &AggregateSummary) -> Vec<PresentationRow> {
        let mut rows: Vec<PresentationRow> =
            summary.rows.iter().map(|row| self.stand_row(row)).collect();
        if let Some(totals) = &summary.totals {
            rows.push(self.total_row(totals));
        }
        debug!(
            "Formatted {} rows for locale {}",
            rows.len(),
            self.numbers.locale()
        );
        rows
    }

    fn number(&self, key: FieldKey, value: f64) -> PresentationField {
        let digits = key.fraction_digits().unwrap_or(0);
        PresentationField::new(key, self.numbers.format(value, digits))
    }

    fn stand_row(&self, row: &StandRow) -> PresentationRow {
        let optional = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
        let mut fields = vec![
            PresentationField::new(FieldKey::StandId, row.stand_id.clone()),
            PresentationField::new(
                FieldKey::HarvestClass,
                optional(row.harvest_class.map(|c| i64::from(c.0))),
            ),
            PresentationField::new(FieldKey::SiteQuality, row.site_quality.clone()),
            PresentationField::new(FieldKey::Species, row.species_label.clone()),
            PresentationField::new(FieldKey::Age, optional(row.age)),
            self.number(FieldKey::Area, row.area_daa),
            self.number(FieldKey::CarbonStored, row.carbon_stored_tonnes),
            self.number(
                FieldKey::CarbonCapturedNextYear,
                row.carbon_captured_next_year_tonnes,
            ),
            self.number(FieldKey::Density, row.density),
            self.number(FieldKey::StandingVolume, row.standing_volume),
            self.number(FieldKey::Growth, row.growth_pct),
            PresentationField::new(FieldKey::YearsToMaturity, optional(row.years_to_maturity)),
            self.number(FieldKey::AvgPrice, row.avg_price),
            self.number(FieldKey::GrossValue, row.gross_value),
        ];
        if let Some(net) = row.net_value {
            fields.push(self.number(FieldKey::NetValue, net));
        }
        PresentationRow {
            kind: RowKind::Stand,
            background: harvest_class_color(row.harvest_class),
            fields,
        }
    }

    fn total_row(&self, totals: &Totals) -> PresentationRow {
        let mut fields = vec![
            PresentationField::new(FieldKey::StandId, "Total".to_string()),
            self.number(FieldKey::Area, totals.total_area_daa()),
            self.number(FieldKey::CarbonStored, totals.total_carbon_stored_tonnes()),
            self.number(
                FieldKey::CarbonCapturedNextYear,
                totals.total_carbon_captured_next_year_tonnes(),
            ),
            self.number(FieldKey::StandingVolume, totals.total_standing_volume),
            self.number(FieldKey::AvgPrice, totals.avg_price_sum),
            self.number(FieldKey::GrossValue, totals.total_gross_value),
        ];
        if let Some(net) = totals.total_net_value {
            fields.push(self.number(FieldKey::NetValue, net));
        }
        PresentationRow {
            kind: RowKind::Total,
            background: HarvestClassColor::White,
            fields,
        }
    }
}

/// Format `summary` for `locale` (e.g. `nb-NO`).
pub fn format(summary: &AggregateSummary, locale: &str) -> Result<Vec<PresentationRow>> {
    Ok(SummaryFormatter::new(locale)?.format(summary))
}

/// Joined ids and classes for the popup heading.
pub fn format_header(summary: &AggregateSummary) -> SelectionHeader {
    let join = |parts: Vec<String>| parts.join(", ");
    SelectionHeader {
        stand_ids: join(summary.rows.iter().map(|r| r.stand_id.clone()).collect()),
        harvest_classes: join(
            summary
                .rows
                .iter()
                .map(|r| r.harvest_class.map(|c| c.0.to_string()).unwrap_or_default())
                .collect(),
        ),
    }
}
