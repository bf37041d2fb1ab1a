//! Presentation structs handed to the rendering layer.
//!
//! All structs derive `Serialize` so a web front end can take them as JSON.

use crate::colors::HarvestClassColor;
use serde::Serialize;

/// Identifies a displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    StandId,
    HarvestClass,
    SiteQuality,
    Species,
    Age,
    Area,
    CarbonStored,
    CarbonCapturedNextYear,
    Density,
    StandingVolume,
    Growth,
    AvgPrice,
    GrossValue,
    NetValue,
    YearsToMaturity,
}

impl FieldKey {
    /// Norwegian label shown next to the value.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::StandId => "ID",
            FieldKey::HarvestClass => "Hogstklasse",
            FieldKey::SiteQuality => "Bonitet",
            FieldKey::Species => "Treslag",
            FieldKey::Age => "Alder",
            FieldKey::Area => "Areal",
            FieldKey::CarbonStored => "Karbon lagret",
            FieldKey::CarbonCapturedNextYear => "Karbon fangst neste år",
            FieldKey::Density => "Tømmertetthet",
            FieldKey::StandingVolume => "Tømmervolum",
            FieldKey::Growth => "Årlig vekst",
            FieldKey::AvgPrice => "Forv. gj.sn pris per m³",
            FieldKey::GrossValue => "Forv. brutto verdi",
            FieldKey::NetValue => "Forv. netto verdi",
            FieldKey::YearsToMaturity => "År til hogstmoden",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            FieldKey::Age | FieldKey::YearsToMaturity => Some("år"),
            FieldKey::Area => Some("daa"),
            FieldKey::CarbonStored | FieldKey::CarbonCapturedNextYear => Some("tonn"),
            FieldKey::Density => Some("m³/daa"),
            FieldKey::StandingVolume => Some("m³"),
            FieldKey::Growth => Some("%"),
            FieldKey::AvgPrice | FieldKey::GrossValue | FieldKey::NetValue => Some("kr"),
            FieldKey::StandId
            | FieldKey::HarvestClass
            | FieldKey::SiteQuality
            | FieldKey::Species => None,
        }
    }

    /// Decimals for numeric fields; `None` for text fields.
    pub fn fraction_digits(&self) -> Option<u8> {
        match self {
            FieldKey::Density | FieldKey::StandingVolume => Some(1),
            FieldKey::Growth
            | FieldKey::CarbonStored
            | FieldKey::CarbonCapturedNextYear
            | FieldKey::Area => Some(2),
            FieldKey::AvgPrice | FieldKey::GrossValue | FieldKey::NetValue => Some(0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationField {
    pub key: FieldKey,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub value: String,
}

impl PresentationField {
    pub fn new(key: FieldKey, value: String) -> Self {
        Self {
            key,
            label: key.label(),
            unit: key.unit(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Stand,
    Total,
}

/// One table row: a selected stand, or the selection total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationRow {
    pub kind: RowKind,
    pub background: HarvestClassColor,
    pub fields: Vec<PresentationField>,
}

impl PresentationRow {
    pub fn get(&self, key: FieldKey) -> Option<&PresentationField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Formatted value for `key`, if the row has it.
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.get(key).map(|f| f.value.as_str())
    }
}

/// Popup heading for a selection: ids and classes joined by ", ".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionHeader {
    pub stand_ids: String,
    pub harvest_classes: String,
}
