//! Core types for forest stand ("bestand") valuation.
//!
//! Stand records arrive from an external inventory export (CSV or a JSON
//! record dump) with loosely typed fields. Everything numeric passes
//! through [`coerce`] exactly once, in [`stand::StandRecord::from_raw`], so
//! a malformed value shows up as `NaN` on the typed record instead of
//! being scattered through the valuation code.

pub mod coerce;
pub mod error;
pub mod prices;
pub mod species;
pub mod stand;

pub use error::{BestandError, Result};
pub use prices::{Price, PriceConfig};
pub use species::Species;
pub use stand::{HarvestClass, RawStandRecord, StandRecord};

/// Embedded sample stand dataset, used by tests and the CLI demo.
pub static STANDS_CSV: &str = include_str!("../../fixtures/bestand.csv");

/// Embedded sample price configuration.
pub static PRICES_JSON: &str = include_str!("../../fixtures/prices.json");
