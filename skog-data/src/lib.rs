//! Valuation of selected forest stands.
//!
//! Given stands picked on the map and the user's price configuration,
//! this crate computes per-stand timber volume, carbon and value figures
//! and, in multi-select mode, totals across the selection. Everything here
//! is synchronous and pure: every call recomputes from its inputs.

pub mod aggregate;
pub mod harvest_filter;
pub mod price;
pub mod selection;

pub use aggregate::{aggregate, totals, AggregateSummary, StandRow, Totals};
pub use harvest_filter::{filter_totals, FilterTotals, HarvestFilter};
pub use price::{resolve_price, PriceTable, SpeciesPrices};
pub use selection::{value_selection, Selection, SelectionMode, StandIndex};
