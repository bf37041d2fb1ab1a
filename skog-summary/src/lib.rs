//! Display-ready rows for stand valuation summaries.
//!
//! Turns an [`skog_data::AggregateSummary`] into labelled, unit-annotated
//! string values formatted for a locale (Norwegian by default). Building
//! markup from the rows is left to the caller.

pub mod colors;
pub mod formatter;
pub mod models;

pub use colors::{harvest_class_color, HarvestClassColor};
pub use formatter::{format, format_header, SummaryFormatter};
pub use models::{FieldKey, PresentationField, PresentationRow, RowKind, SelectionHeader};
pub use skog_utils::error::{FormatError, Result};
