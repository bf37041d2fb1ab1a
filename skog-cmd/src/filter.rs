//! Harvest-class filter totals.

use crate::loader::{load_prices, load_stands};
use log::{info, warn};
use skog_data::{filter_totals, FilterTotals, HarvestFilter};
use skog_utils::number::NumberFormatter;

pub fn render_totals(totals: &FilterTotals, numbers: &NumberFormatter) -> String {
    format!(
        "Bestand: {}\nVolum: {} m³\nEstimert verdi: {} kr",
        totals.stand_count,
        numbers.format(totals.volume, 1),
        numbers.format(totals.estimated_gross_value, 0)
    )
}

pub fn run_filter(
    stands_path: &str,
    prices_path: Option<&str>,
    hk4: bool,
    hk5: bool,
    locale: &str,
) -> anyhow::Result<()> {
    let filter = HarvestFilter { hk4, hk5 };
    if !filter.is_active() {
        warn!("No harvest class selected, pass --hk4 and/or --hk5");
    }
    let stands = load_stands(stands_path)?;
    let prices = load_prices(prices_path)?;
    let numbers = NumberFormatter::new(locale)?;

    let totals = filter_totals(&stands, filter, &prices);
    info!(
        "Filter matched {} of {} stands",
        totals.stand_count,
        stands.len()
    );
    println!("{}", render_totals(&totals, &numbers));
    Ok(())
}
