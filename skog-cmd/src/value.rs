//! Value a stand selection and print the summary table.

use crate::loader::{load_prices, load_stands};
use log::{info, warn};
use skog_data::{value_selection, Selection, SelectionMode, StandIndex};
use skog_summary::{format_header, PresentationField, PresentationRow, RowKind, SummaryFormatter};

/// Build a selection by replaying `clicks` against an empty selection.
pub fn replay_clicks(clicks: &[String], multi: bool) -> Selection {
    let mode = if multi {
        SelectionMode::Multi
    } else {
        SelectionMode::Single
    };
    let mut selection = Selection::new(mode);
    for stand_id in clicks {
        selection.click(stand_id);
    }
    selection
}

fn render_field(field: &PresentationField) -> String {
    match field.unit {
        Some(unit) if !field.value.is_empty() => {
            format!("  {}: {} {}", field.label, field.value, unit)
        }
        _ => format!("  {}: {}", field.label, field.value),
    }
}

/// Plain-text rendering, one block per row.
pub fn render_rows(rows: &[PresentationRow]) -> String {
    let mut lines = Vec::new();
    for row in rows {
        let heading = match row.kind {
            RowKind::Stand => format!("Bestand [{}]", row.background.hex()),
            RowKind::Total => "Totalt".to_string(),
        };
        lines.push(heading);
        lines.extend(row.fields.iter().map(render_field));
    }
    lines.join("\n")
}

pub fn run_value(
    stands_path: &str,
    prices_path: Option<&str>,
    clicks: &[String],
    multi: bool,
    locale: &str,
    json: bool,
) -> anyhow::Result<()> {
    let index = StandIndex::new(load_stands(stands_path)?);
    let prices = load_prices(prices_path)?;
    let selection = replay_clicks(clicks, multi);

    let Some(summary) = value_selection(&index, &selection, &prices) else {
        warn!("No loaded stand matches the selection after {} clicks", clicks.len());
        return Ok(());
    };
    info!(
        "Valued {} of {} selected stands",
        summary.rows.len(),
        selection.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let formatter = SummaryFormatter::new(locale)?;
    let header = format_header(&summary);
    println!("ID: {}", header.stand_ids);
    println!("Hogstklasse: {}", header.harvest_classes);
    println!("{}", render_rows(&formatter.format(&summary)));
    Ok(())
}
