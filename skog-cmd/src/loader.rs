//! Reading stand datasets and price configuration from disk.

use anyhow::Context;
use flate2::read::GzDecoder;
use log::info;
use skog_bestand::{PriceConfig, StandRecord};
use std::io::Read;
use std::path::Path;

/// Read a whole file as text, gunzipping it when the name ends in `.gz`.
pub fn read_text(path: &str) -> anyhow::Result<String> {
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {}", path))?;
    decode(file, path.ends_with(".gz")).with_context(|| format!("Failed to read {}", path))
}

fn decode<R: Read>(mut reader: R, gzipped: bool) -> std::io::Result<String> {
    let mut text = String::new();
    if gzipped {
        GzDecoder::new(reader).read_to_string(&mut text)?;
    } else {
        reader.read_to_string(&mut text)?;
    }
    Ok(text)
}

/// Whether a dataset path names a JSON export, ignoring a `.gz` suffix.
fn is_json(path: &str) -> bool {
    let name = path.strip_suffix(".gz").unwrap_or(path);
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Parse stand data already read into memory. `json` selects the JSON
/// export format, otherwise CSV.
pub fn parse_stands(text: &str, json: bool) -> anyhow::Result<Vec<StandRecord>> {
    let stands = if json {
        StandRecord::parse_stand_json(text)?
    } else {
        StandRecord::parse_stand_csv(text)?
    };
    Ok(stands)
}

pub fn load_stands(path: &str) -> anyhow::Result<Vec<StandRecord>> {
    let text = read_text(path)?;
    let stands = parse_stands(&text, is_json(path))
        .with_context(|| format!("Failed to parse stand data in {}", path))?;
    info!("Loaded {} stands from {}", stands.len(), path);
    Ok(stands)
}

/// Load a price configuration; no path means every price is unset.
pub fn load_prices(path: Option<&str>) -> anyhow::Result<PriceConfig> {
    match path {
        Some(path) => {
            let text = read_text(path)?;
            PriceConfig::from_json_str(&text)
                .with_context(|| format!("Failed to parse prices in {}", path))
        }
        None => {
            info!("No price configuration given, all prices unset");
            Ok(PriceConfig::default())
        }
    }
}
