use log::debug;
use serde::{Deserialize, Serialize};

/// Tree species ("treslag") that carry their own timber prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    /// Gran
    Spruce,
    /// Furu
    Pine,
    /// Bjørk / lauv
    Deciduous,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Spruce, Species::Pine, Species::Deciduous];

    /// Map an inventory label to a species.
    ///
    /// Matching is case-insensitive on the trimmed label. Unknown labels
    /// return `None`. A label that differs from the export spelling is
    /// logged at debug level.
    pub fn from_label(label: &str) -> Option<Species> {
        let species = match label.trim().to_lowercase().as_str() {
            "gran" => Species::Spruce,
            "furu" => Species::Pine,
            "bjørk / lauv" | "bjørk/lauv" | "lauv" | "lau" | "bjørk" => Species::Deciduous,
            _ => return None,
        };
        if label != species.label() {
            debug!("Species label '{}' read as '{}'", label, species.label());
        }
        Some(species)
    }

    /// Label as it appears in the inventory exports.
    pub fn label(&self) -> &'static str {
        match self {
            Species::Spruce => "Gran",
            Species::Pine => "Furu",
            Species::Deciduous => "Bjørk / lauv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Species;

    #[test]
    fn test_from_label() {
        assert_eq!(Species::from_label("Gran"), Some(Species::Spruce));
        assert_eq!(Species::from_label(" FURU "), Some(Species::Pine));
        assert_eq!(Species::from_label("Bjørk / lauv"), Some(Species::Deciduous));
        assert_eq!(Species::from_label("Granskog"), None);
        assert_eq!(Species::from_label(""), None);
    }

    #[test]
    fn test_non_export_spellings() {
        assert_eq!(Species::from_label("gran"), Some(Species::Spruce));
        assert_eq!(Species::from_label("Lauv"), Some(Species::Deciduous));
        assert_eq!(Species::from_label("bjørk/lauv"), Some(Species::Deciduous));
    }

    #[test]
    fn test_label_round_trips() {
        for species in Species::ALL {
            assert_eq!(Species::from_label(species.label()), Some(species));
        }
    }
}
