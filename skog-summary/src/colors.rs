use serde::Serialize;
use skog_bestand::HarvestClass;

/// Row background for a harvest class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HarvestClassColor {
    Orange,
    Olive,
    Brown,
    Red,
    White,
}

impl HarvestClassColor {
    pub fn hex(&self) -> &'static str {
        match self {
            HarvestClassColor::Orange => "#f2b370",
            HarvestClassColor::Olive => "#aebb7a",
            HarvestClassColor::Brown => "#bc8963",
            HarvestClassColor::Red => "#de6867",
            HarvestClassColor::White => "#ffffff",
        }
    }
}

pub fn harvest_class_color(class: Option<HarvestClass>) -> HarvestClassColor {
    match class.map(|c| c.0) {
        Some(2) => HarvestClassColor::Orange,
        Some(3) => HarvestClassColor::Olive,
        Some(4) => HarvestClassColor::Brown,
        Some(5) => HarvestClassColor::Red,
        _ => HarvestClassColor::White,
    }
}
