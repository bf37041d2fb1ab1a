//! Map selection state and stand lookup.

use crate::aggregate::{aggregate, AggregateSummary};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use skog_bestand::{PriceConfig, StandRecord};
use std::collections::HashMap;

/// Whether map clicks replace the selection or add to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Single,
    Multi,
}

/// Stand ids currently highlighted on the map, in click order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    mode: SelectionMode,
    stand_ids: Vec<String>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            stand_ids: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn stand_ids(&self) -> &[String] {
        &self.stand_ids
    }

    pub fn is_empty(&self) -> bool {
        self.stand_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stand_ids.len()
    }

    pub fn contains(&self, stand_id: &str) -> bool {
        self.stand_ids.iter().any(|id| id == stand_id)
    }

    /// Handle a click on the polygon for `stand_id`.
    ///
    /// Clicking a selected stand deselects it in both modes. Otherwise
    /// single mode replaces the selection and multi mode appends.
    pub fn click(&mut self, stand_id: &str) {
        if self.contains(stand_id) {
            self.stand_ids.retain(|id| id != stand_id);
            debug!("Deselected stand {}", stand_id);
            return;
        }
        match self.mode {
            SelectionMode::Single => {
                self.stand_ids.clear();
                self.stand_ids.push(stand_id.to_string());
            }
            SelectionMode::Multi => self.stand_ids.push(stand_id.to_string()),
        }
        debug!("Selected stand {} ({} selected)", stand_id, self.stand_ids.len());
    }

    /// Switch modes. Leaving multi mode keeps only the latest stand.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == SelectionMode::Multi && mode == SelectionMode::Single {
            if let Some(last) = self.stand_ids.pop() {
                self.stand_ids = vec![last];
            }
        }
        self.mode = mode;
    }

    pub fn clear(&mut self) {
        self.stand_ids.clear();
    }
}

/// The bulk-loaded stand dataset, indexed by stand id.
#[derive(Debug, Clone, Default)]
pub struct StandIndex {
    stands: Vec<StandRecord>,
    by_id: HashMap<String, usize>,
}

impl StandIndex {
    /// Index `stands`. A repeated id resolves to its first record.
    pub fn new(stands: Vec<StandRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(stands.len());
        for (i, stand) in stands.iter().enumerate() {
            if by_id.contains_key(&stand.stand_id) {
                warn!("Duplicate stand id {}, keeping the first record", stand.stand_id);
                continue;
            }
            by_id.insert(stand.stand_id.clone(), i);
        }
        Self { stands, by_id }
    }

    pub fn get(&self, stand_id: &str) -> Option<&StandRecord> {
        self.by_id.get(stand_id).map(|&i| &self.stands[i])
    }

    pub fn stands(&self) -> &[StandRecord] {
        &self.stands
    }

    pub fn len(&self) -> usize {
        self.stands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stands.is_empty()
    }

    /// Records for the selected ids, in selection order. Unknown ids are
    /// skipped.
    pub fn resolve(&self, selection: &Selection) -> Vec<&StandRecord> {
        selection
            .stand_ids()
            .iter()
            .filter_map(|id| {
                let stand = self.get(id);
                if stand.is_none() {
                    warn!("Selected stand {} is not in the loaded dataset", id);
                }
                stand
            })
            .collect()
    }
}

/// Value the current selection. `None` when nothing is selected or no
/// selected id is in the index.
pub fn value_selection(
    index: &StandIndex,
    selection: &Selection,
    prices: &PriceConfig,
) -> Option<AggregateSummary> {
    if selection.is_empty() {
        return None;
    }
    let stands = index.resolve(selection);
    if stands.is_empty() {
        debug!("None of {} selected stands are loaded", selection.len());
        return None;
    }
    Some(aggregate(stands, prices, selection.mode()))
}
