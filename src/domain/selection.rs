// Variation selection state
use super::variation::{ChartDataset, VariationId};
use serde::Serialize;

/// Ordered set of selected variations. Order drives series order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(Vec<VariationId>);

impl Selection {
    pub fn new(ids: impl IntoIterator<Item = VariationId>) -> Self {
        let mut selected = Vec::new();
        for id in ids {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        Self(selected)
    }

    /// First variation of the dataset, or nothing for an empty dataset.
    pub fn default_for(dataset: &ChartDataset) -> Self {
        Self::new(dataset.variation_ids().take(1))
    }

    /// Add `id` if absent, remove it if present. The last selected variation
    /// cannot be removed.
    pub fn toggle(&mut self, id: VariationId) {
        match self.0.iter().position(|s| s == &id) {
            Some(_) if self.0.len() == 1 => {}
            Some(pos) => {
                self.0.remove(pos);
            }
            None => self.0.push(id),
        }
    }

    pub fn contains(&self, id: &VariationId) -> bool {
        self.0.contains(id)
    }

    pub fn ids(&self) -> &[VariationId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
