// Variation and raw dataset domain models
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier used for every join between variations and daily counts.
///
/// Variations without an explicit id resolve to [`VariationId::CANONICAL`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationId(String);

impl VariationId {
    pub const CANONICAL: &'static str = "0";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Variation {
    pub fn new(id: Option<i64>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn variation_id(&self) -> VariationId {
        match self.id {
            Some(id) => VariationId::new(id.to_string()),
            None => VariationId::new(VariationId::CANONICAL),
        }
    }
}

/// Raw measurements for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub visits: BTreeMap<VariationId, u64>,
    #[serde(default)]
    pub conversions: BTreeMap<VariationId, u64>,
}

impl DataPoint {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            visits: BTreeMap::new(),
            conversions: BTreeMap::new(),
        }
    }

    pub fn with_counts(
        mut self,
        id: impl Into<VariationId>,
        visits: u64,
        conversions: u64,
    ) -> Self {
        let id = id.into();
        self.visits.insert(id.clone(), visits);
        self.conversions.insert(id, conversions);
        self
    }

    /// Visits for a variation; absent entries count as zero.
    pub fn visits_for(&self, id: &VariationId) -> u64 {
        self.visits.get(id).copied().unwrap_or(0)
    }

    /// Conversions for a variation; absent entries count as zero.
    pub fn conversions_for(&self, id: &VariationId) -> u64 {
        self.conversions.get(id).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

impl ChartDataset {
    pub fn new(variations: Vec<Variation>, data: Vec<DataPoint>) -> Self {
        Self { variations, data }
    }

    pub fn variation_ids(&self) -> impl Iterator<Item = VariationId> + '_ {
        self.variations.iter().map(Variation::variation_id)
    }

    /// Position and record of a variation in declaration order.
    pub fn find_variation(&self, id: &VariationId) -> Option<(usize, &Variation)> {
        self.variations
            .iter()
            .enumerate()
            .find(|(_, v)| &v.variation_id() == id)
    }

    pub fn display_name(&self, id: &VariationId) -> String {
        self.find_variation(id)
            .map(|(_, v)| v.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn point_on(&self, date: NaiveDate) -> Option<&DataPoint> {
        self.data.iter().find(|p| p.date == date)
    }
}
