//! JSON-safe report payload.
//!
//! Every map in the payload keeps a meaningful order (rank order for counts,
//! chronological order for week-keyed maps, column order for rows), so maps
//! are modelled as [`OrderedMap`]: a vector of pairs serialized as a JSON
//! object.

use serde::{Serialize, Serializer};

/// Insertion-ordered string-keyed map, serialized as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

/// Label -> count.
pub type CountMap = OrderedMap<u64>;
/// Outer label -> (inner label -> count).
pub type NestedCountMap = OrderedMap<CountMap>;
/// Label -> percentage.
pub type RateMap = OrderedMap<f64>;
/// Column header -> display text.
pub type StringRow = OrderedMap<String>;

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an entry. Keys are expected to be unique.
    pub fn push(&mut self, key: impl Into<String>, value: V) {
        self.0.push((key.into(), value));
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.0.iter().map(|(_, v)| v)
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keeps only the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

impl OrderedMap<u64> {
    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.values().sum()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// One risk level's counts across the week axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskSeries {
    pub name: String,
    /// Aligned positionally with [`WeekRisk::weeks`].
    pub data: Vec<u64>,
}

/// Week x risk contingency table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeekRisk {
    pub weeks: Vec<String>,
    pub series: Vec<RiskSeries>,
}

/// Students flagged in more than one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepeatedStudents {
    pub top_counts: CountMap,
    pub preview_rows: Vec<StringRow>,
}

impl RepeatedStudents {
    /// Returns true if no student repeats.
    pub fn is_empty(&self) -> bool {
        self.top_counts.is_empty()
    }
}

/// The complete analytic summary of one export.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportPayload {
    pub total_records: u64,
    pub unique_students: Option<u64>,
    pub risk_counts: CountMap,
    pub resolved_counts: CountMap,
    pub by_reason: CountMap,
    pub by_module: CountMap,
    pub by_module_attendance: CountMap,
    pub by_week_attendance: CountMap,
    pub by_week_module_all: NestedCountMap,
    pub by_week_module_attendance: NestedCountMap,
    pub weeks: Vec<String>,
    pub modules: Vec<String>,
    pub week_risk: WeekRisk,
    pub resolved_rate: RateMap,
    pub repeated_students: RepeatedStudents,
    pub sample_rows: Vec<StringRow>,
}
