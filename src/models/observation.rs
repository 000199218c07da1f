use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of an observation CSV as hosted in the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub station_id: String,
    pub metric: String,
    pub value: f64,
}

/// A matched row tagged with the whole-file metric totals of its source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedObservation {
    pub station_id: String,
    pub value: f64,
    pub global_sum: f64,
    pub global_count: u64,
}

/// Outcome of streaming a single observation file.
///
/// `global_sum` and `global_count` cover every row in the file that matched
/// the metric, regardless of which stations were requested. A file with no
/// matched rows is a legitimate empty aggregate, not an error.
#[derive(Debug, Clone, Default)]
pub struct FileAggregate {
    pub matched: Vec<ObservationRow>,
    pub global_sum: f64,
    pub global_count: u64,
}

impl FileAggregate {
    /// Replicate the file totals onto every matched row.
    pub fn into_tagged(self) -> Vec<TaggedObservation> {
        let (global_sum, global_count) = (self.global_sum, self.global_count);
        self.matched
            .into_iter()
            .map(|row| TaggedObservation {
                station_id: row.station_id,
                value: row.value,
                global_sum,
                global_count,
            })
            .collect()
    }
}

/// Concatenation of the tagged rows from every queried file.
#[derive(Debug, Clone, Default)]
pub struct CombinedTable {
    pub rows: Vec<TaggedObservation>,
}

impl CombinedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn absorb(&mut self, aggregate: FileAggregate) {
        self.rows.extend(aggregate.into_tagged());
    }
}

/// Which stations a query targets. `All` matches every station id.
#[derive(Debug, Clone)]
pub enum StationSelector {
    All,
    Subset(HashSet<String>),
}

impl StationSelector {
    pub fn from_ids(ids: Option<Vec<String>>) -> Self {
        match ids {
            Some(list) => StationSelector::Subset(list.into_iter().collect()),
            None => StationSelector::All,
        }
    }

    pub fn matches(&self, station_id: &str) -> bool {
        match self {
            StationSelector::All => true,
            StationSelector::Subset(ids) => ids.contains(station_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_tagged_replicates_totals() {
        let aggregate = FileAggregate {
            matched: vec![
                ObservationRow {
                    station_id: "S1".to_string(),
                    metric: "PRCP".to_string(),
                    value: 10.0,
                },
                ObservationRow {
                    station_id: "S1".to_string(),
                    metric: "PRCP".to_string(),
                    value: 4.0,
                },
            ],
            global_sum: 30.0,
            global_count: 2,
        };

        let tagged = aggregate.into_tagged();
        assert_eq!(tagged.len(), 2);
        for row in &tagged {
            assert_eq!(row.global_sum, 30.0);
            assert_eq!(row.global_count, 2);
        }
    }

    #[test]
    fn test_empty_aggregate_tags_nothing() {
        let aggregate = FileAggregate {
            matched: vec![],
            global_sum: 99.0,
            global_count: 3,
        };
        assert!(aggregate.into_tagged().is_empty());
    }

    #[test]
    fn test_station_selector() {
        let all = StationSelector::from_ids(None);
        assert!(all.matches("anything"));

        let subset = StationSelector::from_ids(Some(vec!["S1".to_string(), "S2".to_string()]));
        assert!(subset.matches("S1"));
        assert!(!subset.matches("S3"));
    }
}
