use crate::error::{Result, WeatherError};
use crate::models::{CombinedTable, FileAggregate, Metric, StationSelector};
use crate::readers::ObservationReader;
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_WORKERS};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

/// Fans one chunked file aggregation per location onto a bounded pool of
/// blocking workers and joins the results into one combined table.
///
/// Tasks own their reader and accumulators exclusively; there is no shared
/// mutable state and no ordering requirement between files.
pub struct QueryCoordinator {
    max_workers: usize,
    chunk_size: usize,
}

impl QueryCoordinator {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Query every location for the stations and metric. Fail-fast: the
    /// first failing file aborts the whole query with no partial result.
    /// An empty location set yields an empty table.
    pub async fn query<I>(
        &self,
        stations: &StationSelector,
        locations: I,
        metric: Metric,
    ) -> Result<CombinedTable>
    where
        I: IntoIterator<Item = String>,
    {
        let locations: Vec<String> = locations.into_iter().collect();
        if locations.is_empty() {
            return Ok(CombinedTable::new());
        }

        info!(
            files = locations.len(),
            workers = self.max_workers,
            "querying observation files"
        );

        let chunk_size = self.chunk_size;
        let aggregates: Vec<FileAggregate> = stream::iter(locations)
            .map(|location| {
                let stations = stations.clone();
                tokio::task::spawn_blocking(move || {
                    ObservationReader::new()
                        .with_chunk_size(chunk_size)
                        .aggregate_file(&location, &stations, metric.as_str())
                })
            })
            .buffer_unordered(self.max_workers)
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(WeatherError::TaskJoin(e)),
            })
            .try_collect()
            .await?;

        let mut table = CombinedTable::new();
        for aggregate in aggregates {
            table.absorb(aggregate);
        }

        debug!(rows = table.len(), "combined query result");
        Ok(table)
    }
}

impl Default for QueryCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaggedObservation;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn sorted_rows(table: &CombinedTable) -> Vec<TaggedObservation> {
        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| {
            a.station_id
                .cmp(&b.station_id)
                .then(a.value.partial_cmp(&b.value).unwrap())
        });
        rows
    }

    #[tokio::test]
    async fn test_empty_locations_yield_empty_table() {
        let coordinator = QueryCoordinator::new(2);
        let table = coordinator
            .query(&StationSelector::All, Vec::new(), Metric::Prcp)
            .await
            .unwrap();

        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_query_concatenates_files_with_per_file_totals() {
        let a = fixture("station_id,metric,value\nS1,PRCP,10\nS2,PRCP,20\nS1,TAVG,5\n");
        let b = fixture("station_id,metric,value\nS1,PRCP,1\nS3,PRCP,2\n");

        let coordinator = QueryCoordinator::new(2).with_chunk_size(1);
        let table = coordinator
            .query(
                &StationSelector::All,
                vec![
                    a.path().to_str().unwrap().to_string(),
                    b.path().to_str().unwrap().to_string(),
                ],
                Metric::Prcp,
            )
            .await
            .unwrap();

        assert_eq!(table.len(), 4);
        let rows = sorted_rows(&table);
        // Rows keep the totals of the file they came from
        let s1_small = rows
            .iter()
            .find(|r| r.station_id == "S1" && r.value == 1.0)
            .unwrap();
        assert_eq!(s1_small.global_sum, 3.0);
        assert_eq!(s1_small.global_count, 2);

        let s1_large = rows
            .iter()
            .find(|r| r.station_id == "S1" && r.value == 10.0)
            .unwrap();
        assert_eq!(s1_large.global_sum, 30.0);
        assert_eq!(s1_large.global_count, 2);
    }

    #[tokio::test]
    async fn test_query_is_order_insensitive() {
        let a = fixture("station_id,metric,value\nS1,PRCP,10\nS2,PRCP,20\n");
        let b = fixture("station_id,metric,value\nS3,PRCP,30\n");
        let path_a = a.path().to_str().unwrap().to_string();
        let path_b = b.path().to_str().unwrap().to_string();

        let coordinator = QueryCoordinator::new(1);
        let forward = coordinator
            .query(
                &StationSelector::All,
                vec![path_a.clone(), path_b.clone()],
                Metric::Prcp,
            )
            .await
            .unwrap();
        let reverse = coordinator
            .query(&StationSelector::All, vec![path_b, path_a], Metric::Prcp)
            .await
            .unwrap();

        assert_eq!(sorted_rows(&forward), sorted_rows(&reverse));
    }

    #[tokio::test]
    async fn test_failing_file_aborts_query() {
        let a = fixture("station_id,metric,value\nS1,PRCP,10\n");

        let coordinator = QueryCoordinator::new(2);
        let result = coordinator
            .query(
                &StationSelector::All,
                vec![
                    a.path().to_str().unwrap().to_string(),
                    "/no/such/file.csv".to_string(),
                ],
                Metric::Prcp,
            )
            .await;

        assert!(matches!(
            result,
            Err(WeatherError::SourceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_file_with_no_matching_stations_contributes_nothing() {
        let a = fixture("station_id,metric,value\nS9,PRCP,42\n");

        let coordinator = QueryCoordinator::new(2);
        let stations =
            StationSelector::from_ids(Some(vec!["S1".to_string()]));
        let table = coordinator
            .query(
                &stations,
                vec![a.path().to_str().unwrap().to_string()],
                Metric::Prcp,
            )
            .await
            .unwrap();

        assert!(table.is_empty());
    }
}
