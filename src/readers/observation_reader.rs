use crate::error::{Result, WeatherError};
use crate::models::{FileAggregate, ObservationRow, StationSelector};
use crate::utils::constants::DEFAULT_CHUNK_SIZE;
use std::fs::File;
use std::io::Read;
use tracing::debug;

/// Open a streaming reader over an `http(s)://` URL or a filesystem path.
///
/// HTTP bodies are read incrementally off the socket through the blocking
/// response, so a remote file is never buffered whole. Must run on a
/// blocking-capable thread.
pub fn open_location(location: &str) -> Result<Box<dyn Read + Send>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let response = reqwest::blocking::get(location)
            .and_then(|r| r.error_for_status())
            .map_err(|e| WeatherError::SourceUnavailable {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(response))
    } else {
        let file = File::open(location).map_err(|e| WeatherError::SourceUnavailable {
            location: location.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(file))
    }
}

/// Streams one observation file in bounded row chunks.
///
/// Each pass over a chunk computes two projections: rows matching the
/// requested stations and metric are kept, and every row matching the metric
/// (any station) is folded into a running whole-file sum and count.
pub struct ObservationReader {
    chunk_size: usize,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn aggregate_file(
        &self,
        location: &str,
        stations: &StationSelector,
        metric: &str,
    ) -> Result<FileAggregate> {
        let reader = open_location(location)?;
        self.aggregate_from_reader(reader, location, stations, metric)
    }

    /// Chunked aggregation pass; `location` only labels errors.
    pub fn aggregate_from_reader<R: Read>(
        &self,
        reader: R,
        location: &str,
        stations: &StationSelector,
        metric: &str,
    ) -> Result<FileAggregate> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut aggregate = FileAggregate::default();
        let mut chunk: Vec<ObservationRow> = Vec::with_capacity(self.chunk_size.min(4096));

        for record in csv_reader.deserialize() {
            let row: ObservationRow = record.map_err(|e| record_error(location, e))?;
            chunk.push(row);
            if chunk.len() >= self.chunk_size {
                Self::fold_chunk(&mut aggregate, &mut chunk, stations, metric);
            }
        }
        Self::fold_chunk(&mut aggregate, &mut chunk, stations, metric);

        debug!(
            location,
            matched = aggregate.matched.len(),
            global_count = aggregate.global_count,
            "aggregated observation file"
        );
        Ok(aggregate)
    }

    fn fold_chunk(
        aggregate: &mut FileAggregate,
        chunk: &mut Vec<ObservationRow>,
        stations: &StationSelector,
        metric: &str,
    ) {
        for row in chunk.drain(..) {
            if row.metric != metric {
                continue;
            }
            aggregate.global_sum += row.value;
            aggregate.global_count += 1;
            if stations.matches(&row.station_id) {
                aggregate.matched.push(row);
            }
        }
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A transport failure mid-stream surfaces as a CSV I/O error; report it as
/// an unavailable source rather than a malformed record.
fn record_error(location: &str, source: csv::Error) -> WeatherError {
    if matches!(source.kind(), csv::ErrorKind::Io(_)) {
        WeatherError::SourceUnavailable {
            location: location.to_string(),
            reason: source.to_string(),
        }
    } else {
        WeatherError::MalformedRecord {
            location: location.to_string(),
            source,
        }
    }
}
