use crate::error::{Result, WeatherError};
use crate::readers::open_location;
use crate::utils::constants::DEFAULT_CHUNK_SIZE;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct StationNameRow {
    id: String,
    name: String,
}

/// Chunked reader over the bucket's station metadata CSV, collecting the
/// display names of a wanted set of station ids.
pub struct StationNameReader {
    chunk_size: usize,
}

impl StationNameReader {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Stream the metadata CSV at `location` and return id -> name for the
    /// requested ids. Ids absent from the metadata are simply missing from
    /// the map.
    pub fn read_names(
        &self,
        location: &str,
        wanted: &HashSet<String>,
    ) -> Result<HashMap<String, String>> {
        let reader = open_location(location)?;
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut names = HashMap::new();
        let mut chunk: Vec<StationNameRow> = Vec::with_capacity(self.chunk_size.min(4096));

        for record in csv_reader.deserialize() {
            let row: StationNameRow = record.map_err(|source| WeatherError::MalformedRecord {
                location: location.to_string(),
                source,
            })?;
            chunk.push(row);
            if chunk.len() >= self.chunk_size {
                Self::fold_chunk(&mut names, &mut chunk, wanted);
            }
        }
        Self::fold_chunk(&mut names, &mut chunk, wanted);

        debug!(
            location,
            resolved = names.len(),
            wanted = wanted.len(),
            "station names resolved"
        );
        Ok(names)
    }

    fn fold_chunk(
        names: &mut HashMap<String, String>,
        chunk: &mut Vec<StationNameRow>,
        wanted: &HashSet<String>,
    ) {
        for row in chunk.drain(..) {
            if wanted.contains(&row.id) {
                names.insert(row.id, row.name);
            }
        }
    }
}

impl Default for StationNameReader {
    fn default() -> Self {
        Self::new()
    }
}
