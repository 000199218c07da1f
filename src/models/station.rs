use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Final per-station statistic produced by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStat {
    pub station_id: String,
    pub stat_value: f64,
}

impl StationStat {
    pub fn new(station_id: impl Into<String>, stat_value: f64) -> Self {
        Self {
            station_id: station_id.into(),
            stat_value,
        }
    }
}

/// A statistic joined with the station's display name, when known.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStationStat {
    pub station_id: String,
    pub name: Option<String>,
    pub stat_value: f64,
}

impl NamedStationStat {
    /// Label used on chart axes: the name when present, else the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.station_id)
    }
}

/// Left-join station names onto the stats; unknown ids keep `None`.
pub fn join_station_names(
    stats: Vec<StationStat>,
    names: &HashMap<String, String>,
) -> Vec<NamedStationStat> {
    stats
        .into_iter()
        .map(|stat| {
            let name = names.get(&stat.station_id).cloned();
            NamedStationStat {
                station_id: stat.station_id,
                name,
                stat_value: stat.stat_value,
            }
        })
        .collect()
}
