use crate::models::{CalculationKind, CombinedTable, StationStat};
use std::collections::HashMap;

/// Per-station accumulator. Values are kept for the median; the replicated
/// per-file totals are summed for the average-difference calculation.
#[derive(Debug, Default)]
struct StationGroup {
    values: Vec<f64>,
    global_sum: f64,
    global_count: u64,
}

/// Groups the combined query result by station and reduces each group to a
/// single statistic.
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Exactly one output row per distinct station id in the input, sorted
    /// by id. An empty table produces an empty result.
    pub fn calculate(&self, table: &CombinedTable, kind: CalculationKind) -> Vec<StationStat> {
        let mut groups: HashMap<String, StationGroup> = HashMap::new();

        for row in &table.rows {
            let group = groups.entry(row.station_id.clone()).or_default();
            group.values.push(row.value);
            group.global_sum += row.global_sum;
            group.global_count += row.global_count;
        }

        let mut stats: Vec<StationStat> = groups
            .into_iter()
            .map(|(station_id, group)| StationStat {
                station_id,
                stat_value: Self::reduce(&group, kind),
            })
            .collect();
        stats.sort_by(|a, b| a.station_id.cmp(&b.station_id));
        stats
    }

    fn reduce(group: &StationGroup, kind: CalculationKind) -> f64 {
        match kind {
            CalculationKind::Min => group
                .values
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min),
            CalculationKind::Average => mean(&group.values),
            CalculationKind::Median => median(group.values.clone()),
            CalculationKind::AverageDifference => {
                // The file totals are replicated onto every matched row, so
                // this mean is weighted by how many rows the group matched
                // per file rather than being one dataset-wide value.
                let global_mean = group.global_sum / group.global_count as f64;
                (mean(&group.values) - global_mean).abs()
            }
        }
    }
}

impl Default for StatsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
