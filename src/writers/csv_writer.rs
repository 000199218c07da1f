use crate::error::Result;
use crate::models::{CalculationKind, NamedStationStat};
use crate::utils::constants::{MISSING_NAME_SENTINEL, STAT_COLUMN_NAME};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the per-station statistics as `<calculation>_results.csv`.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// NaN stat values are written literally as `NaN`; stations without a
    /// resolved name get the sentinel.
    pub fn write_stats(
        &self,
        stats: &[NamedStationStat],
        output_dir: &Path,
        calculation: CalculationKind,
    ) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(format!("{}_results.csv", calculation));

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["station_id", "name", STAT_COLUMN_NAME])?;
        for stat in stats {
            let name = stat.name.as_deref().unwrap_or(MISSING_NAME_SENTINEL);
            let value = stat.stat_value.to_string();
            writer.write_record([stat.station_id.as_str(), name, value.as_str()])?;
        }
        writer.flush()?;

        Ok(path)
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
