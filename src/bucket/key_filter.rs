use crate::error::{Result, WeatherError};
use crate::utils::constants::{KEY_DATE_LEN, KEY_DATE_OFFSET};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use tracing::warn;

/// Selects observation keys whose embedded date falls inside an inclusive
/// range, optionally restricted to a single weekday.
pub struct KeyRangeFilter;

impl KeyRangeFilter {
    /// Keys are kept iff `start <= date <= end` and, when a weekday is
    /// given, the date falls on that weekday. A key whose date does not
    /// parse is logged and skipped rather than failing the run, so foreign
    /// keys in a shared listing are tolerated.
    pub fn filter(
        keys: &[String],
        start: NaiveDate,
        end: NaiveDate,
        weekday: Option<Weekday>,
    ) -> HashSet<String> {
        let mut selected = HashSet::new();

        for key in keys {
            let date = match Self::key_date(key) {
                Ok(date) => date,
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping key with unparseable date");
                    continue;
                }
            };

            let in_range = start <= date && date <= end;
            let on_weekday = weekday.map_or(true, |wd| date.weekday() == wd);
            if in_range && on_weekday {
                selected.insert(key.clone());
            }
        }

        selected
    }

    /// Extract and parse the `YYYY-MM-DD` substring embedded at the fixed
    /// offset of an observation key.
    pub fn key_date(key: &str) -> Result<NaiveDate> {
        let slice = key
            .get(KEY_DATE_OFFSET..KEY_DATE_OFFSET + KEY_DATE_LEN)
            .ok_or_else(|| WeatherError::MalformedKey {
                key: key.to_string(),
                reason: "key too short for an embedded date".to_string(),
            })?;

        NaiveDate::parse_from_str(slice, "%Y-%m-%d").map_err(|e| WeatherError::MalformedKey {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}
