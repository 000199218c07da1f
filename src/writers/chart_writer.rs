use crate::error::{Result, WeatherError};
use crate::models::{CalculationKind, Metric, NamedStationStat};
use crate::utils::constants::STAT_COLUMN_NAME;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Renders the per-station statistics as a categorical bar chart,
/// `<calculation>_results.svg`.
pub struct ChartWriter;

impl ChartWriter {
    pub fn new() -> Self {
        Self
    }

    /// Bars are labelled with station names; if any name is missing the
    /// x axis falls back to station ids, with a warning.
    pub fn write_bar_chart(
        &self,
        stats: &[NamedStationStat],
        output_dir: &Path,
        calculation: CalculationKind,
        metric: Metric,
    ) -> Result<PathBuf> {
        if stats.is_empty() {
            return Err(WeatherError::Chart(
                "no statistics to plot".to_string(),
            ));
        }

        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(format!("{}_results.svg", calculation));

        let all_names_resolved = stats.iter().all(|s| s.name.is_some());
        if !all_names_resolved {
            warn!("some station names are missing, station ids will be used instead");
        }
        let labels: Vec<String> = stats
            .iter()
            .map(|s| {
                if all_names_resolved {
                    s.label().to_string()
                } else {
                    s.station_id.clone()
                }
            })
            .collect();

        let finite: Vec<f64> = stats
            .iter()
            .map(|s| s.stat_value)
            .filter(|v| v.is_finite())
            .collect();
        let max_value = finite.iter().copied().fold(0.0f64, f64::max);
        let min_value = finite.iter().copied().fold(0.0f64, f64::min);
        let y_max = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };
        let y_min = if min_value < 0.0 { min_value * 1.1 } else { 0.0 };

        let root = SVGBackend::new(&path, (960, 540)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| WeatherError::Chart(e.to_string()))?;

        let title = format!("{}/{} ({})", calculation, metric, metric.unit());
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(60)
            .build_cartesian_2d((0..stats.len() as u32).into_segmented(), y_min..y_max)
            .map_err(|e| WeatherError::Chart(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(stats.len())
            .x_label_formatter(&|pos| match pos {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                    labels.get(*i as usize).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .y_desc(STAT_COLUMN_NAME)
            .draw()
            .map_err(|e| WeatherError::Chart(e.to_string()))?;

        chart
            .draw_series(stats.iter().enumerate().map(|(i, stat)| {
                // NaN stats render as a zero-height bar; the CSV export is
                // the place where NaN stays visible.
                let value = if stat.stat_value.is_finite() {
                    stat.stat_value
                } else {
                    0.0
                };
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as u32), 0.0),
                        (SegmentValue::Exact(i as u32 + 1), value),
                    ],
                    BLUE.mix(0.6).filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            }))
            .map_err(|e| WeatherError::Chart(e.to_string()))?;

        root.present()
            .map_err(|e| WeatherError::Chart(e.to_string()))?;
        drop(chart);
        drop(root);
        Ok(path)
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new()
    }
}
