use chrono::Weekday;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observation metric recognized by the bucket data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "UPPER")]
pub enum Metric {
    Prcp,
    Tavg,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Prcp => "PRCP",
            Metric::Tavg => "TAVG",
        }
    }

    /// Unit shown in chart titles.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Prcp => "mm",
            Metric::Tavg => "1/10 Celsius",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-station statistic applied to the combined query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "snake_case")]
pub enum CalculationKind {
    Min,
    Average,
    Median,
    AverageDifference,
}

impl CalculationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationKind::Min => "min",
            CalculationKind::Average => "average",
            CalculationKind::Median => "median",
            CalculationKind::AverageDifference => "average_difference",
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for the exported statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ExportKind {
    Csv,
    BarPlot,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Csv => "csv",
            ExportKind::BarPlot => "bar_plot",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional row filter applied to the candidate object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum RowFilter {
    MondaysOnly,
}

impl RowFilter {
    pub fn weekday(&self) -> Weekday {
        match self {
            RowFilter::MondaysOnly => Weekday::Mon,
        }
    }
}
