use crate::models::{CalculationKind, ExportKind, Metric, RowFilter};
use crate::utils::constants::{
    DEFAULT_BUCKET_URL, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_WORKERS, DEFAULT_OUTPUT_DIR,
};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-bucket-stats")]
#[command(about = "Analyze weather observation data hosted in a remote bucket")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        num_args = 1..,
        help = "Station ids to analyze [default: all stations]"
    )]
    pub stations: Option<Vec<String>>,

    #[arg(short, long, value_enum, help = "Metric to analyze")]
    pub metric: Metric,

    #[arg(long, help = "Start date (inclusive), yyyy-mm-dd")]
    pub start_date: NaiveDate,

    #[arg(long, help = "End date (inclusive), yyyy-mm-dd")]
    pub end_date: NaiveDate,

    #[arg(long, value_enum, help = "Row filter applied to the candidate files")]
    pub filter: Option<RowFilter>,

    #[arg(
        long,
        value_enum,
        default_value_t = CalculationKind::Average,
        help = "Statistic computed per station"
    )]
    pub calculation: CalculationKind,

    #[arg(
        long,
        value_enum,
        default_value_t = ExportKind::Csv,
        help = "Output format"
    )]
    pub export_type: ExportKind,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR, help = "Output directory path")]
    pub output_path: PathBuf,

    #[arg(long, default_value = DEFAULT_BUCKET_URL, help = "Bucket endpoint URL")]
    pub bucket_url: String,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_WORKERS,
        help = "Parallel file readers"
    )]
    pub max_workers: usize,

    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        help = "Rows read per chunk"
    )]
    pub chunk_size: usize,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,
}
