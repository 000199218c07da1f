use crate::analyzers::StatsCalculator;
use crate::bucket::{BucketClient, KeyRangeFilter, StationNameReader};
use crate::cli::args::Cli;
use crate::error::Result;
use crate::models::{join_station_names, ExportKind, StationSelector};
use crate::processors::QueryCoordinator;
use crate::utils::constants::DEFAULT_METADATA_YEAR;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ChartWriter, CsvWriter};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let client = BucketClient::new(cli.bucket_url.clone());

    // Bucket content selection
    let candidate_keys = client.list_observation_keys().await?;
    let weekday = cli.filter.map(|f| f.weekday());
    let selected_keys =
        KeyRangeFilter::filter(&candidate_keys, cli.start_date, cli.end_date, weekday);
    info!(
        selected = selected_keys.len(),
        candidates = candidate_keys.len(),
        "selected observation files for the requested range"
    );

    // Data grabbing & filtering
    let stations = StationSelector::from_ids(cli.stations.clone());
    let locations: Vec<String> = selected_keys.iter().map(|key| client.object_url(key)).collect();

    let progress = ProgressReporter::new_spinner("Querying observation files...", false);
    let coordinator = QueryCoordinator::new(cli.max_workers).with_chunk_size(cli.chunk_size);
    let table = coordinator.query(&stations, locations, cli.metric).await?;
    progress.finish_with_message(&format!("Queried {} matching records", table.len()));

    // Per-station statistic
    let stats = StatsCalculator::new().calculate(&table, cli.calculation);
    if stats.is_empty() {
        println!("No stations matched the query - nothing to export");
        return Ok(());
    }
    info!(
        stations = stats.len(),
        calculation = %cli.calculation,
        "calculated station statistics"
    );

    // Name enrichment is best-effort: a failed or incomplete metadata lookup
    // degrades to id-based labels, never a failure.
    let names = fetch_station_names(&client, &stats, cli.chunk_size).await?;
    let named = join_station_names(stats, &names);
    let resolved = named.iter().filter(|s| s.name.is_some()).count();
    info!("resolved {}/{} station names", resolved, named.len());

    match cli.export_type {
        ExportKind::Csv => {
            let path = CsvWriter::new().write_stats(&named, &cli.output_path, cli.calculation)?;
            println!("Results written to {}", path.display());
        }
        ExportKind::BarPlot => {
            let path = ChartWriter::new().write_bar_chart(
                &named,
                &cli.output_path,
                cli.calculation,
                cli.metric,
            )?;
            println!("Chart written to {}", path.display());
        }
    }

    info!("query complete");
    Ok(())
}

async fn fetch_station_names(
    client: &BucketClient,
    stats: &[crate::models::StationStat],
    chunk_size: usize,
) -> Result<HashMap<String, String>> {
    let wanted: HashSet<String> = stats.iter().map(|s| s.station_id.clone()).collect();
    let metadata_url =
        client.object_url(&BucketClient::station_metadata_key(DEFAULT_METADATA_YEAR));

    let lookup = tokio::task::spawn_blocking(move || {
        StationNameReader::new()
            .with_chunk_size(chunk_size)
            .read_names(&metadata_url, &wanted)
    })
    .await?;

    Ok(match lookup {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, "station name lookup failed, exporting ids only");
            HashMap::new()
        }
    })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}
