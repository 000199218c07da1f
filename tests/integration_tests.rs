use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};
use weather_bucket_stats::analyzers::StatsCalculator;
use weather_bucket_stats::models::{
    join_station_names, CalculationKind, Metric, StationSelector,
};
use weather_bucket_stats::processors::QueryCoordinator;
use weather_bucket_stats::writers::{ChartWriter, CsvWriter};

fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create fixture");
    write!(file, "{}", content).expect("failed to write fixture");
    file
}

fn location(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_query_to_csv_export() {
    // Two observation files of different days
    let day1 = fixture("station_id,metric,value\nS1,PRCP,10\nS2,PRCP,20\nS1,TAVG,5\n");
    let day2 = fixture("station_id,metric,value\nS1,PRCP,4\nS2,PRCP,6\nS3,PRCP,8\n");

    let coordinator = QueryCoordinator::new(2).with_chunk_size(2);
    let stations = StationSelector::from_ids(Some(vec!["S1".to_string(), "S2".to_string()]));
    let table = coordinator
        .query(
            &stations,
            vec![location(&day1), location(&day2)],
            Metric::Prcp,
        )
        .await
        .expect("query failed");

    // S3's rows are excluded, but day2's global totals still count them
    assert_eq!(table.len(), 4);

    let stats = StatsCalculator::new().calculate(&table, CalculationKind::Average);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].station_id, "S1");
    assert_eq!(stats[0].stat_value, 7.0);
    assert_eq!(stats[1].station_id, "S2");
    assert_eq!(stats[1].stat_value, 13.0);

    let names = [("S1".to_string(), "Amsterdam Central".to_string())]
        .into_iter()
        .collect();
    let named = join_station_names(stats, &names);

    let out = TempDir::new().unwrap();
    let path = CsvWriter::new()
        .write_stats(&named, out.path(), CalculationKind::Average)
        .expect("csv export failed");

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("S1,Amsterdam Central,7"));
    assert!(content.contains("S2,Unknown,13"));
}

#[tokio::test]
async fn test_query_to_chart_export() {
    let day = fixture("station_id,metric,value\nS1,TAVG,15\nS2,TAVG,18\n");

    let coordinator = QueryCoordinator::new(2);
    let table = coordinator
        .query(&StationSelector::All, vec![location(&day)], Metric::Tavg)
        .await
        .expect("query failed");

    let stats = StatsCalculator::new().calculate(&table, CalculationKind::Min);
    let named = join_station_names(stats, &Default::default());

    let out = TempDir::new().unwrap();
    let path: PathBuf = ChartWriter::new()
        .write_bar_chart(&named, out.path(), CalculationKind::Min, Metric::Tavg)
        .expect("chart export failed");

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("<svg"));
    assert!(content.contains("min/TAVG (1/10 Celsius)"));
}

#[tokio::test]
async fn test_average_difference_end_to_end() {
    // One file: S1 matches, S2 contributes only to the file totals.
    // Totals: sum=30, count=2 -> file mean 15. S1 mean is 10, stat 5.
    let day = fixture("station_id,metric,value\nS1,PRCP,10\nS2,PRCP,20\n");

    let coordinator = QueryCoordinator::new(1);
    let stations = StationSelector::from_ids(Some(vec!["S1".to_string()]));
    let table = coordinator
        .query(&stations, vec![location(&day)], Metric::Prcp)
        .await
        .expect("query failed");

    let stats = StatsCalculator::new().calculate(&table, CalculationKind::AverageDifference);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].station_id, "S1");
    assert_eq!(stats[0].stat_value, 5.0);
}

#[tokio::test]
async fn test_no_matching_stations_is_an_empty_result() {
    let day = fixture("station_id,metric,value\nS9,PRCP,1\n");

    let coordinator = QueryCoordinator::new(2);
    let stations = StationSelector::from_ids(Some(vec!["S1".to_string()]));
    let table = coordinator
        .query(&stations, vec![location(&day)], Metric::Prcp)
        .await
        .expect("query failed");

    let stats = StatsCalculator::new().calculate(&table, CalculationKind::Average);
    assert!(stats.is_empty());
}
