/// Public bucket endpoint hosting the observation files
pub const DEFAULT_BUCKET_URL: &str = "https://storage.googleapis.com/spotnix-app-resources/";

/// Object key layout: weather_data/weather_data_YYYY-MM-DD.csv
pub const OBSERVATION_KEY_PREFIX: &str = "weather_data/weather_data_";
pub const OBSERVATION_KEY_SUFFIX: &str = ".csv";
pub const KEY_DATE_OFFSET: usize = 26;
pub const KEY_DATE_LEN: usize = 10;

/// Year of the station metadata file: weather_data/{year}_weather_stations.csv
pub const DEFAULT_METADATA_YEAR: u16 = 2021;

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Export defaults
pub const DEFAULT_OUTPUT_DIR: &str = "results";
pub const MISSING_NAME_SENTINEL: &str = "Unknown";
pub const STAT_COLUMN_NAME: &str = "stat_value";
