use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bucket listing error: {0}")]
    BucketListing(String),

    #[error("Malformed object key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Source unavailable '{location}': {reason}")]
    SourceUnavailable { location: String, reason: String },

    #[error("Malformed record in '{location}': {source}")]
    MalformedRecord {
        location: String,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
