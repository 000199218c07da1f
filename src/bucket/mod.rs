pub mod key_filter;
pub mod listing;
pub mod metadata;

pub use key_filter::KeyRangeFilter;
pub use listing::BucketClient;
pub use metadata::StationNameReader;
