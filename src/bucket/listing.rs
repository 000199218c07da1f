use crate::error::{Result, WeatherError};
use crate::utils::constants::{KEY_DATE_LEN, OBSERVATION_KEY_PREFIX, OBSERVATION_KEY_SUFFIX};
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use tracing::{debug, info};

/// Client for the public bucket hosting the observation files.
pub struct BucketClient {
    base_url: String,
    client: reqwest::Client,
}

impl BucketClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL of an object key.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}{}", self.base_url, key)
    }

    /// Key of the station metadata CSV for a given year.
    pub fn station_metadata_key(year: u16) -> String {
        format!("weather_data/{}_weather_stations.csv", year)
    }

    /// List the candidate observation keys from the bucket's
    /// `ListBucketResult` document. Only positive-size objects matching the
    /// observation key pattern are returned.
    pub async fn list_observation_keys(&self) -> Result<Vec<String>> {
        debug!(url = %self.base_url, "listing bucket contents");
        let body = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| WeatherError::BucketListing(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| WeatherError::BucketListing(e.to_string()))?;

        let keys = parse_listing(&body)?;
        info!(count = keys.len(), "observation files listed in the bucket");
        Ok(keys)
    }
}

/// Walk the `<Contents>` entries of an S3-style listing, keeping each key
/// that matches the observation pattern and reports a positive size.
fn parse_listing(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = XmlReader::from_reader(xml);
    reader.trim_text(true);

    let mut keys = Vec::new();
    let mut buf = Vec::new();
    let mut in_key = false;
    let mut in_size = false;
    let mut key: Option<String> = None;
    let mut size: u64 = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"Contents" => {
                    key = None;
                    size = 0;
                }
                b"Key" => in_key = true,
                b"Size" => in_size = true,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| WeatherError::BucketListing(e.to_string()))?;
                if in_key {
                    key = Some(text.into_owned());
                } else if in_size {
                    size = text.trim().parse().unwrap_or(0);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"Key" => in_key = false,
                b"Size" => in_size = false,
                b"Contents" => {
                    if let Some(k) = key.take() {
                        if size > 0 && is_observation_key(&k) {
                            keys.push(k);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(WeatherError::BucketListing(format!(
                    "listing parse error: {}",
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(keys)
}

/// `weather_data/weather_data_YYYY-MM-DD.csv` with a date-shaped stem.
fn is_observation_key(key: &str) -> bool {
    key.strip_prefix(OBSERVATION_KEY_PREFIX)
        .and_then(|rest| rest.strip_suffix(OBSERVATION_KEY_SUFFIX))
        .map(is_date_shaped)
        .unwrap_or(false)
}

fn is_date_shaped(s: &str) -> bool {
    s.len() == KEY_DATE_LEN
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
