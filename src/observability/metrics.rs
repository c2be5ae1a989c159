//! Prometheus scraping.
//!
//! # Responsibilities
//! - Fetch the text exposition from a node's metrics endpoint
//! - Look up a single sample by name and exact label set
//!
//! # Metrics of interest
//! - `creditcoin_node_hash_count{chain="dev"}` (counter): hashes computed by
//!   the node's proof-of-work miner

use std::time::Duration;

use thiserror::Error;

/// Default per-request timeout for scraping.
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("metrics endpoint returned status {0}")]
    Status(u16),

    #[error("invalid metrics URL '{0}'")]
    InvalidUrl(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;

/// GET `<base_url>/metrics` and return the body.
pub async fn fetch_metrics(base_url: &str) -> MetricsResult<String> {
    let url = metrics_url(base_url)?;

    let client = reqwest::Client::builder().timeout(SCRAPE_TIMEOUT).build()?;
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "Metrics scrape failed");
        return Err(MetricsError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// `<base_url>/metrics`, keeping any path prefix of the base.
fn metrics_url(base_url: &str) -> MetricsResult<url::Url> {
    let invalid = || MetricsError::InvalidUrl(base_url.to_string());
    let mut url = url::Url::parse(base_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .push("metrics");
    Ok(url)
}

/// Find the integer value of `name{labels}` in Prometheus text.
///
/// The label set must match exactly (order-insensitive). Comment lines and
/// samples with non-integer values are skipped.
pub fn find_sample(text: &str, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find_map(|line| {
            let (series, value) = split_sample(line)?;
            let (series_name, series_labels) = parse_series(series)?;
            if series_name != name || !same_labels(&series_labels, labels) {
                return None;
            }
            parse_value(value)
        })
}

// `name{..} value [timestamp]`; label values may contain spaces.
fn split_sample(line: &str) -> Option<(&str, &str)> {
    let series_end = match line.rfind('}') {
        Some(end) => end + 1,
        None => line.find(char::is_whitespace)?,
    };
    let (series, rest) = line.split_at(series_end);
    let value = rest.split_whitespace().next()?;
    Some((series, value))
}

fn parse_series(series: &str) -> Option<(&str, Vec<(String, String)>)> {
    let Some(open) = series.find('{') else {
        return Some((series, Vec::new()));
    };
    let name = &series[..open];
    let body = series[open + 1..].strip_suffix('}')?;

    let mut labels = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        let eq = rest.find('=')?;
        let key = rest[..eq].trim().to_string();
        let after = rest[eq + 1..].strip_prefix('"')?;

        let mut value = String::new();
        let mut chars = after.char_indices();
        let mut consumed = None;
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, escaped)) => value.push(escaped),
                    None => return None,
                },
                '"' => {
                    consumed = Some(i + 1);
                    break;
                }
                _ => value.push(c),
            }
        }
        labels.push((key, value));
        rest = after[consumed?..].trim_start_matches(',').trim_start();
    }
    Some((name, labels))
}

fn same_labels(found: &[(String, String)], wanted: &[(&str, &str)]) -> bool {
    found.len() == wanted.len()
        && wanted
            .iter()
            .all(|(k, v)| found.iter().any(|(fk, fv)| fk == k && fv == v))
}

fn parse_value(value: &str) -> Option<u64> {
    value.parse::<u64>().ok().or_else(|| {
        let float = value.parse::<f64>().ok()?;
        (float.is_finite() && float >= 0.0 && float.fract() == 0.0).then_some(float as u64)
    })
}
