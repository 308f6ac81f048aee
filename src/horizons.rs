//! Client for the JPL Horizons ephemeris API.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{EotError, Result};
use crate::types::{YearBounds, DEFAULT_TIMEOUT_SECS};

pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Horizons quantity code for local apparent solar time.
pub const LOCAL_APPARENT_SOLAR_TIME: &str = "34";

/// Query parameters requesting one daily sample of local apparent solar time at
/// latitude 0, longitude 0, from Dec 31 before `start` to Jan 1 after `end`.
pub fn ephemeris_query(bounds: &YearBounds) -> Vec<(&'static str, String)> {
    vec![
        ("format", "text".to_string()),
        ("COMMAND", "'10'".to_string()),
        ("OBJ_DATA", "'NO'".to_string()),
        ("MAKE_EPHEM", "'YES'".to_string()),
        ("EPHEM_TYPE", "'OBSERVER'".to_string()),
        ("CENTER", "'coord@399'".to_string()),
        ("SITE_COORD", "'0,0,0'".to_string()),
        (
            "START_TIME",
            format!("'{}-12-31 12:00'", bounds.leading_year()),
        ),
        (
            "STOP_TIME",
            format!("'{}-01-01 12:00'", bounds.trailing_year()),
        ),
        ("STEP_SIZE", "'1d'".to_string()),
        ("CSV_FORMAT", "'NO'".to_string()),
        ("QUANTITIES", format!("'{LOCAL_APPARENT_SOLAR_TIME}'")),
    ]
}

pub struct HorizonsClient {
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl HorizonsClient {
    pub fn new() -> Self {
        Self {
            base_url: HORIZONS_API_URL.to_string(),
            user_agent: format!("eot_table/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(|e| EotError::Transport {
                reason: format!("failed to create HTTP client: {e}"),
            })
    }

    /// Issue the single ephemeris request and return the response body.
    pub fn fetch(&self, bounds: &YearBounds) -> Result<String> {
        if bounds.start > bounds.end {
            return Err(EotError::InvalidRange {
                start: bounds.start,
                end: bounds.end,
            });
        }

        let client = self.build_client()?;
        let query = ephemeris_query(bounds);
        debug!(url = %self.base_url, ?query, "requesting ephemeris");

        let response = client
            .get(&self.base_url)
            .query(&query)
            .send()
            .map_err(|e| EotError::Transport {
                reason: format!("request to {} failed: {e}", self.base_url),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EotError::Status {
                status: status.as_u16(),
                url: self.base_url.clone(),
            });
        }

        let body = response.text().map_err(|e| EotError::Transport {
            reason: format!("failed to read response body: {e}"),
        })?;
        info!(bytes = body.len(), "ephemeris received");
        Ok(body)
    }
}

impl Default for HorizonsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> &'a str {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_client_defaults() {
        let client = HorizonsClient::new();
        assert_eq!(client.base_url(), HORIZONS_API_URL);
        assert_eq!(client.timeout(), Duration::from_secs(60));
        assert_eq!(
            client.user_agent,
            format!("eot_table/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_builder_overrides() {
        let client = HorizonsClient::default()
            .with_base_url("http://127.0.0.1:9/api")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(client.base_url(), "http://127.0.0.1:9/api");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_query_window_extends_one_day_each_side() {
        let query = ephemeris_query(&YearBounds::new(2000, 2100));
        assert_eq!(param(&query, "START_TIME"), "'1999-12-31 12:00'");
        assert_eq!(param(&query, "STOP_TIME"), "'2101-01-01 12:00'");
    }

    #[test]
    fn test_query_fixed_parameters() {
        let query = ephemeris_query(&YearBounds::default());
        assert_eq!(query.len(), 12);
        assert_eq!(param(&query, "format"), "text");
        assert_eq!(param(&query, "COMMAND"), "'10'");
        assert_eq!(param(&query, "OBJ_DATA"), "'NO'");
        assert_eq!(param(&query, "MAKE_EPHEM"), "'YES'");
        assert_eq!(param(&query, "EPHEM_TYPE"), "'OBSERVER'");
        assert_eq!(param(&query, "CENTER"), "'coord@399'");
        assert_eq!(param(&query, "SITE_COORD"), "'0,0,0'");
        assert_eq!(param(&query, "STEP_SIZE"), "'1d'");
        assert_eq!(param(&query, "CSV_FORMAT"), "'NO'");
        assert_eq!(param(&query, "QUANTITIES"), "'34'");
    }

    #[test]
    fn test_fetch_rejects_inverted_range() {
        let client = HorizonsClient::new().with_base_url("http://127.0.0.1:9/api");
        let err = client.fetch(&YearBounds::new(2010, 2000)).unwrap_err();
        assert!(matches!(
            err,
            EotError::InvalidRange {
                start: 2010,
                end: 2000
            }
        ));
    }
}
