use std::fmt;

use log::{info, warn};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str =
    "http://apis.data.go.kr/B552657/ErmctInsttInfoInqireService/getParmacyListInfoInqire";
pub const DEFAULT_NUM_OF_ROWS: u32 = 100;
pub const MAX_NUM_OF_ROWS: u32 = 1000;

// Unverified against the provider's documentation, hence overridable.
pub const DEFAULT_HOLIDAY_CODE: &str = "8";

pub const API_KEY_VAR: &str = "PHARMACY_API_KEY";
pub const BASE_URL_VAR: &str = "PHARMACY_API_BASE_URL";
pub const NUM_OF_ROWS_VAR: &str = "PHARMACY_NUM_OF_ROWS";
pub const HOLIDAY_CODE_VAR: &str = "PHARMACY_HOLIDAY_CODE";

/// Upstream API credential.
///
/// The value is only reachable through [`ServiceKey::expose`]; `Debug` and
/// `Display` print a masked placeholder carrying the length.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Returns `None` for an empty or whitespace-only key.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceKey(<redacted:{} chars>)", self.len())
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted:{} chars>", self.len())
    }
}

/// Settings for the outbound call, read once and shared by every request.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: Url,
    pub num_of_rows: u32,
    pub holiday_code: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            num_of_rows: DEFAULT_NUM_OF_ROWS,
            holiday_code: DEFAULT_HOLIDAY_CODE.to_string(),
        }
    }
}

/// Process configuration for the lookup service.
///
/// A missing key is not a startup failure: it is carried as `None` and every
/// lookup reports a configuration error until the key is provisioned.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub service_key: Option<ServiceKey>,
    pub upstream: UpstreamConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_key = lookup(API_KEY_VAR).and_then(ServiceKey::new);
        match &service_key {
            Some(key) => info!("{} loaded: {}", API_KEY_VAR, key),
            None => warn!("{} is not set; lookups will fail", API_KEY_VAR),
        }

        let base_url = match lookup(BASE_URL_VAR) {
            Some(raw) => match Url::parse(raw.trim()) {
                Ok(url) => url,
                Err(err) => {
                    warn!("Ignoring invalid {}={:?}: {}", BASE_URL_VAR, raw, err);
                    default_base_url()
                }
            },
            None => default_base_url(),
        };

        let num_of_rows = match lookup(NUM_OF_ROWS_VAR) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(rows) if (1..=MAX_NUM_OF_ROWS).contains(&rows) => rows,
                _ => {
                    warn!(
                        "Ignoring invalid {}={:?}; using {}",
                        NUM_OF_ROWS_VAR, raw, DEFAULT_NUM_OF_ROWS
                    );
                    DEFAULT_NUM_OF_ROWS
                }
            },
            None => DEFAULT_NUM_OF_ROWS,
        };

        let holiday_code = lookup(HOLIDAY_CODE_VAR)
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| DEFAULT_HOLIDAY_CODE.to_string());

        Self {
            service_key,
            upstream: UpstreamConfig {
                base_url,
                num_of_rows,
                holiday_code,
            },
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_key_never_prints_value() {
        let key = ServiceKey::new("super-secret-key").unwrap();
        assert_eq!(format!("{}", key), "<redacted:16 chars>");
        assert_eq!(format!("{:?}", key), "ServiceKey(<redacted:16 chars>)");
        assert!(!format!("{:?}", Some(&key)).contains("super-secret"));
    }

    #[test]
    fn blank_service_key_is_rejected() {
        assert!(ServiceKey::new("").is_none());
        assert!(ServiceKey::new("   ").is_none());
    }

    #[test]
    fn from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                (API_KEY_VAR, Some("abc123")),
                (BASE_URL_VAR, Some("http://localhost:9999/pharmacies")),
                (NUM_OF_ROWS_VAR, Some("25")),
                (HOLIDAY_CODE_VAR, Some("9")),
            ],
            || {
                let config = Config::from_env();
                assert_eq!(config.service_key.unwrap().expose(), "abc123");
                assert_eq!(
                    config.upstream.base_url.as_str(),
                    "http://localhost:9999/pharmacies"
                );
                assert_eq!(config.upstream.num_of_rows, 25);
                assert_eq!(config.upstream.holiday_code, "9");
            },
        );
    }

    #[test]
    fn from_env_defaults_when_unset() {
        temp_env::with_vars_unset(
            [API_KEY_VAR, BASE_URL_VAR, NUM_OF_ROWS_VAR, HOLIDAY_CODE_VAR],
            || {
                let config = Config::from_env();
                assert!(config.service_key.is_none());
                assert_eq!(config.upstream.base_url.as_str(), DEFAULT_BASE_URL);
                assert_eq!(config.upstream.num_of_rows, DEFAULT_NUM_OF_ROWS);
                assert_eq!(config.upstream.holiday_code, DEFAULT_HOLIDAY_CODE);
            },
        );
    }

    #[test]
    fn invalid_optional_values_fall_back() {
        let config = Config::from_lookup(|name| match name {
            BASE_URL_VAR => Some("not a url".to_string()),
            NUM_OF_ROWS_VAR => Some("0".to_string()),
            HOLIDAY_CODE_VAR => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.upstream.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.upstream.num_of_rows, DEFAULT_NUM_OF_ROWS);
        assert_eq!(config.upstream.holiday_code, DEFAULT_HOLIDAY_CODE);
    }
}
