use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One pharmacy entry exactly as the upstream describes it.
pub type PharmacyRecord = Map<String, Value>;

/// Always a sequence, even for zero or one record.
pub type PharmacyList = Vec<PharmacyRecord>;

/// Raw query parameters of a lookup, before validation.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct LookupQuery {
    #[serde(rename = "Q0")]
    pub region: Option<String>,
    #[serde(rename = "Q1")]
    pub sub_region: Option<String>,
    #[serde(rename = "DG")]
    pub weekday: Option<String>,
}

impl LookupQuery {
    pub fn new(region: &str, sub_region: &str, weekday: &str) -> Self {
        Self {
            region: Some(region.to_string()),
            sub_region: Some(sub_region.to_string()),
            weekday: Some(weekday.to_string()),
        }
    }
}

/// A validated lookup. `weekday` holds the code sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub region: String,
    pub sub_region: String,
    pub weekday: String,
}

// Response DTOs for general use across services
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
}
