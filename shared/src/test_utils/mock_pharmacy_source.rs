use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::ServiceKey;
use crate::error::UpstreamError;
use crate::models::LookupRequest;
use crate::upstream::PharmacySource;

/// MockPharmacySource answers every fetch with a canned result and records
/// the requests it was given
pub struct MockPharmacySource {
    response: Result<String, UpstreamError>,
    calls: Mutex<Vec<LookupRequest>>,
}

impl MockPharmacySource {
    /// Create a source that returns `body` as a successful upstream answer
    pub fn with_body(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a source that fails every call with `error`
    pub fn with_error(error: UpstreamError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order
    pub fn calls(&self) -> Vec<LookupRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PharmacySource for MockPharmacySource {
    async fn fetch(
        &self,
        _service_key: &ServiceKey,
        request: &LookupRequest,
    ) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}
