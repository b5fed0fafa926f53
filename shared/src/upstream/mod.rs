use async_trait::async_trait;

use crate::config::ServiceKey;
use crate::error::UpstreamError;
use crate::models::LookupRequest;

// Expose the reqwest-backed client
pub mod client;

pub use client::PharmacyApiClient;

/// PharmacySource defines the single outbound call a lookup makes
#[async_trait]
pub trait PharmacySource: Send + Sync + 'static {
    /// Fetches the raw upstream body (XML) for an already-validated request.
    ///
    /// Implementations make exactly one attempt; a non-2xx answer is returned
    /// as [`UpstreamError::Status`] with the raw body attached.
    async fn fetch(
        &self,
        service_key: &ServiceKey,
        request: &LookupRequest,
    ) -> Result<String, UpstreamError>;
}
