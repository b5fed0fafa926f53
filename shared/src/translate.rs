use log::{debug, warn};

use crate::error::{LookupError, UpstreamError};
use crate::normalize::extract_result_message;
use crate::xml::to_json;

/// Decides how a failed upstream call is reported.
///
/// A non-2xx body is parsed as XML too: a `resultMsg` in its header is
/// forwarded with the upstream status, a body that does not parse is a
/// malformed response, and anything else is a plain upstream failure.
pub fn translate_upstream_failure(err: UpstreamError) -> LookupError {
    match err {
        UpstreamError::Transport(message) => {
            warn!("Upstream transport failure: {}", message);
            LookupError::UpstreamUnavailable(message)
        }
        UpstreamError::Status { status, body: None } => {
            warn!("Upstream returned status {} with no body", status);
            LookupError::UpstreamUnavailable(format!("status {} with empty body", status))
        }
        UpstreamError::Status {
            status,
            body: Some(body),
        } => {
            debug!("Upstream error body ({} bytes): {}", body.len(), body);
            let document = match to_json(&body) {
                Ok(document) => document,
                Err(err) => {
                    warn!("Upstream error body for status {} is not XML: {}", status, err);
                    return LookupError::MalformedResponse(format!(
                        "status {} error body: {}",
                        status, err
                    ));
                }
            };

            match extract_result_message(&document) {
                Some(upstream) => {
                    warn!(
                        "Upstream rejected request: status={} code={:?} message={:?}",
                        status, upstream.code, upstream.message
                    );
                    LookupError::UpstreamRejected {
                        status,
                        message: upstream.message,
                        code: upstream.code,
                    }
                }
                None => {
                    warn!("Upstream status {} carried no result message", status);
                    LookupError::UpstreamUnavailable(format!(
                        "status {} without result message",
                        status
                    ))
                }
            }
        }
    }
}
