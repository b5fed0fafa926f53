use thiserror::Error;

pub type Result<T> = std::result::Result<T, LookupError>;

/// Failures while converting an XML document into JSON.
#[derive(Error, Debug, PartialEq)]
pub enum XmlError {
    #[error("XML parse error at position {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("XML document has no root element")]
    Empty,

    #[error("XML document ended inside <{0}>")]
    UnexpectedEof(String),
}

/// Failures of the single outbound call.
#[derive(Error, Debug, Clone)]
pub enum UpstreamError {
    /// Network failure before any HTTP status was received.
    #[error("Upstream transport error: {0}")]
    Transport(String),

    /// Non-2xx status, with the raw body when the upstream sent one.
    #[error("Upstream returned status {status}")]
    Status { status: u16, body: Option<String> },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the service key; never let it into messages.
        UpstreamError::Transport(err.without_url().to_string())
    }
}

/// Everything that can end a lookup, grouped into configuration, client input
/// and upstream failures.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Upstream service key is not configured")]
    MissingCredential,

    #[error("Missing required parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    #[error("Upstream rejected the request ({status}): {message}")]
    UpstreamRejected {
        status: u16,
        message: String,
        code: Option<String>,
    },

    #[error("Upstream request failed: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl LookupError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, LookupError::MissingParameters(_))
    }
}

impl From<XmlError> for LookupError {
    fn from(err: XmlError) -> Self {
        LookupError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_lists_names() {
        let err = LookupError::MissingParameters(vec!["Q0", "DG"]);
        assert_eq!(err.to_string(), "Missing required parameters: Q0, DG");
        assert!(err.is_client_error());
    }

    #[test]
    fn xml_errors_become_malformed_responses() {
        let err: LookupError = XmlError::Empty.into();
        assert!(matches!(err, LookupError::MalformedResponse(_)));
        assert!(!err.is_client_error());
    }
}
