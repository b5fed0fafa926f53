use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, info, warn};
use pharmacy_shared::{ErrorResponse, LookupError};
use thiserror::Error;

pub const CONFIGURATION_MESSAGE: &str = "Server configuration error";
pub const MISSING_PARAMETERS_MESSAGE: &str = "Missing required parameters: Q0, Q1, DG";
pub const MALFORMED_UPSTREAM_MESSAGE: &str = "Malformed response from upstream API";
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch pharmacy information";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    #[error("Malformed upstream response: {0}")]
    MalformedUpstream(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::MissingCredential => AppError::Configuration(err.to_string()),
            LookupError::MissingParameters(_) => AppError::BadRequest(err.to_string()),
            LookupError::UpstreamRejected {
                status,
                message,
                code,
            } => AppError::Upstream {
                status,
                message,
                detail: code,
            },
            LookupError::MalformedResponse(reason) => AppError::MalformedUpstream(reason),
            LookupError::UpstreamUnavailable(reason) => AppError::InternalServerError(reason),
        }
    }
}

// Upstream statuses are forwarded only when they are real error codes.
fn forwarded_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Configuration(reason) => {
                error!("Configuration error: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(CONFIGURATION_MESSAGE),
                )
            }
            AppError::BadRequest(reason) => {
                warn!("Bad request error: {}", reason);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(MISSING_PARAMETERS_MESSAGE),
                )
            }
            AppError::Upstream {
                status,
                message,
                detail,
            } => {
                warn!("Upstream error: status={} message={}", status, message);
                (forwarded_status(status), ErrorResponse { message, detail })
            }
            AppError::MalformedUpstream(reason) => {
                error!("Malformed upstream response: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(MALFORMED_UPSTREAM_MESSAGE),
                )
            }
            AppError::InternalServerError(reason) => {
                error!("Internal server error: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(UPSTREAM_FAILURE_MESSAGE),
                )
            }
        };

        info!(
            "Returning error response: status={}, message={}",
            status, body.message
        );
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_errors_map_to_tiers() {
        assert!(matches!(
            AppError::from(LookupError::MissingCredential),
            AppError::Configuration(_)
        ));
        assert!(matches!(
            AppError::from(LookupError::MissingParameters(vec!["Q0"])),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(LookupError::MalformedResponse("x".into())),
            AppError::MalformedUpstream(_)
        ));
        assert!(matches!(
            AppError::from(LookupError::UpstreamUnavailable("x".into())),
            AppError::InternalServerError(_)
        ));
    }

    #[test]
    fn forwarded_status_only_passes_error_codes() {
        assert_eq!(forwarded_status(401), StatusCode::UNAUTHORIZED);
        assert_eq!(forwarded_status(503), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(forwarded_status(302), StatusCode::BAD_GATEWAY);
        assert_eq!(forwarded_status(42), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_error_keeps_message_and_detail() {
        let response = AppError::Upstream {
            status: 429,
            message: "LIMITED NUMBER OF SERVICE REQUESTS EXCEEDS ERROR.".into(),
            detail: Some("22".into()),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
