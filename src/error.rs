use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures raised while handling an Instant Payment Notification.
///
/// Every variant means the notification must not be trusted; callers do not
/// recover locally.
#[derive(Error, Debug)]
pub enum IpnError {
    #[error("Missing IPN POST data")]
    MissingPayload,

    #[error("IPN validation request failed: {0}")]
    Transport(String),

    #[error("PayPal responded with HTTP status {0}")]
    UnexpectedStatus(u16),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for IpnError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            IpnError::MissingPayload => (StatusCode::BAD_REQUEST, "Missing IPN POST data", None),
            IpnError::Transport(msg) => {
                tracing::error!("IPN validation transport error: {}", msg);
                (StatusCode::BAD_GATEWAY, "IPN validation failed", Some(msg.clone()))
            }
            IpnError::UnexpectedStatus(code) => {
                tracing::error!("PayPal replied with HTTP status {}", code);
                (
                    StatusCode::BAD_GATEWAY,
                    "Unexpected PayPal response status",
                    Some(code.to_string()),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, IpnError>;
