//! Response bodies and the mapping from [`Error`] to HTTP status.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body text for every 5xx response; the detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// `{"message": ...}`, used by create/delete endpoints and every error.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{"response": ...}`, used by list endpoints.
#[derive(Debug, Serialize)]
pub struct ResponseBody<T> {
    pub response: T,
}

/// A status code with a `{"message": ...}` body.
pub fn message(status: StatusCode, text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        status,
        Json(MessageBody {
            message: text.into(),
        }),
    )
}

impl Error {
    /// The HTTP status this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::UnknownContributor { .. }
            | Self::ContributionNotFound { .. }
            | Self::ExpenseNotFound { .. }
            | Self::InvalidUniqueId { .. }
            | Self::MissingIdentity => StatusCode::BAD_REQUEST,
            Self::ContributorNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ZeroTotal
            | Self::TotalOverflow
            | Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::EnvVar(_)
            | Self::AddrParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            return message(status, INTERNAL_ERROR_MESSAGE).into_response();
        }

        tracing::debug!("Request rejected ({}): {}", status, self);
        message(status, self.to_string()).into_response()
    }
}
