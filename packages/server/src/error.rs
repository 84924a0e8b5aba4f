//! Request failures as HTTP responses.
//!
//! Callers get a fixed message and a code per failure class. The
//! underlying diagnostic is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::error;

use cafs_numeric::OperationError;
use cafs_resource::Error as ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicErrorCode {
    InvalidInput,
    NotFound,
    MalformedPayload,
    ArithmeticOverflow,
    UpstreamUnavailable,
    Internal,
}

impl PublicErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::MalformedPayload => "MALFORMED_PAYLOAD",
            Self::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Internal => "INTERNAL",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedPayload | Self::ArithmeticOverflow => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid request",
            Self::NotFound => "resource not found",
            Self::MalformedPayload => "resource content is not a number",
            Self::ArithmeticOverflow => "result out of range",
            Self::UpstreamUnavailable => "store unavailable",
            Self::Internal => "internal error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// The request could not be parsed far enough to reach an operation.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<ResourceError> for ApiError {
    fn from(e: ResourceError) -> Self {
        ApiError::Operation(e.into())
    }
}

impl ApiError {
    pub fn code(&self) -> PublicErrorCode {
        match self {
            ApiError::BadRequest(_) => PublicErrorCode::InvalidInput,
            ApiError::Operation(e) => match e {
                OperationError::InvalidRequest { .. } => PublicErrorCode::InvalidInput,
                OperationError::ArithmeticOverflow { .. } => PublicErrorCode::ArithmeticOverflow,
                OperationError::Resource(ResourceError::NotFound { .. }) => {
                    PublicErrorCode::NotFound
                }
                OperationError::Resource(ResourceError::MalformedPayload { .. }) => {
                    PublicErrorCode::MalformedPayload
                }
                OperationError::Resource(ResourceError::Transport { .. }) => {
                    PublicErrorCode::UpstreamUnavailable
                }
                OperationError::Resource(ResourceError::Encode(_))
                | OperationError::InvalidRoleTable { .. } => PublicErrorCode::Internal,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        error!(error = %self, code = code.as_str(), "request failed");

        let body = ErrorBody {
            error: code.message(),
            code: code.as_str(),
        };
        (code.status(), Json(body)).into_response()
    }
}
