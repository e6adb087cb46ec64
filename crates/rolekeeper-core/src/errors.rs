//! Application error type and its classification.
//!
//! Every failure in the service is an [`AppError`]: an [`anyhow::Error`] carrying the
//! cause chain, tagged with one [`ErrorKind`] from a closed set. The kind alone decides
//! the HTTP status; the outermost message of the error is what the caller sees.
//!
//! | Kind | Status |
//! |------|--------|
//! | [`ErrorKind::NotFound`] | 404 |
//! | [`ErrorKind::AlreadyExists`], [`ErrorKind::InconsistentIds`] | 400 |
//! | [`ErrorKind::Forbidden`] | 403 |
//! | [`ErrorKind::PreconditionRequired`] | 428 |
//! | [`ErrorKind::BadRouting`], [`ErrorKind::Internal`] | 500 |

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

/// Message shown to callers when an unclassified failure has no summary of its own.
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// The closed set of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InconsistentIds,
    Forbidden,
    PreconditionRequired,
    /// Route and handler disagree about the request shape. Unreachable when wired correctly.
    BadRouting,
    Internal,
}

impl ErrorKind {
    /// HTTP status for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists | ErrorKind::InconsistentIds => StatusCode::BAD_REQUEST,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::PreconditionRequired => StatusCode::PRECONDITION_REQUIRED,
            ErrorKind::BadRouting | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this kind is a server-side fault rather than a caller mistake.
    pub fn is_internal(self) -> bool {
        matches!(self, ErrorKind::BadRouting | ErrorKind::Internal)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InconsistentIds => "inconsistent_ids",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::PreconditionRequired => "precondition_required",
            ErrorKind::BadRouting => "bad_routing",
            ErrorKind::Internal => "internal",
        }
    }

    /// Message used when an error of this kind is raised without a more specific one.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::AlreadyExists => "this row already exists",
            ErrorKind::InconsistentIds => "inconsistent IDs",
            ErrorKind::Forbidden => "role is not administrator",
            ErrorKind::PreconditionRequired => "a valid authorization header is required",
            ErrorKind::BadRouting => {
                "inconsistent mapping between route and handler (programmer error)"
            }
            ErrorKind::Internal => INTERNAL_MESSAGE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified application error.
#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn already_exists<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::AlreadyExists, err)
    }

    pub fn inconsistent_ids<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InconsistentIds, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Forbidden, err)
    }

    pub fn precondition_required<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::PreconditionRequired, err)
    }

    pub fn bad_routing<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRouting, err)
    }

    /// An unclassified failure. Attach a summary with `anyhow::Context` first; the
    /// outermost message is shown to the caller.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The caller-facing message: the outermost context only, never the cause chain.
    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::BadRouting => INTERNAL_MESSAGE.to_string(),
            _ => self.error.to_string(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message(),
        }
    }
}

impl From<ErrorKind> for AppError {
    fn from(kind: ErrorKind) -> Self {
        AppError::new(kind, anyhow::anyhow!(kind.default_message()))
    }
}

// Anything not explicitly classified is an internal failure with a neutral summary.
impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err.into().context(INTERNAL_MESSAGE))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

/// Errors compare by classification and caller-facing message.
impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message() == other.message()
    }
}

/// JSON body of every failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind.is_internal() {
            error!(kind = %self.kind, error = %format_args!("{:#}", self.error), "Request failed");
        } else {
            warn!(kind = %self.kind, error = %self.error, "Request rejected");
        }

        (self.status(), Json(self.body())).into_response()
    }
}
