//! Q&A Error Types
//!
//! This module provides Q&A-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Three tiers:
//! - input validation (400, message returned verbatim)
//! - business rules on votes (409 / 403)
//! - store access (500, one fixed message; the cause is only logged)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::document_store::StoreError;
use thiserror::Error;

/// Q&A-specific result type alias
pub type QaResult<T> = Result<T, QaError>;

/// Message returned to callers for every store failure
pub const STORE_ACCESS_MESSAGE: &str = "Error while accessing the database.";

/// Q&A-specific error variants
#[derive(Debug, Error)]
pub enum QaError {
    #[error("The session cannot have an empty id.")]
    EmptySessionId,

    #[error("The session cannot have an invalid id.")]
    InvalidSessionId,

    #[error("The question cannot be empty.")]
    EmptyQuestion,

    #[error("The question needs between {min} and {max} characters.")]
    QuestionLength { min: usize, max: usize },

    /// Only containment of `?` is required, despite the wording
    #[error("The question has to end with a '?'.")]
    MissingQuestionMark,

    #[error("The question cannot have an empty id.")]
    EmptyQuestionId,

    #[error("The user cannot have an empty id.")]
    EmptyUserId,

    /// Request body present but not a JSON object of the expected shape
    #[error("The request body is not a valid JSON object.")]
    MalformedBody { reason: String },

    #[error("This user already liked this question.")]
    AlreadyLiked,

    #[error("This user never liked this question.")]
    NeverLiked,

    #[error("You can't downvote your own question.")]
    OwnQuestion,

    /// Store unreachable, rejected the request, or timed out
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Store answered with a document that does not match the schema
    #[error("Malformed document at {path}: {reason}")]
    MalformedDocument { path: String, reason: String },
}

impl QaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QaError::EmptySessionId
            | QaError::InvalidSessionId
            | QaError::EmptyQuestion
            | QaError::QuestionLength { .. }
            | QaError::MissingQuestionMark
            | QaError::EmptyQuestionId
            | QaError::EmptyUserId
            | QaError::MalformedBody { .. } => ErrorKind::BadRequest,
            QaError::AlreadyLiked | QaError::NeverLiked => ErrorKind::Conflict,
            QaError::OwnQuestion => ErrorKind::Forbidden,
            QaError::Store(_) | QaError::MalformedDocument { .. } => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// True for the store-access tier
    pub fn is_store_access(&self) -> bool {
        matches!(self, QaError::Store(_) | QaError::MalformedDocument { .. })
    }

    /// Message safe to hand to the caller
    pub fn public_message(&self) -> String {
        if self.is_store_access() {
            STORE_ACCESS_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QaError::Store(e) => {
                tracing::error!(error = %e, "Q&A store access failed");
            }
            QaError::MalformedDocument { path, reason } => {
                tracing::error!(path = %path, reason = %reason, "Q&A store returned malformed document");
            }
            QaError::MalformedBody { reason } => {
                tracing::debug!(reason = %reason, "Q&A request body rejected");
            }
            QaError::AlreadyLiked | QaError::NeverLiked | QaError::OwnQuestion => {
                tracing::warn!(error = %self, "Q&A vote rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Q&A input rejected");
            }
        }
    }
}

impl From<QaError> for AppError {
    fn from(err: QaError) -> Self {
        let app_err = AppError::new(err.kind(), err.public_message());
        if err.is_store_access() {
            app_err
                .with_action("Please try again later")
                .with_source(err)
        } else {
            app_err
        }
    }
}

impl IntoResponse for QaError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
