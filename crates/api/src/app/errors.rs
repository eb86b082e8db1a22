use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use ballotgate_auth::AuthError;
use ballotgate_core::DomainError;
use ballotgate_infra::{VerifyError, VoterStoreError};

/// Everything a handler can fail with, mapped to a status only here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Validation(String),

    #[error("Voter ID already exists")]
    Duplicate,

    /// Backend detail stays in the log; callers only see a generic message.
    #[error("Database error")]
    Store(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(AuthError::Forbidden) => StatusCode::FORBIDDEN,
            ApiError::Auth(AuthError::Issue(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::Duplicate => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Auth(AuthError::InvalidCredentials) => "invalid_credentials",
            ApiError::Auth(AuthError::MissingCredential) => "missing_credential",
            ApiError::Auth(AuthError::InvalidToken) => "invalid_token",
            ApiError::Auth(AuthError::TokenExpired) => "token_expired",
            ApiError::Auth(AuthError::Forbidden) => "forbidden",
            ApiError::Auth(AuthError::Issue(_)) => "internal_error",
            ApiError::Validation(_) => "validation_error",
            ApiError::Duplicate => "duplicate_voter",
            ApiError::Store(_) => "database_error",
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Auth(AuthError::Issue(_)) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<VoterStoreError> for ApiError {
    fn from(err: VoterStoreError) -> Self {
        match err {
            VoterStoreError::Duplicate(_) => ApiError::Duplicate,
            VoterStoreError::Backend(detail) => ApiError::Store(detail),
        }
    }
}

impl From<VerifyError> for ApiError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Auth(e) => ApiError::Auth(e),
            VerifyError::Store(e) => e.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Store(detail) => tracing::error!(detail = %detail, "voter store failure"),
            ApiError::Auth(AuthError::Issue(detail)) => {
                tracing::error!(detail = %detail, "failed to issue session token")
            }
            _ => {}
        }
        json_error(self.status(), self.code(), self.public_message())
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
