use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Culture error
///
/// "No culture found" is not an error: resolution returns `Ok(None)` for it.
/// Every variant here is a usage error raised at the offending call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CultureError {
    // Invalid argument errors 4xxx
    #[error("Invalid argument: {name} must not be empty")]
    MissingArgument { name: &'static str },

    #[error("Invalid culture code: {0}")]
    InvalidCulture(String),

    // Missing dependency errors 5xxx
    #[error("Missing dependency: {0}")]
    MissingDependency(&'static str),
}

impl CultureError {
    /// Helper to create missing argument error
    pub fn missing_argument(name: &'static str) -> Self {
        Self::MissingArgument { name }
    }

    /// Helper to create invalid culture error
    pub fn invalid_culture(value: impl Into<String>) -> Self {
        Self::InvalidCulture(value.into())
    }

    /// Helper to create missing dependency error
    pub fn missing_dependency(name: &'static str) -> Self {
        Self::MissingDependency(name)
    }

    /// True for both empty and malformed arguments
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::MissingArgument { .. } | Self::InvalidCulture(_))
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::MissingArgument { .. } => 4001,
            Self::InvalidCulture(_) => 4002,
            Self::MissingDependency(_) => 5001,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CultureErrorResponse {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for CultureError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = match code {
            4001..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = CultureErrorResponse { code, message: self.to_string() };

        (status, Json(response)).into_response()
    }
}

pub type CultureResult<T> = Result<T, CultureError>;
