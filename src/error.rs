use thiserror::Error;

/// Errors returned by strain client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// A credential was not available when building a [`crate::Config`].
    #[error("missing credential '{0}'")]
    MissingCredential(&'static str),

    /// A required request parameter was not provided. Raised before any I/O.
    #[error("missing required parameter '{parameter}'")]
    MissingParameter { parameter: String },

    /// A request parameter was provided with an unusable value. Raised before any I/O.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: String,
        reason: &'static str,
    },

    /// The service reported that the requested resource does not exist.
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be parsed as JSON.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status other than 404, with response payload.
    #[error("server returned status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl ClientError {
    pub(crate) fn missing(parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            parameter: parameter.into(),
        }
    }

    /// Returns `true` when the error is a remote 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the error was raised by local parameter validation.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, Self::MissingParameter { .. })
    }
}
