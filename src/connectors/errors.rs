use reqwest::StatusCode;

/// Errors that can occur while talking to the admin service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConnectorError {
    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Service unreachable or timeout
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// Authentication error (401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Not found (404)
    #[error("Not found: {0}")]
    NotFound(String),
    /// Internal error in connector
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    /// Classify a non-success response status.
    pub fn from_status(status: StatusCode, context: &str, body: &str) -> Self {
        let detail = if body.is_empty() {
            format!("{} ({})", context, status.as_u16())
        } else {
            format!("{} ({}): {}", context, status.as_u16(), body)
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(detail),
            StatusCode::NOT_FOUND => Self::NotFound(detail),
            _ => Self::HttpError(detail),
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}
