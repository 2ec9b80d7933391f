use thiserror::Error;

/// Main error type for the Odin provider
#[derive(Error, Debug)]
pub enum OdinError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Odin API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Canister error: {0}")]
    Canister(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OdinError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, OdinError::Connection(_) | OdinError::RateLimit(_))
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            OdinError::Connection(_) => "connection_error",
            OdinError::RateLimit(_) => "rate_limit",
            OdinError::Api { .. } => "api_error",
            OdinError::Parse(_) => "parse_error",
            OdinError::Validation(_) => "validation_error",
            OdinError::Canister(_) => "canister_error",
            OdinError::Config(_) => "config_error",
            OdinError::ResourceNotFound(_) => "resource_not_found",
            OdinError::Internal(_) => "internal_error",
        }
    }
}

impl From<reqwest::Error> for OdinError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OdinError::Connection(
                "Request timeout. Please check your internet connection.".to_string(),
            )
        } else if err.is_connect() {
            OdinError::Connection(
                "Failed to connect to Odin API. Please check your internet connection."
                    .to_string(),
            )
        } else if let Some(status) = err.status() {
            status_error(status.as_u16(), None)
        } else if err.is_decode() {
            OdinError::Parse(format!("Invalid response body: {}", err))
        } else {
            OdinError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for OdinError {
    fn from(err: serde_json::Error) -> Self {
        OdinError::Parse(format!("JSON parsing failed: {}", err))
    }
}

impl From<ic_agent::AgentError> for OdinError {
    fn from(err: ic_agent::AgentError) -> Self {
        OdinError::Canister(err.to_string())
    }
}

impl From<candid::Error> for OdinError {
    fn from(err: candid::Error) -> Self {
        OdinError::Canister(format!("Candid encoding failed: {}", err))
    }
}

/// Classifies a non-success HTTP status, keeping the upstream message when there is one
pub fn status_error(status: u16, message: Option<String>) -> OdinError {
    match status {
        429 => OdinError::RateLimit(message.unwrap_or_else(|| {
            "Too many requests to Odin API. Retry after 60 seconds.".to_string()
        })),
        500..=599 => OdinError::Connection(message.unwrap_or_else(|| {
            format!(
                "Odin server error (HTTP {}). Please try again later.",
                status
            )
        })),
        _ => OdinError::Api {
            status,
            message: message.unwrap_or_else(|| format!("HTTP error {}", status)),
        },
    }
}

pub type Result<T> = std::result::Result<T, OdinError>;

impl From<OdinError> for rmcp::model::ErrorData {
    fn from(err: OdinError) -> Self {
        match err {
            OdinError::Validation(msg) => rmcp::model::ErrorData::invalid_params(msg, None),
            OdinError::ResourceNotFound(msg) => {
                rmcp::model::ErrorData::resource_not_found(msg, None)
            }
            other => rmcp::model::ErrorData::internal_error(other.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(status_error(429, None), OdinError::RateLimit(_)));
        assert!(matches!(status_error(503, None), OdinError::Connection(_)));
        assert!(matches!(
            status_error(404, None),
            OdinError::Api { status: 404, .. }
        ));
    }

    #[test]
    fn test_status_error_keeps_upstream_message() {
        let err = status_error(400, Some("Token not found".to_string()));
        assert_eq!(err.to_string(), "Odin API error (400): Token not found");
    }

    #[test]
    fn test_retryable() {
        assert!(OdinError::Connection("x".into()).is_retryable());
        assert!(OdinError::RateLimit("x".into()).is_retryable());
        assert!(!OdinError::Validation("x".into()).is_retryable());
        assert_eq!(OdinError::Canister("x".into()).error_type(), "canister_error");
    }
}
