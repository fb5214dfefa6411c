//! Error types for the repodash client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the dashboard backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (connection refused, DNS, ...)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// The response body was not the expected JSON shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create a transport error from status code and body
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) => None,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_status() {
        let err = ClientError::transport(503, "unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }

    #[test]
    fn test_parse_has_no_status() {
        let err = ClientError::Parse("expected array".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
    }
}
