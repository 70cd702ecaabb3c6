//! Remote API error types.

/// Errors that can occur while talking to the remote fitness service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (connection refused, timeout, ...)
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body did not match the expected shape
    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 500,
            url: "http://localhost:8080/goal/1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server returned status 500 for http://localhost:8080/goal/1"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::NotFound("http://localhost:8080/goal/9".to_string());
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/goal/9"));
    }
}
