//! Errors returned by [`ApiClient`](crate::ApiClient).

/// Errors from the Rookery HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The server answered with something other than JSON.
    #[error("Invalid response format ({status}): expected JSON, got {content_type}")]
    UnexpectedContentType { status: u16, content_type: String },

    /// The JSON body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Every read attempt failed.
    #[error("Failed to fetch data after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl ClientError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } | Self::UnexpectedContentType { status, .. } => Some(*status),
            Self::Decode(_) | Self::RetriesExhausted { .. } => None,
        }
    }

    /// Whether another attempt could succeed. Client errors (4xx) and
    /// malformed bodies are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Decode(_) | Self::RetriesExhausted { .. } => false,
            _ => !matches!(self.status(), Some(400..=499)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_final() {
        let err = ClientError::Api {
            status: 404,
            message: "Observation with id 1 not found".into(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = ClientError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_retryable());

        let err = ClientError::UnexpectedContentType {
            status: 200,
            content_type: "text/html".into(),
        };
        assert!(err.is_retryable());
    }
}
