use thiserror::Error;

/// Failure of a single request against the backend API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was received.
    #[error("network error on {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("http status {status} on {endpoint}")]
    Http {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// The body could not be decoded into the expected type.
    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A payload was rejected locally before it was sent.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            FetchError::Network { endpoint, .. }
            | FetchError::Http { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::FetchError;

    #[test]
    fn test_http_error_identity() {
        let err = FetchError::Http {
            status: 404,
            endpoint: "http://127.0.0.1:8000/api/casos/9/".to_owned(),
            body: "{\"detail\":\"Not found.\"}".to_owned(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_network());
        assert_eq!(err.endpoint(), Some("http://127.0.0.1:8000/api/casos/9/"));
        assert_eq!(
            err.to_string(),
            "http status 404 on http://127.0.0.1:8000/api/casos/9/"
        );
    }

    #[test]
    fn test_validation_error_has_no_endpoint() {
        let err = FetchError::Validation("monto must be positive".to_owned());
        assert_eq!(err.status(), None);
        assert_eq!(err.endpoint(), None);
    }
}
