use thiserror::Error;

/// Errors surfaced by `ItemClient`
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or an unreadable response body
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API address cannot hold item paths
    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("{message} ({status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::InvalidUrl { .. } => None,
        }
    }

    /// True when the server reported the item as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_and_status() {
        let err = ClientError::api(404, "Item not found: abc");

        assert_eq!(err.to_string(), "Item not found: abc (404)");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert!(!ClientError::api(400, "bad").is_not_found());
    }
}
