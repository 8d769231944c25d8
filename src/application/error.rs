use thiserror::Error;

const UNAUTHORIZED_FALLBACK: &str = "Your session has expired. Please sign in again.";
const NOT_FOUND_FALLBACK: &str = "The requested record could not be found.";
const VALIDATION_FALLBACK: &str = "The request could not be processed.";
const SERVER_FALLBACK: &str = "The server failed to handle the request.";

/// Failure of a single call against the platform REST API.
///
/// Every variant carries a message fit for display; server-supplied messages
/// take precedence over the generic fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("request rejected: {message}")]
    Validation { message: String },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("network failure: {message}")]
    Network { message: String },
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.filter(|text| !text.trim().is_empty());
        match status {
            401 | 403 => Self::Unauthorized {
                message: message.unwrap_or_else(|| UNAUTHORIZED_FALLBACK.to_string()),
            },
            404 => Self::NotFound {
                message: message.unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string()),
            },
            400..=499 => Self::Validation {
                message: message.unwrap_or_else(|| VALIDATION_FALLBACK.to_string()),
            },
            _ => Self::Server {
                status,
                message: message.unwrap_or_else(|| SERVER_FALLBACK.to_string()),
            },
        }
    }

    pub fn missing_session() -> Self {
        Self::Unauthorized {
            message: "You are not signed in.".to_string(),
        }
    }

    pub fn rejected(message: Option<String>) -> Self {
        Self::Validation {
            message: message
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| VALIDATION_FALLBACK.to_string()),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Message suitable for a notification or inline error panel.
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Validation { message }
            | Self::Server { message, .. }
            | Self::Network { message }
            | Self::MalformedResponse { message } => message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Server { .. } => "server",
            Self::Network { .. } => "network",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert!(ApiError::from_status(401, None).is_unauthorized());
        assert!(ApiError::from_status(403, None).is_unauthorized());
        assert_eq!(ApiError::from_status(404, None).kind(), "not_found");
        assert_eq!(ApiError::from_status(422, None).kind(), "validation");
        assert_eq!(ApiError::from_status(409, None).kind(), "validation");
        assert_eq!(ApiError::from_status(500, None).kind(), "server");
        assert_eq!(ApiError::from_status(503, None).kind(), "server");
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::from_status(400, Some("Title already exists".into()));
        assert_eq!(err.message(), "Title already exists");

        let blank = ApiError::from_status(500, Some("   ".into()));
        assert_eq!(blank.message(), SERVER_FALLBACK);
    }
}
