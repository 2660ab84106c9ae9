use thiserror::Error;

/// Main error type for Elasticsearch client operations.
///
/// Server-side failures (4xx/5xx) are not errors: they come back as a normal
/// [`Response`](crate::Response). Only local and transport failures land here.
#[derive(Debug, Error)]
pub enum EsError {
    /// Method string that is not one of get, post, put, delete
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Transport used out of sequence or failed without a richer cause
    #[error("transport error: {0}")]
    Transport(String),

    /// Request target that cannot be sent as given
    #[error("invalid request path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Header name or value rejected by the HTTP engine
    #[error("invalid header: {name}")]
    InvalidHeader { name: String },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EsError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        EsError::Transport(message.into())
    }

    /// Check if this error came from the network layer or the request sequence
    pub fn is_transport(&self) -> bool {
        matches!(self, EsError::Transport(_) | EsError::Http(_))
    }

    /// Check if the request was refused before anything was sent, because of
    /// an argument the caller supplied
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EsError::UnsupportedMethod(_) | EsError::InvalidPath { .. } | EsError::InvalidHeader { .. }
        )
    }
}

/// Result type for Elasticsearch client operations
pub type Result<T> = std::result::Result<T, EsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_method_message() {
        let error = EsError::UnsupportedMethod("patch".to_string());
        assert_eq!(error.to_string(), "unsupported HTTP method: patch");
        assert!(!error.is_transport());
        assert!(error.is_caller_error());
    }

    #[test]
    fn test_invalid_path_classification() {
        let error = EsError::InvalidPath {
            path: "/books/_doc/..".to_string(),
            reason: "contains a dot segment".to_string(),
        };
        assert!(error.is_caller_error());
        assert!(!error.is_transport());
        assert_eq!(
            error.to_string(),
            "invalid request path \"/books/_doc/..\": contains a dot segment"
        );
    }

    #[test]
    fn test_transport_error() {
        let error = EsError::transport("no request in progress");
        assert!(error.is_transport());
        assert!(!error.is_caller_error());
        assert_eq!(error.to_string(), "transport error: no request in progress");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let error: EsError = parse.unwrap_err().into();
        assert!(matches!(error, EsError::Json(_)));
    }
}
