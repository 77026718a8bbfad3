use thiserror::Error;

pub type Result<T> = std::result::Result<T, FactIndexError>;

#[derive(Debug, Error)]
pub enum FactIndexError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("search unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl FactIndexError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Unavailable(_) => "SEARCH_UNAVAILABLE",
            Self::Backend(_) => "BACKEND_ERROR",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Http(_) => "HTTP_ERROR",
        }
    }

    /// Failures that come from talking to the hosted service rather than from
    /// local input.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Backend(_) | Self::MalformedResponse(_) | Self::Http(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(FactIndexError::Config("x".into()).code(), "CONFIG_ERROR");
        assert_eq!(
            FactIndexError::Unavailable("x".into()).code(),
            "SEARCH_UNAVAILABLE"
        );
        assert_eq!(
            FactIndexError::MalformedResponse("x".into()).code(),
            "MALFORMED_RESPONSE"
        );
    }

    #[test]
    fn only_backend_failures_are_transient() {
        assert!(FactIndexError::Backend("503".into()).is_transient());
        assert!(FactIndexError::MalformedResponse("hits".into()).is_transient());
        assert!(!FactIndexError::Config("app id".into()).is_transient());
        assert!(!FactIndexError::Validation("objectID".into()).is_transient());
    }
}
