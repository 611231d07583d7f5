//! Error types for douyin-mcp

use thiserror::Error;

/// Main error type for douyin-mcp operations
#[derive(Debug, Error)]
pub enum DouyinError {
    #[error("Failed to resolve share link: {0}")]
    Resolution(String),

    #[error("Failed to download video: {0}")]
    Download(String),

    #[error("Cannot create or access working directory: {0}")]
    FatalStartup(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

impl DouyinError {
    /// Wrap any failure into a resolution error carrying its message
    pub fn resolution(cause: impl std::fmt::Display) -> Self {
        DouyinError::Resolution(cause.to_string())
    }

    /// Wrap any failure into a download error carrying its message
    pub fn download(cause: impl std::fmt::Display) -> Self {
        DouyinError::Download(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_keeps_cause_text() {
        let err = DouyinError::resolution("no valid share link found");
        assert_eq!(
            err.to_string(),
            "Failed to resolve share link: no valid share link found"
        );

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = DouyinError::download(io);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_config_error_message() {
        let err = DouyinError::InvalidConfig("invalid user agent".into());
        assert_eq!(err.to_string(), "Invalid configuration: invalid user agent");
    }
}
