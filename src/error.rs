//! Error types for restscout
//!
//! This module defines the error hierarchy for the crate.
//! All fallible public APIs return `Result<T, Error>` where Error is
//! defined here. Note that discovery itself never surfaces an Error to
//! its caller: stage failures are folded into `DiscoveryResult.errors`.

use thiserror::Error;

/// The main error type for restscout
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Spec parse error: {message}")]
    SpecParse { message: String },

    // ============================================================================
    // Probe Errors
    // ============================================================================
    #[error("Probe of '{path}' failed: {message}")]
    Probe { path: String, message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a spec parse error
    pub fn spec_parse(message: impl Into<String>) -> Self {
        Self::SpecParse {
            message: message.into(),
        }
    }

    /// Create a probe error
    pub fn probe(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error was caused by a request timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Result type alias for restscout
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
