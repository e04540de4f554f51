//! Error types for muec-core

use std::time::Duration;

use thiserror::Error;

/// Main error type for muec-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required credential(s): {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error: {status} - {body}")]
    GeminiApi { status: u16, body: String },

    #[error("Gemini API returned no text")]
    EmptyResponse,

    #[error("AI gateway timed out after {0:?}")]
    Timeout(Duration),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for muec-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_names_every_variable() {
        let err = Error::MissingCredentials(vec!["DISCORD_TOKEN", "GEMINI_API_KEY"]);
        assert_eq!(
            err.to_string(),
            "missing required credential(s): DISCORD_TOKEN, GEMINI_API_KEY"
        );
    }

    #[test]
    fn test_gemini_api_error_display() {
        let err = Error::GeminiApi {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini API error: 403 - forbidden");
    }
}
