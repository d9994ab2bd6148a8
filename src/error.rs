//! Error type shared by the OMDb client, the poster loader and the config loader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// The body was not the JSON shape OMDb documents.
    #[error("Could not parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// OMDb answered with `Response: "False"`.
    #[error("{0}")]
    NotFound(String),

    #[error("No OMDb API key configured")]
    MissingApiKey,

    #[error("Could not decode poster: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
