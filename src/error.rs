use thiserror::Error;

#[derive(Error, Debug)]
pub enum DivscanError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}: {body_preview}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
        body_preview: String,
    },

    #[error("Symbol not found")]
    NotFound,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DivscanError>;
