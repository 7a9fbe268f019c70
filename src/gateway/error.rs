use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Row not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Remote rejected request ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid gateway URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
