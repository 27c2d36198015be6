use thiserror::Error;

pub type Result<T> = std::result::Result<T, StagehandError>;

#[derive(Debug, Error)]
pub enum StagehandError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing data in response: {0}")]
    MissingData(String),
}

impl From<reqwest::Error> for StagehandError {
    fn from(err: reqwest::Error) -> Self {
        StagehandError::Network(err.to_string())
    }
}
