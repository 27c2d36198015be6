use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Errors from the extraction pipeline. Everything here is fatal once the
/// fallback path is active — there is no tertiary source. Primary-strategy
/// problems never surface as `ScoutError`; they are recovered locally by
/// switching strategy (see `PrimaryOutcome`).
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Line-up metadata not found: {0}")]
    MetadataNotFound(String),

    #[error("No weekend mapping found for day {day}")]
    NoWeekendForDay { day: String },

    #[error("Feed fetch failed (status {status}): {url}")]
    FeedFetch { status: u16, url: String },

    #[error("Invalid feed document from {url}: {source}")]
    FeedSchema {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Page interaction failed: {0}")]
    Page(#[from] anyhow::Error),
}

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        ScoutError::Network(err.to_string())
    }
}
