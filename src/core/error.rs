use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("World object source failed: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

pub type Result<T> = std::result::Result<T, RadarError>;

impl RadarError {
    pub fn source_failed(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}
