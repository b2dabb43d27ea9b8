use classmap_api::VisitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
    #[error(transparent)]
    Remap(#[from] VisitError),
}

pub type Result<T> = std::result::Result<T, ClassmapError>;
