use std::path::PathBuf;
use thiserror::Error as TError;

#[derive(TError, Debug)]
pub enum UploadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The media host answered `success: false` for a part.
    #[error("part {part} rejected by remote: {message}")]
    Rejected { part: usize, message: String },

    #[error("upload cancelled")]
    Cancelled,

    #[error("reply carries no ivr path: {raw}")]
    NoReference { raw: String },

    #[error("reply is not valid json: {raw}")]
    UnparseableReply { raw: String },

    #[error("{0}")]
    Other(String),
}

impl From<String> for UploadError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for UploadError {
    fn from(s: &str) -> Self {
        Self::Other(s.into())
    }
}

pub type UploadResult<T> = Result<T, UploadError>;
