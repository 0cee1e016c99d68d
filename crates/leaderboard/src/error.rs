use thiserror::Error;

use crate::protocol::ErrorCode;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("malformed document: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid collection name {0:?}")]
    InvalidCollection(String),
    #[error("store rejected request ({code:?}): {message}")]
    Rejected { code: ErrorCode, message: String },
    #[error("unexpected response from store")]
    UnexpectedResponse,
    #[error("store closed the connection")]
    Disconnected,
    #[error("store did not answer within {0}ms")]
    Timeout(u64),
}

impl StoreError {
    /// Wire error code reported to clients for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::InvalidCollection(_) => ErrorCode::InvalidCollection,
            StoreError::Rejected { code, .. } => *code,
            _ => ErrorCode::Storage,
        }
    }
}
