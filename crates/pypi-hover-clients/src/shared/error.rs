use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/**
    Error for a single remote metadata request.

    One request maps to at most one of these - there are
    no retries, so the first failure is the final one.
*/
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request to '{url}' failed with status {status}")]
    Status { status: StatusCode, url: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Fault in the backing cache store. Never auto-repaired, only reported.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache store i/o error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cache store database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("corrupt cache record: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("cache store lock poisoned")]
    Poisoned,
    #[error("no cache directory available on this system")]
    NoCacheDir,
}
