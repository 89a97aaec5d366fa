//! Error types for the synchronization pipeline.
//!
//! Failures are split by scope: [`FetchError`] describes one failed round trip
//! to the judge, [`SkipReason`] explains why a single submission produced no
//! file, and [`SyncError`] is reserved for failures that end the whole run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::Cursor;

/// A failed request against the remote judge.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body did not have the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// The response carried an application-level error envelope.
    #[error("API error: {0}")]
    Api(String),
}

/// Why a submission summary was not turned into a file.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("submission status is {0}, not Accepted")]
    NotAccepted(String),

    /// The slug cannot be used as a file name inside the solutions directory.
    #[error("title slug {0:?} is not a plain file name")]
    UnsafeSlug(String),

    #[error("failed to fetch submission detail: {0}")]
    DetailFetchFailed(#[source] FetchError),

    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A failure that aborts the sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Required configuration is missing or invalid. Raised before any request.
    #[error("configuration error: {message}")]
    Config {
        message: String,
        /// The setting that caused the error (e.g. "session").
        key: Option<String>,
    },

    /// A page of the submission index could not be fetched or decoded.
    #[error("failed to fetch index page {page} at cursor {cursor}: {source}")]
    Index {
        page: usize,
        cursor: Cursor,
        #[source]
        source: FetchError,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SyncError {
    pub(crate) fn config(message: impl Into<String>, key: &str) -> Self {
        SyncError::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
