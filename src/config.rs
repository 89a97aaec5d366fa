//! Run configuration.
//!
//! Everything a sync run needs is gathered into one [`SyncConfig`] that is
//! handed to the source and the materializer at construction time. The binary
//! builds it from command-line arguments and environment variables.

use crate::error::SyncError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://leetcode.com";
pub const DEFAULT_SOLUTIONS_DIR: &str = "solutions";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which listing the submission index is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SourceKind {
    /// GraphQL `recentAcSubmissionList`: accepted only, offset paged, needs a username.
    #[default]
    Graphql,
    /// REST `/api/submissions/`: every verdict, paged by continuation key.
    Rest,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Value of the `LEETCODE_SESSION` cookie.
    pub session: String,
    /// Optional `csrftoken` cookie, sent along with the session when present.
    pub csrf_token: Option<String>,
    pub username: String,
    /// Site root, e.g. "https://leetcode.com".
    pub endpoint: String,
    pub solutions_dir: PathBuf,
    pub page_size: u32,
    /// Upper bound for every HTTP round trip.
    pub timeout: Duration,
    /// Stop enumerating after this many pages.
    pub max_pages: Option<usize>,
    pub source: SourceKind,
}

impl SyncConfig {
    pub fn new(session: impl Into<String>, username: impl Into<String>) -> Self {
        SyncConfig {
            session: session.into(),
            csrf_token: None,
            username: username.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            solutions_dir: PathBuf::from(DEFAULT_SOLUTIONS_DIR),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_pages: None,
            source: SourceKind::default(),
        }
    }

    /// Checks the configuration before any request is made.
    ///
    /// [`Synchronizer::run`](crate::sync::Synchronizer::run) calls this first;
    /// callers do not need to validate on their own.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The run can start.
    /// * `Err(SyncError::Config)` - A required credential or setting is missing or invalid.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.session.trim().is_empty() {
            return Err(SyncError::config("missing LeetCode session cookie", "session"));
        }
        if self.source == SourceKind::Graphql && self.username.trim().is_empty() {
            return Err(SyncError::config(
                "missing LeetCode username (required by the graphql source)",
                "username",
            ));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(SyncError::config(
                format!("endpoint must be an http(s) URL, got {:?}", self.endpoint),
                "endpoint",
            ));
        }
        if self.page_size == 0 {
            return Err(SyncError::config("page size must be at least 1", "page_size"));
        }
        if self.max_pages == Some(0) {
            return Err(SyncError::config("max pages must be at least 1", "max_pages"));
        }
        Ok(())
    }
}
