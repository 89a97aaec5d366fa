use super::types::{Cursor, Page, SubmissionDetail, SubmissionId};
use crate::error::FetchError;
use async_trait::async_trait;

/// The remote judge as seen by the sync pipeline.
///
/// Implementations provide the two capabilities the pipeline needs: listing
/// the submission index page by page, and resolving one submission's source.
/// Authentication is the implementation's business.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Cursor for the first page of this source.
    fn first_cursor(&self) -> Cursor;

    /// Fetches the index page starting at `cursor`, holding at most `page_size` items.
    async fn fetch_page(&self, cursor: &Cursor, page_size: u32) -> Result<Page, FetchError>;

    /// Fetches the full source code of one submission.
    async fn fetch_detail(&self, id: &SubmissionId) -> Result<SubmissionDetail, FetchError>;
}
