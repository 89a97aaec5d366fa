use crate::error::SyncError;
use crate::fetch::{Cursor, SubmissionId, SubmissionSource, SubmissionSummary};
use log::{debug, info, warn};
use std::collections::HashSet;

/// Walks the paginated submission index of a [`SubmissionSource`].
///
/// Pages are requested one at a time, each round trip finishing before the
/// next begins. Enumeration ends when a page is empty, when the source reports
/// no next cursor, when the next cursor is one already visited, when a page
/// holds only ids yielded before, or when the optional page cap is reached.
/// Ids already yielded are dropped from later pages. Status filtering is left
/// to the caller.
pub struct IndexReader<'a> {
    source: &'a dyn SubmissionSource,
    page_size: u32,
    max_pages: Option<usize>,
    /// `None` once enumeration is finished.
    cursor: Option<Cursor>,
    visited: HashSet<Cursor>,
    seen: HashSet<SubmissionId>,
    pages_fetched: usize,
}

impl<'a> IndexReader<'a> {
    pub fn new(source: &'a dyn SubmissionSource, page_size: u32, max_pages: Option<usize>) -> Self {
        IndexReader {
            source,
            page_size,
            max_pages,
            cursor: Some(source.first_cursor()),
            visited: HashSet::new(),
            seen: HashSet::new(),
            pages_fetched: 0,
        }
    }

    /// Number of pages requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches the next page of not-yet-seen summaries.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(items))` - The next page's new summaries, in the order the source listed them.
    ///   May be empty if every entry was a duplicate.
    /// * `Ok(None)` - Enumeration is finished.
    /// * `Err(SyncError::Index)` - The page could not be fetched; enumeration cannot continue.
    pub async fn next_page(&mut self) -> Result<Option<Vec<SubmissionSummary>>, SyncError> {
        let Some(cursor) = self.cursor.take() else {
            return Ok(None);
        };
        if self.max_pages.is_some_and(|max| self.pages_fetched >= max) {
            info!("Stopping after {} page(s) (page limit reached)", self.pages_fetched);
            return Ok(None);
        }

        let page_number = self.pages_fetched + 1;
        let page = self
            .source
            .fetch_page(&cursor, self.page_size)
            .await
            .map_err(|source| SyncError::Index {
                page: page_number,
                cursor: cursor.clone(),
                source,
            })?;
        self.pages_fetched = page_number;

        if page.items.is_empty() {
            debug!("Page {} at {} is empty, index exhausted", page_number, cursor);
            return Ok(None);
        }

        if page.items.iter().all(|s| self.seen.contains(&s.id)) {
            warn!(
                "Page {} at {} holds only submissions already listed, treating index as exhausted",
                page_number, cursor
            );
            return Ok(None);
        }

        self.visited.insert(cursor);
        self.cursor = match page.next_cursor {
            Some(next) if self.visited.contains(&next) => {
                warn!(
                    "Source pointed back to an already visited cursor ({}) on page {}, stopping after it",
                    next, page_number
                );
                None
            }
            next => next,
        };

        let total = page.items.len();
        let items: Vec<SubmissionSummary> = page
            .items
            .into_iter()
            .filter(|s| self.seen.insert(s.id.clone()))
            .collect();
        if items.len() < total {
            debug!(
                "Dropped {} already-seen submission(s) on page {}",
                total - items.len(),
                page_number
            );
        }
        info!("Fetched index page {} ({} submission(s))", page_number, items.len());
        Ok(Some(items))
    }

    /// Drains the reader into one flat list.
    pub async fn collect_all(&mut self) -> Result<Vec<SubmissionSummary>, SyncError> {
        let mut all = Vec::new();
        while let Some(items) = self.next_page().await? {
            all.extend(items);
        }
        info!(
            "Enumerated {} submission(s) across {} page(s)",
            all.len(),
            self.pages_fetched
        );
        Ok(all)
    }
}
