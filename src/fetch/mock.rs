//! In-memory [`SubmissionSource`] for unit tests.

use super::source::SubmissionSource;
use super::types::{Cursor, Page, Status, SubmissionDetail, SubmissionId, SubmissionSummary};
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves scripted pages in call order and canned details by id.
#[derive(Default)]
pub struct MockSource {
    pages: Vec<Page>,
    /// Once the script runs out, keep serving the last page instead of an empty one.
    repeat_last: bool,
    /// Zero-based page call that fails with a 500.
    failing_page: Option<usize>,
    details: HashMap<SubmissionId, Result<SubmissionDetail, String>>,
    page_calls: Mutex<usize>,
    detail_calls: Mutex<Vec<SubmissionId>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, items: Vec<SubmissionSummary>, next: Option<Cursor>) -> Self {
        self.pages.push(Page {
            items,
            next_cursor: next,
        });
        self
    }

    pub fn repeat_last_page(mut self) -> Self {
        self.repeat_last = true;
        self
    }

    pub fn fail_page(mut self, call: usize) -> Self {
        self.failing_page = Some(call);
        self
    }

    pub fn detail(mut self, id: &str, lang: &str, code: &str) -> Self {
        self.details.insert(
            SubmissionId::from(id),
            Ok(SubmissionDetail {
                code: code.to_string(),
                lang: lang.to_string(),
            }),
        );
        self
    }

    pub fn failing_detail(mut self, id: &str, message: &str) -> Self {
        self.details
            .insert(SubmissionId::from(id), Err(message.to_string()));
        self
    }

    pub fn page_calls(&self) -> usize {
        *self.page_calls.lock().unwrap()
    }

    pub fn detail_calls(&self) -> Vec<SubmissionId> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionSource for MockSource {
    fn first_cursor(&self) -> Cursor {
        Cursor::Offset(0)
    }

    async fn fetch_page(&self, _cursor: &Cursor, _page_size: u32) -> Result<Page, FetchError> {
        let call = {
            let mut calls = self.page_calls.lock().unwrap();
            *calls += 1;
            *calls - 1
        };
        if self.failing_page == Some(call) {
            return Err(FetchError::Status {
                status: 500,
                url: "mock://index".to_string(),
            });
        }
        match self.pages.get(call) {
            Some(page) => Ok(page.clone()),
            None if self.repeat_last => Ok(self.pages.last().cloned().unwrap_or_default()),
            None => Ok(Page::default()),
        }
    }

    async fn fetch_detail(&self, id: &SubmissionId) -> Result<SubmissionDetail, FetchError> {
        self.detail_calls.lock().unwrap().push(id.clone());
        match self.details.get(id) {
            Some(Ok(detail)) => Ok(detail.clone()),
            Some(Err(message)) => Err(FetchError::Api(message.clone())),
            None => Err(FetchError::Api(format!("no detail for {}", id))),
        }
    }
}

/// Builds a summary with the given id, slug and status.
pub fn summary(id: &str, slug: &str, status: Option<Status>, timestamp: i64) -> SubmissionSummary {
    SubmissionSummary {
        id: SubmissionId::from(id),
        title_slug: slug.to_string(),
        lang: "python3".to_string(),
        status,
        timestamp,
    }
}
