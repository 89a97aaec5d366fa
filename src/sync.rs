//! The end-to-end sync run: materialize each index page as soon as it
//! arrives, in enumeration order.

use crate::config::SyncConfig;
use crate::error::{SkipReason, SyncError};
use crate::export::{Change, Materializer};
use crate::fetch::{SubmissionSource, SubmissionSummary};
use crate::index::IndexReader;
use chrono::DateTime;
use log::{debug, info};
use std::path::PathBuf;

/// Tally of one sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub pages: usize,
    pub enumerated: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped_not_accepted: usize,
    pub skipped_unsafe_slug: usize,
    pub skipped_detail_failed: usize,
    pub skipped_write_failed: usize,
    /// Every solution file produced, in the order it was materialized.
    pub files: Vec<PathBuf>,
}

impl SyncReport {
    pub fn written(&self) -> usize {
        self.created + self.updated
    }

    pub fn skipped(&self) -> usize {
        self.skipped_not_accepted
            + self.skipped_unsafe_slug
            + self.skipped_detail_failed
            + self.skipped_write_failed
    }
}

/// Drives one sync run against a [`SubmissionSource`].
pub struct Synchronizer<'a> {
    source: &'a dyn SubmissionSource,
    config: &'a SyncConfig,
}

impl<'a> Synchronizer<'a> {
    pub fn new(source: &'a dyn SubmissionSource, config: &'a SyncConfig) -> Self {
        Synchronizer { source, config }
    }

    /// Runs the sync.
    ///
    /// The configuration is validated here, before any request is made.
    /// Each index page is materialized before the next one is fetched, one
    /// summary at a time in enumeration order, so a later summary for the
    /// same problem overwrites an earlier one. If a page fails, files written
    /// from earlier pages stay in place.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReport)` - The run completed; individual submissions may have been skipped.
    /// * `Err(SyncError)` - The configuration is invalid or an index page failed.
    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        self.config.validate()?;

        let mut reader = IndexReader::new(self.source, self.config.page_size, self.config.max_pages);
        let materializer = Materializer::new(self.source, &self.config.solutions_dir);
        let mut report = SyncReport::default();

        while let Some(summaries) = reader.next_page().await? {
            report.enumerated += summaries.len();

            for summary in &summaries {
                debug!("Processing {} submitted {}", summary.title_slug, submitted_at(summary));
                match materializer.materialize(summary).await {
                    Ok(done) => {
                        match done.change {
                            Change::Created => report.created += 1,
                            Change::Updated => report.updated += 1,
                            Change::Unchanged => report.unchanged += 1,
                        }
                        report.files.push(done.path);
                    }
                    Err(SkipReason::NotAccepted(_)) => report.skipped_not_accepted += 1,
                    Err(SkipReason::UnsafeSlug(_)) => report.skipped_unsafe_slug += 1,
                    Err(SkipReason::DetailFetchFailed(_)) => report.skipped_detail_failed += 1,
                    Err(SkipReason::WriteFailed { .. }) => report.skipped_write_failed += 1,
                }
            }
        }
        report.pages = reader.pages_fetched();

        info!(
            "Sync finished: {} written ({} new, {} updated), {} unchanged, {} skipped",
            report.written(),
            report.created,
            report.updated,
            report.unchanged,
            report.skipped()
        );
        Ok(report)
    }
}

fn submitted_at(summary: &SubmissionSummary) -> String {
    DateTime::from_timestamp(summary.timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| summary.timestamp.to_string())
}
