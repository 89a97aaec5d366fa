//! # Fetching Submissions from the Remote Judge
//!
//! This module defines what the sync pipeline needs from the judge, the
//! [`SubmissionSource`] trait, together with the data it exchanges
//! (`SubmissionSummary`, `SubmissionDetail`, `Cursor`, `Page`) and the
//! LeetCode-backed implementation.
//!
//! ## Submodules
//!
//! - **source**: The `SubmissionSource` trait.
//! - **leetcode**: GraphQL and REST clients for leetcode.com.
//! - **types**: Data structures shared by the index reader and the materializer.

mod leetcode;
#[cfg(test)]
pub(crate) mod mock;
mod source;
mod types;

pub use leetcode::LeetCodeSource;
pub use source::SubmissionSource;
pub use types::{Cursor, Page, Status, SubmissionDetail, SubmissionId, SubmissionSummary};
