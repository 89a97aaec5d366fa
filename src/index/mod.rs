//! # Reading the Submission Index
//!
//! Turns a paginated [`SubmissionSource`](crate::fetch::SubmissionSource) into
//! a flat, duplicate-free sequence of submission summaries. Pagination always
//! terminates, even against a source whose cursor never advances.

mod reader;

pub use reader::IndexReader;
