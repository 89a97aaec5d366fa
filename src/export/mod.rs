//! Writing accepted submissions to the solutions directory.
//!
//! The [`Materializer`] resolves each accepted summary to its source code,
//! picks a file extension from the judge's language tag and writes
//! `solutions/{title_slug}.{ext}` atomically. Failures are reported per
//! submission so one bad item never stops the batch.
//!
//! ## Submodules
//!
//! - **materializer**: Status filter, detail fetch and write for one submission.
//! - **extension**: Language tag to file extension table.
//! - **writer**: Write-to-temp-then-rename file replacement.

mod extension;
mod materializer;
mod writer;

pub use extension::{extension_for, FALLBACK_EXTENSION};
pub use materializer::{Change, Materialized, Materializer};
pub use writer::write_atomic;
