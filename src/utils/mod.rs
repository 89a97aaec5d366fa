//! # Utility Functions
//!
//! ## Submodules
//!
//! - **digest**: SHA-256 content digests for unchanged-file detection.

mod digest;

pub use digest::compute_content_digest;
