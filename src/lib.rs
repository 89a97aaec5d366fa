//! LeetCode Sync Library
//!
//! This library mirrors a user's accepted LeetCode submissions into a local
//! solutions directory, one file per problem, keeping only the latest accepted
//! code for each.
//!
//! - [`index`] enumerates the paginated submission index.
//! - [`export`] fetches each accepted submission's code and writes it.
//! - [`sync`] ties both together into one run.

pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod index;
pub mod sync;
pub mod utils;
