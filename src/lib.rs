//! bulk-indexer - quota-aware bulk submitter for the Google Indexing API
//!
//! Loads an ordered list of URLs, then publishes them one at a time until the
//! list runs out, the daily quota is reached, or too many submissions fail.

pub mod auth;
pub mod config;
pub mod error;
pub mod indexing;
pub mod source;
pub mod submit;
pub mod types;
