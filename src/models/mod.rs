//! Request-scoped data models for the bucket browser.
//!
//! Nothing here outlives a single request: buckets and listings are fetched
//! fresh from the object store, rendered, and dropped.

pub mod bucket;
pub mod object;
