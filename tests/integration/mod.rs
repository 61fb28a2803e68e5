//! Integration tests for mysql-session.

pub mod fallback_test;
pub mod live_test;
pub mod query_test;
