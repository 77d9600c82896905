//! Common utilities shared by every store-backed domain

pub mod error;
pub mod query;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use query::{Pagination, wildcard_pattern};
pub use retry::{RetryConfig, retry, retry_with_backoff};
