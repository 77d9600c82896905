//! Database library providing MongoDB connectivity and storage-agnostic query helpers
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, configuration and health checks
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ## MongoDB
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```
//!
//! ## Pagination
//!
//! ```
//! use database::common::Pagination;
//!
//! let page = Pagination::compute(25, 10, 5);
//! assert_eq!((page.total_pages, page.current_page, page.skip), (3, 3, 20));
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, Pagination, wildcard_pattern};
