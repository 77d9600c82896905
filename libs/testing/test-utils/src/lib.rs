//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongodb")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let db = mongo.database(&builder.database_name());
//!     let product_name = builder.name("product", "main");
//! }
//! ```

#[cfg(feature = "mongodb")]
mod mongodb;

#[cfg(feature = "mongodb")]
pub use mongodb::TestMongo;

/// Builder for test data with deterministic randomization
///
/// Tests stay reproducible because every value derives from the seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("product", "main"), "test-product-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Per-test database name, so tests sharing a container stay isolated
    pub fn database_name(&self) -> String {
        format!("test_{}", self.seed)
    }

    /// Deterministic 24-digit hex string shaped like a document id
    pub fn object_id_hex(&self) -> String {
        format!("{:016x}{:08x}", self.seed, (self.seed >> 32) as u32)
    }

    /// Path an uploaded image for this test would be stored under
    pub fn image_path(&self, suffix: &str) -> String {
        format!("uploads/test-{}-{}.png", self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a result failed and its error renders `needle`
    pub fn assert_err_contains<T, E: std::fmt::Display>(
        result: Result<T, E>,
        needle: &str,
        context: &str,
    ) {
        match result {
            Ok(_) => panic!("{}: expected error containing '{}', got Ok", context, needle),
            Err(e) => assert!(
                e.to_string().contains(needle),
                "{}: expected error containing '{}', got '{}'",
                context,
                needle,
                e
            ),
        }
    }
}
