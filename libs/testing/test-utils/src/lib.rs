//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic device names and brands
//! - `assertions`: assertion helpers with readable failure messages
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.device_name("main");
//!     let brand = builder.brand();
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic values
///
/// Tests sharing one database stay isolated by deriving every name and brand
/// from the test name.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_device");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-{prefix}-{seed}-{suffix}`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("device", "main"), "test-device-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn device_name(&self, suffix: &str) -> String {
        self.name("device", suffix)
    }

    /// A brand unique to this builder, so brand lookups only see this test's rows
    pub fn brand(&self) -> String {
        format!("brand-{}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use chrono::{DateTime, Utc};

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `actual` is not earlier than `earliest`
    pub fn assert_not_before(actual: DateTime<Utc>, earliest: DateTime<Utc>, context: &str) {
        assert!(
            actual >= earliest,
            "{}: expected a timestamp at or after {}, got {}",
            context,
            earliest,
            actual
        );
    }
}
