//! ZORS Test Utils
//!
//! Provides shared testing utilities for the ZORS bot. This crate offers a builder
//! pattern for creating test contexts with in-memory SQLite databases, factories for
//! database rows and factories for serenity gateway objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Row factories with sensible defaults
//! - **serenity**: Serenity structs built from JSON payloads
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_party_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_party_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
