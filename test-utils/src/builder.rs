use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Habitue};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Habitue)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys must be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables required for party operations.
    ///
    /// Adds, in dependency order:
    /// - User
    /// - GameCategory
    /// - Party, with the one-party-per-owner-and-game unique index
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_party_tables(self) -> Self {
        let mut builder = self.with_table(User).with_table(GameCategory);

        // The composite unique index lives in the migration, not the entity.
        let mut party = Schema::new(sea_orm::DbBackend::Sqlite).create_table_from_entity(Party);
        party.index(
            Index::create()
                .name("idx_party_owner_game_category")
                .col(entity::party::Column::OwnerId)
                .col(entity::party::Column::GameCategoryId)
                .unique(),
        );
        builder.tables.push(party);

        builder
    }

    /// Adds every table of the schema.
    ///
    /// Equivalent to `with_party_tables()` followed by `with_table(Habitue)`.
    pub fn with_all_tables(self) -> Self {
        self.with_party_tables().with_table(Habitue)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
