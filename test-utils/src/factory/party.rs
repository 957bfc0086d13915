//! Party factory for creating test party entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test parties with customizable fields.
///
/// The owner and game category rows must already exist.
pub struct PartyFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    game_category_id: String,
    owner_id: String,
    name: String,
}

impl<'a> PartyFactory<'a> {
    /// Creates a new PartyFactory for the given owner and game category.
    ///
    /// Defaults:
    /// - channel_id: auto-incremented numeric ID
    /// - name: `"User {id}-party"`
    pub fn new(db: &'a DatabaseConnection, owner_id: &str, game_category_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            channel_id: id.to_string(),
            game_category_id: game_category_id.to_string(),
            owner_id: owner_id.to_string(),
            name: format!("User {}-party", id),
        }
    }

    /// Sets the party voice channel ID.
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Sets the party channel name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the party entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::party::Model)` - Created party entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::party::Model, DbErr> {
        entity::party::ActiveModel {
            channel_id: ActiveValue::Set(self.channel_id),
            game_category_id: ActiveValue::Set(self.game_category_id),
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a party with default values for the given owner and game category.
pub async fn create_party(
    db: &DatabaseConnection,
    owner_id: &str,
    game_category_id: &str,
) -> Result<entity::party::Model, DbErr> {
    PartyFactory::new(db, owner_id, game_category_id)
        .build()
        .await
}
