//! Game category factory for creating test game category entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test game categories with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let category = GameCategoryFactory::new(&db)
///     .name("Chess")
///     .voice_id("3000")
///     .build()
///     .await?;
/// ```
pub struct GameCategoryFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    name: String,
    forum_id: String,
    text_id: String,
    voice_id: String,
    role_id: Option<String>,
}

impl<'a> GameCategoryFactory<'a> {
    /// Creates a new GameCategoryFactory with default values.
    ///
    /// Defaults:
    /// - id, forum_id, text_id, voice_id: auto-incremented numeric IDs
    /// - name: `"Game {id}"`
    /// - role_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: id.to_string(),
            name: format!("Game {}", id),
            forum_id: next_id().to_string(),
            text_id: next_id().to_string(),
            voice_id: next_id().to_string(),
            role_id: None,
        }
    }

    /// Sets the category ID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the game name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the lobby voice channel ID.
    pub fn voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = voice_id.into();
        self
    }

    /// Sets the optional game role ID.
    pub fn role_id(mut self, role_id: Option<String>) -> Self {
        self.role_id = role_id;
        self
    }

    /// Builds and inserts the game category entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::game_category::Model)` - Created game category entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::game_category::Model, DbErr> {
        entity::game_category::ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name),
            forum_id: ActiveValue::Set(self.forum_id),
            text_id: ActiveValue::Set(self.text_id),
            voice_id: ActiveValue::Set(self.voice_id),
            role_id: ActiveValue::Set(self.role_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a game category with default values.
pub async fn create_game_category(
    db: &DatabaseConnection,
) -> Result<entity::game_category::Model, DbErr> {
    GameCategoryFactory::new(db).build().await
}
