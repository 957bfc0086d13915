//! Game category data repository.
//!
//! Stores the games provisioned on the server and answers the lobby lookups the
//! party lifecycle performs on every voice state update.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    error::AppError,
    model::game_category::{CreateGameCategoryParam, GameCategory},
};

/// Repository providing database operations for game categories.
pub struct GameCategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GameCategoryRepository<'a> {
    /// Creates a new GameCategoryRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a provisioned game category.
    ///
    /// # Arguments
    /// - `param` - IDs of the category and its channels plus the game name
    ///
    /// # Returns
    /// - `Ok(GameCategory)` - The created game category
    /// - `Err(AppError)` - Database error, including a duplicate name or ID
    pub async fn create(&self, param: CreateGameCategoryParam) -> Result<GameCategory, AppError> {
        let entity = entity::game_category::ActiveModel {
            id: ActiveValue::Set(param.id.to_string()),
            name: ActiveValue::Set(param.name),
            forum_id: ActiveValue::Set(param.forum_id.to_string()),
            text_id: ActiveValue::Set(param.text_id.to_string()),
            voice_id: ActiveValue::Set(param.voice_id.to_string()),
            role_id: ActiveValue::Set(param.role_id.map(|id| id.to_string())),
        }
        .insert(self.db)
        .await?;

        GameCategory::from_entity(entity)
    }

    /// Gets every registered game category, ordered by name.
    ///
    /// # Returns
    /// - `Ok(Vec<GameCategory>)` - All game categories
    /// - `Err(AppError)` - Database error or malformed stored ID
    pub async fn get_all(&self) -> Result<Vec<GameCategory>, AppError> {
        let entities = entity::prelude::GameCategory::find()
            .order_by_asc(entity::game_category::Column::Name)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(GameCategory::from_entity)
            .collect()
    }

    /// Finds a game category by its Discord category ID.
    ///
    /// # Returns
    /// - `Ok(Some(GameCategory))` - Category found
    /// - `Ok(None)` - No category with that ID
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_id(&self, id: u64) -> Result<Option<GameCategory>, AppError> {
        let entity = entity::prelude::GameCategory::find_by_id(id.to_string())
            .one(self.db)
            .await?;

        entity.map(GameCategory::from_entity).transpose()
    }

    /// Finds the game category whose lobby voice channel is `channel_id`.
    ///
    /// # Returns
    /// - `Ok(Some(GameCategory))` - The channel is a registered lobby
    /// - `Ok(None)` - The channel is not a lobby
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_lobby(&self, channel_id: u64) -> Result<Option<GameCategory>, AppError> {
        let entity = entity::prelude::GameCategory::find()
            .filter(entity::game_category::Column::VoiceId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(GameCategory::from_entity).transpose()
    }

    /// Finds a game category by game name.
    ///
    /// # Returns
    /// - `Ok(Some(GameCategory))` - A game with that name exists
    /// - `Ok(None)` - Name is free
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_name(&self, name: &str) -> Result<Option<GameCategory>, AppError> {
        let entity = entity::prelude::GameCategory::find()
            .filter(entity::game_category::Column::Name.eq(name))
            .one(self.db)
            .await?;

        entity.map(GameCategory::from_entity).transpose()
    }

    /// Deletes a game category by its Discord category ID.
    ///
    /// Parties registered under the category are removed by the foreign key cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Category existed and was deleted
    /// - `Ok(false)` - No category with that ID
    /// - `Err(AppError)` - Database error during deletion
    pub async fn delete(&self, id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::GameCategory::delete_by_id(id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
