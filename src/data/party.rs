//! Party registry repository.
//!
//! The registry owns the record of every live party channel: which member it was
//! created for and which game it belongs to. The chat platform owns the channel
//! itself; `PartyService` keeps the two consistent.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{
    error::AppError,
    model::party::{CreatePartyParam, Party},
};

/// Repository providing database operations for the party registry.
pub struct PartyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PartyRepository<'a> {
    /// Creates a new PartyRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the party a member owns for a game.
    ///
    /// # Arguments
    /// - `owner_id` - Discord ID of the owner
    /// - `game_category_id` - Game category ID
    ///
    /// # Returns
    /// - `Ok(Some(Party))` - The member has a registered party for the game
    /// - `Ok(None)` - No party registered
    /// - `Err(AppError)` - Database error during query
    pub async fn get_by_owner_and_game(
        &self,
        owner_id: u64,
        game_category_id: u64,
    ) -> Result<Option<Party>, AppError> {
        let entity = entity::prelude::Party::find()
            .filter(entity::party::Column::OwnerId.eq(owner_id.to_string()))
            .filter(entity::party::Column::GameCategoryId.eq(game_category_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Party::from_entity).transpose()
    }

    /// Gets the party registered for a voice channel.
    ///
    /// # Returns
    /// - `Ok(Some(Party))` - The channel is a registered party
    /// - `Ok(None)` - The channel is not registered
    /// - `Err(AppError)` - Database error during query
    pub async fn get_by_channel(&self, channel_id: u64) -> Result<Option<Party>, AppError> {
        let entity = entity::prelude::Party::find_by_id(channel_id.to_string())
            .one(self.db)
            .await?;

        entity.map(Party::from_entity).transpose()
    }

    /// Gets the parties belonging to any of the given game categories.
    ///
    /// Used by reconciliation to scope the registry to one guild's games.
    ///
    /// # Arguments
    /// - `game_category_ids` - Game category IDs to match
    ///
    /// # Returns
    /// - `Ok(Vec<Party>)` - Matching parties, empty when no IDs are given
    /// - `Err(AppError)` - Database error or malformed stored ID
    pub async fn get_by_game_categories(
        &self,
        game_category_ids: &[u64],
    ) -> Result<Vec<Party>, AppError> {
        if game_category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Party::find()
            .filter(
                entity::party::Column::GameCategoryId
                    .is_in(game_category_ids.iter().map(|id| id.to_string())),
            )
            .all(self.db)
            .await?;

        entities.into_iter().map(Party::from_entity).collect()
    }

    /// Registers a newly created party channel.
    ///
    /// Fails when the owner already has a party for the game (unique index on
    /// owner and game category) or when the channel is already registered.
    ///
    /// # Arguments
    /// - `param` - Channel, owner, game category and name of the party
    ///
    /// # Returns
    /// - `Ok(Party)` - The registered party
    /// - `Err(AppError)` - Database error during insert
    pub async fn insert(&self, param: CreatePartyParam) -> Result<Party, AppError> {
        let entity = entity::party::ActiveModel {
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            game_category_id: ActiveValue::Set(param.game_category_id.to_string()),
            owner_id: ActiveValue::Set(param.owner_id.to_string()),
            name: ActiveValue::Set(param.name),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Party::from_entity(entity)
    }

    /// Removes a party from the registry.
    ///
    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - The channel was not registered
    /// - `Err(AppError)` - Database error during deletion
    pub async fn delete(&self, channel_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::Party::delete_by_id(channel_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
