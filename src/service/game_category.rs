//! Game category provisioning.
//!
//! Adding a game creates a Discord category right after the main games category,
//! holding a forum, a text channel and the lobby voice channel, then registers it.
//! Deleting a game tears all of that down again; its parties go with the row.

use sea_orm::DatabaseConnection;

use crate::{
    data::game_category::GameCategoryRepository,
    error::AppError,
    model::game_category::{
        category_channel_name, CreateGameCategoryParam, GameCategory, FORUM_CHANNEL_NAME,
        LOBBY_CHANNEL_NAME, TEXT_CHANNEL_NAME,
    },
    platform::{ChannelKind, ChannelPlatform, CreateChannelParam},
};

pub struct GameCategoryService<'a, P: ChannelPlatform> {
    db: &'a DatabaseConnection,
    platform: &'a P,
    /// Name of the category new game categories are placed after.
    anchor_category: &'a str,
}

impl<'a, P: ChannelPlatform> GameCategoryService<'a, P> {
    pub fn new(db: &'a DatabaseConnection, platform: &'a P, anchor_category: &'a str) -> Self {
        Self {
            db,
            platform,
            anchor_category,
        }
    }

    /// Gets every registered game, ordered by name.
    pub async fn list_all(&self) -> Result<Vec<GameCategory>, AppError> {
        GameCategoryRepository::new(self.db).get_all().await
    }

    /// Provisions a new game on the server.
    ///
    /// Creates the category `"> {name}"` just below the main games category, then its
    /// forum, text and lobby channels, and registers everything. If any step fails,
    /// the channels created so far are deleted before the error is returned.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to provision the game in
    /// - `name` - Game name
    ///
    /// # Returns
    /// - `Ok(GameCategory)` - The registered game
    /// - `Err(AppError::BadRequest)` - Empty name or a game with that name exists
    /// - `Err(AppError::NotFound)` - The main games category is missing
    /// - `Err(AppError)` - Platform or database error
    pub async fn add_game(&self, guild_id: u64, name: &str) -> Result<GameCategory, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest(
                "The game name cannot be empty.".to_string(),
            ));
        }

        let repo = GameCategoryRepository::new(self.db);
        if repo.find_by_name(name).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "The game {} already exists.",
                name
            )));
        }

        let anchor = self
            .platform
            .list_channels(guild_id)
            .await?
            .into_iter()
            .find(|channel| {
                channel.kind == ChannelKind::Category && channel.name == self.anchor_category
            })
            .ok_or_else(|| {
                tracing::info!(
                    "Main game category '{}' does not exist, create it first",
                    self.anchor_category
                );
                AppError::NotFound("The main game category does not exist.".to_string())
            })?;

        let mut created = Vec::new();
        match self
            .provision(guild_id, name, anchor.position + 1, &mut created)
            .await
        {
            Ok(category) => {
                tracing::info!("Added game category {} ({})", category.name, category.id);
                Ok(category)
            }
            Err(e) => {
                // Children were pushed after their category; delete them first.
                for channel_id in created.into_iter().rev() {
                    if let Err(err) = self.platform.delete_channel(channel_id).await {
                        tracing::error!(
                            "Failed to delete channel {} while rolling back game {}: {}",
                            channel_id,
                            name,
                            err
                        );
                    }
                }
                Err(e)
            }
        }
    }

    /// Creates the channels of a game, recording each created ID in `created`.
    async fn provision(
        &self,
        guild_id: u64,
        name: &str,
        position: u16,
        created: &mut Vec<u64>,
    ) -> Result<GameCategory, AppError> {
        let category = self
            .platform
            .create_channel(
                guild_id,
                CreateChannelParam::new(category_channel_name(name), ChannelKind::Category)
                    .position(position),
            )
            .await?;
        created.push(category.id);

        let mut child_ids = Vec::with_capacity(3);
        for (child_name, kind) in [
            (FORUM_CHANNEL_NAME, ChannelKind::Forum),
            (TEXT_CHANNEL_NAME, ChannelKind::Text),
            (LOBBY_CHANNEL_NAME, ChannelKind::Voice),
        ] {
            let child = self
                .platform
                .create_channel(
                    guild_id,
                    CreateChannelParam::new(child_name, kind).parent(category.id),
                )
                .await?;
            created.push(child.id);
            child_ids.push(child.id);
        }

        GameCategoryRepository::new(self.db)
            .create(CreateGameCategoryParam {
                id: category.id,
                name: name.to_string(),
                forum_id: child_ids[0],
                text_id: child_ids[1],
                voice_id: child_ids[2],
                role_id: None,
            })
            .await
    }

    /// Removes a game from the server.
    ///
    /// Deletes every channel inside the category, the category itself, then the row.
    /// Party rows of the game are removed by the foreign key cascade.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the game lives in
    /// - `category_id` - Category ID of the game
    ///
    /// # Returns
    /// - `Ok(GameCategory)` - The deleted game
    /// - `Err(AppError::NotFound)` - No game registered with that ID
    /// - `Err(AppError)` - Platform or database error
    pub async fn delete_game(
        &self,
        guild_id: u64,
        category_id: u64,
    ) -> Result<GameCategory, AppError> {
        let repo = GameCategoryRepository::new(self.db);

        let category = repo.find_by_id(category_id).await?.ok_or_else(|| {
            AppError::NotFound("This game category does not exist.".to_string())
        })?;

        let children = self
            .platform
            .list_channels(guild_id)
            .await?
            .into_iter()
            .filter(|channel| channel.parent_id == Some(category_id));

        for channel in children {
            self.platform.delete_channel(channel.id).await?;
        }
        self.platform.delete_channel(category_id).await?;

        repo.delete(category_id).await?;

        tracing::info!("Deleted game category {} ({})", category.name, category.id);

        Ok(category)
    }
}
