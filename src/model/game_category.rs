//! Game category domain models.
//!
//! A game category is the Discord category created for one game together with its
//! forum, text and lobby voice channels. The lobby ("➕Add Party") is what members
//! join to get a party channel.

use crate::{
    error::AppError,
    util::parse::{parse_optional_u64, parse_u64_from_string},
};

/// Name of the lobby voice channel created in every game category.
pub const LOBBY_CHANNEL_NAME: &str = "➕Add Party";
/// Name of the forum channel created in every game category.
pub const FORUM_CHANNEL_NAME: &str = "Forum";
/// Name of the text channel created in every game category.
pub const TEXT_CHANNEL_NAME: &str = "Chat";

/// Game provisioned on the server.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCategory {
    /// Discord category channel ID.
    pub id: u64,
    /// Game name as entered by the admin (unique).
    pub name: String,
    /// Forum channel ID.
    pub forum_id: u64,
    /// Text channel ID.
    pub text_id: u64,
    /// Lobby voice channel ID.
    pub voice_id: u64,
    /// Optional role associated with the game.
    pub role_id: Option<u64>,
}

impl GameCategory {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(GameCategory)` - Successfully converted domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored ID is not a u64
    pub fn from_entity(entity: entity::game_category::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: parse_u64_from_string(entity.id)?,
            name: entity.name,
            forum_id: parse_u64_from_string(entity.forum_id)?,
            text_id: parse_u64_from_string(entity.text_id)?,
            voice_id: parse_u64_from_string(entity.voice_id)?,
            role_id: parse_optional_u64(entity.role_id)?,
        })
    }
}

/// Parameters for registering a newly provisioned game category.
#[derive(Debug, Clone)]
pub struct CreateGameCategoryParam {
    pub id: u64,
    pub name: String,
    pub forum_id: u64,
    pub text_id: u64,
    pub voice_id: u64,
    pub role_id: Option<u64>,
}

/// Display name of the Discord category for a game.
pub fn category_channel_name(game: &str) -> String {
    format!("> {}", game)
}
