//! Party domain models and the party channel naming convention.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Suffix every party channel name ends with.
pub const PARTY_SUFFIX: &str = "-party";
/// Leading glyph of lobby channels, which must never be mistaken for a party.
pub const LOBBY_GLYPH: char = '➕';

/// Registered party voice channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Party {
    /// Discord voice channel ID, also the registry key.
    pub channel_id: u64,
    /// Game category the party belongs to.
    pub game_category_id: u64,
    /// Discord ID of the member the party was created for.
    pub owner_id: u64,
    /// Channel name at creation time.
    pub name: String,
    /// When the party was registered.
    pub created_at: DateTime<Utc>,
}

impl Party {
    /// Converts an entity model to a party domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Party)` - The converted party domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored ID is not a u64
    pub fn from_entity(entity: entity::party::Model) -> Result<Self, AppError> {
        Ok(Self {
            channel_id: parse_u64_from_string(entity.channel_id)?,
            game_category_id: parse_u64_from_string(entity.game_category_id)?,
            owner_id: parse_u64_from_string(entity.owner_id)?,
            name: entity.name,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for registering a freshly created party channel.
#[derive(Debug, Clone)]
pub struct CreatePartyParam {
    pub channel_id: u64,
    pub game_category_id: u64,
    pub owner_id: u64,
    pub name: String,
}

/// Name of the party channel created for a member.
pub fn party_channel_name(display_name: &str) -> String {
    format!("{}{}", display_name, PARTY_SUFFIX)
}

/// Whether a channel name follows the party naming convention.
pub fn is_party_channel_name(name: &str) -> bool {
    name.ends_with(PARTY_SUFFIX) && !name.starts_with(LOBBY_GLYPH)
}
