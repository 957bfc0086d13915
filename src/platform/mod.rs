//! Chat platform operations used by the services.
//!
//! Services talk to Discord through these traits rather than through serenity
//! directly, so the party lifecycle and provisioning flows can run against an
//! in-memory platform in tests. `SerenityPlatform` is the production implementation.

pub mod serenity;

#[cfg(test)]
pub mod fake;

use std::time::Duration;

use ::serenity::async_trait;
use chrono::Utc;

use crate::{error::AppError, model::color::Rgb};

pub use self::serenity::SerenityPlatform;

/// Unix time of the first second of 2015, the origin of Discord snowflake timestamps.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Time elapsed since the object with this snowflake ID was created.
pub fn snowflake_age(id: u64) -> Duration {
    let created_ms = (id >> 22) + DISCORD_EPOCH_MS;
    let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);

    Duration::from_millis(now_ms.saturating_sub(created_ms))
}

/// Kind of a guild channel, limited to the kinds the bot creates or inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Category,
    Text,
    Voice,
    Forum,
    /// Any other channel type (stage, announcement, ...).
    Other,
}

/// Guild channel as seen by the services.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformChannel {
    pub id: u64,
    pub name: String,
    pub kind: ChannelKind,
    /// Category the channel is grouped under, if any.
    pub parent_id: Option<u64>,
    pub position: u16,
}

/// Parameters for creating a guild channel.
#[derive(Debug, Clone)]
pub struct CreateChannelParam {
    pub name: String,
    pub kind: ChannelKind,
    pub parent_id: Option<u64>,
    pub position: Option<u16>,
}

impl CreateChannelParam {
    pub fn new(name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent_id: None,
            position: None,
        }
    }

    pub fn parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn position(mut self, position: u16) -> Self {
        self.position = Some(position);
        self
    }
}

/// Guild role as seen by the services.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRole {
    pub id: u64,
    pub name: String,
    pub color: Rgb,
    pub position: u16,
}

/// Channel and voice operations on a guild.
#[async_trait]
pub trait ChannelPlatform: Send + Sync {
    /// Fetches a channel of the guild.
    ///
    /// # Returns
    /// - `Ok(Some(PlatformChannel))` - The channel exists
    /// - `Ok(None)` - The channel does not exist (anymore)
    /// - `Err(AppError)` - The platform could not be queried
    async fn get_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<PlatformChannel>, AppError>;

    /// Lists every channel of the guild.
    async fn list_channels(&self, guild_id: u64) -> Result<Vec<PlatformChannel>, AppError>;

    /// Creates a channel in the guild.
    async fn create_channel(
        &self,
        guild_id: u64,
        param: CreateChannelParam,
    ) -> Result<PlatformChannel, AppError>;

    /// Deletes a channel.
    ///
    /// Deleting a channel that no longer exists succeeds.
    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError>;

    /// Moves a member connected to voice into another voice channel.
    async fn move_member(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
    ) -> Result<(), AppError>;

    /// IDs of the members currently connected to a voice channel.
    async fn voice_members(&self, guild_id: u64, channel_id: u64) -> Result<Vec<u64>, AppError>;
}

/// Role operations on a guild.
#[async_trait]
pub trait RolePlatform: Send + Sync {
    async fn find_role_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<PlatformRole>, AppError>;

    async fn create_role(
        &self,
        guild_id: u64,
        name: &str,
        color: Rgb,
    ) -> Result<PlatformRole, AppError>;

    async fn edit_role_color(&self, guild_id: u64, role_id: u64, color: Rgb)
        -> Result<(), AppError>;

    async fn edit_role_position(
        &self,
        guild_id: u64,
        role_id: u64,
        position: u16,
    ) -> Result<(), AppError>;

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn add_member_role(&self, guild_id: u64, user_id: u64, role_id: u64)
        -> Result<(), AppError>;

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError>;
}
