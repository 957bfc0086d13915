//! Serenity-backed implementation of the platform traits.
//!
//! Reads go to the cache first and fall back to HTTP; voice membership is only
//! available from the cache, which serenity keeps current through the
//! `GUILD_VOICE_STATES` intent.

use serenity::all::{
    ChannelId, ChannelType, Context, CreateChannel, EditRole, GuildChannel, GuildId, Role, RoleId,
    UserId,
};
use serenity::async_trait;
use serenity::http::HttpError;

use crate::{
    error::AppError,
    model::color::Rgb,
    platform::{
        ChannelKind, ChannelPlatform, CreateChannelParam, PlatformChannel, PlatformRole,
        RolePlatform,
    },
};

/// Platform operations over a serenity context.
#[derive(Clone)]
pub struct SerenityPlatform {
    ctx: Context,
}

impl SerenityPlatform {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Roles of the guild from cache, or from HTTP when the guild is not cached.
    async fn roles(&self, guild_id: u64) -> Result<Vec<PlatformRole>, AppError> {
        let cached = self
            .ctx
            .cache
            .guild(GuildId::new(guild_id))
            .map(|guild| guild.roles.values().map(role_from_serenity).collect::<Vec<_>>());

        if let Some(roles) = cached {
            return Ok(roles);
        }

        let roles = GuildId::new(guild_id).roles(&self.ctx.http).await?;

        Ok(roles.values().map(role_from_serenity).collect())
    }
}

fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Category => ChannelKind::Category,
        ChannelType::Text => ChannelKind::Text,
        ChannelType::Voice => ChannelKind::Voice,
        ChannelType::Forum => ChannelKind::Forum,
        _ => ChannelKind::Other,
    }
}

fn channel_type(kind: ChannelKind) -> ChannelType {
    match kind {
        ChannelKind::Category => ChannelType::Category,
        ChannelKind::Text | ChannelKind::Other => ChannelType::Text,
        ChannelKind::Voice => ChannelType::Voice,
        ChannelKind::Forum => ChannelType::Forum,
    }
}

fn channel_from_serenity(channel: &GuildChannel) -> PlatformChannel {
    PlatformChannel {
        id: channel.id.get(),
        name: channel.name.clone(),
        kind: channel_kind(channel.kind),
        parent_id: channel.parent_id.map(|id| id.get()),
        position: channel.position,
    }
}

fn role_from_serenity(role: &Role) -> PlatformRole {
    PlatformRole {
        id: role.id.get(),
        name: role.name.clone(),
        color: Rgb::from_u32(role.colour.0),
        position: role.position,
    }
}

/// Whether Discord answered 404 (unknown channel, role or member).
fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

#[async_trait]
impl ChannelPlatform for SerenityPlatform {
    async fn get_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<PlatformChannel>, AppError> {
        let cached = self.ctx.cache.guild(GuildId::new(guild_id)).map(|guild| {
            guild
                .channels
                .get(&ChannelId::new(channel_id))
                .map(channel_from_serenity)
        });

        if let Some(channel) = cached {
            return Ok(channel);
        }

        match ChannelId::new(channel_id).to_channel(&self.ctx.http).await {
            Ok(channel) => Ok(channel.guild().as_ref().map(channel_from_serenity)),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_channels(&self, guild_id: u64) -> Result<Vec<PlatformChannel>, AppError> {
        let channels = GuildId::new(guild_id).channels(&self.ctx.http).await?;

        Ok(channels.values().map(channel_from_serenity).collect())
    }

    async fn create_channel(
        &self,
        guild_id: u64,
        param: CreateChannelParam,
    ) -> Result<PlatformChannel, AppError> {
        let mut builder = CreateChannel::new(param.name).kind(channel_type(param.kind));
        if let Some(parent_id) = param.parent_id {
            builder = builder.category(ChannelId::new(parent_id));
        }
        if let Some(position) = param.position {
            builder = builder.position(position);
        }

        let channel = GuildId::new(guild_id)
            .create_channel(&self.ctx.http, builder)
            .await?;

        Ok(channel_from_serenity(&channel))
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        match ChannelId::new(channel_id).delete(&self.ctx.http).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn move_member(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
    ) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .move_member(
                &self.ctx.http,
                UserId::new(user_id),
                ChannelId::new(channel_id),
            )
            .await?;

        Ok(())
    }

    async fn voice_members(&self, guild_id: u64, channel_id: u64) -> Result<Vec<u64>, AppError> {
        let channel_id = ChannelId::new(channel_id);

        self.ctx
            .cache
            .guild(GuildId::new(guild_id))
            .map(|guild| {
                guild
                    .voice_states
                    .values()
                    .filter(|state| state.channel_id == Some(channel_id))
                    .map(|state| state.user_id.get())
                    .collect()
            })
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Guild {} is not cached, voice members are unavailable",
                    guild_id
                ))
            })
    }
}

#[async_trait]
impl RolePlatform for SerenityPlatform {
    async fn find_role_by_name(
        &self,
        guild_id: u64,
        name: &str,
    ) -> Result<Option<PlatformRole>, AppError> {
        let roles = self.roles(guild_id).await?;

        Ok(roles.into_iter().find(|role| role.name == name))
    }

    async fn create_role(
        &self,
        guild_id: u64,
        name: &str,
        color: Rgb,
    ) -> Result<PlatformRole, AppError> {
        let role = GuildId::new(guild_id)
            .create_role(
                &self.ctx.http,
                EditRole::new().name(name).colour(color.to_u32()),
            )
            .await?;

        Ok(role_from_serenity(&role))
    }

    async fn edit_role_color(
        &self,
        guild_id: u64,
        role_id: u64,
        color: Rgb,
    ) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .edit_role(
                &self.ctx.http,
                RoleId::new(role_id),
                EditRole::new().colour(color.to_u32()),
            )
            .await?;

        Ok(())
    }

    async fn edit_role_position(
        &self,
        guild_id: u64,
        role_id: u64,
        position: u16,
    ) -> Result<(), AppError> {
        GuildId::new(guild_id)
            .edit_role_position(&self.ctx.http, RoleId::new(role_id), position)
            .await?;

        Ok(())
    }

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), AppError> {
        match GuildId::new(guild_id)
            .delete_role(&self.ctx.http, RoleId::new(role_id))
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if is_not_found(&e) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn add_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.ctx
            .http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await?;

        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.ctx
            .http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await?;

        Ok(())
    }
}
