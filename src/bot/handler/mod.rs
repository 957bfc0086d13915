use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, Guild, GuildId, GuildMemberUpdateEvent, Interaction, Member, Ready,
    User, VoiceState,
};
use serenity::async_trait;

use crate::{
    config::Config,
    service::{concurrency::InFlight, party::PartyLocks},
};

pub mod guild;
pub mod interaction;
pub mod member;
pub mod ready;
pub mod voice;

/// Discord bot event handler
///
/// Serenity runs every event on its own task; the lock and in-flight set below are
/// what those tasks coordinate through.
pub struct Handler {
    pub db: DatabaseConnection,
    pub config: Config,
    /// Shared with the reconciliation scheduler.
    pub party_locks: Arc<PartyLocks>,
    pub habitue_in_flight: InFlight<u64>,
    pub scheduler_started: AtomicBool,
}

impl Handler {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config,
            party_locks: Arc::new(PartyLocks::new()),
            habitue_in_flight: InFlight::new(),
            scheduler_started: AtomicBool::new(false),
        }
    }

    fn is_main_guild(&self, guild_id: GuildId) -> bool {
        guild_id.get() == self.config.main_guild_id
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, _is_new: Option<bool>) {
        if self.is_main_guild(guild.id) {
            guild::handle_main_guild_create(self, ctx, guild).await;
        }
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, _ctx: Context, new_member: Member) {
        if self.is_main_guild(new_member.guild_id) {
            member::handle_guild_member_addition(&self.db, new_member).await;
        }
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        _ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        if self.is_main_guild(guild_id) {
            member::handle_guild_member_removal(&self.db, user).await;
        }
    }

    /// Called when a member is updated in a guild (roles, nickname, etc.)
    async fn guild_member_update(
        &self,
        ctx: Context,
        old_if_available: Option<Member>,
        _new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        if self.is_main_guild(event.guild_id) {
            member::handle_guild_member_update(self, ctx, old_if_available, event).await;
        }
    }

    /// Called when a member joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(self, ctx, old, new).await;
    }

    /// Called on slash commands and their autocompletion requests
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(self, ctx, interaction).await;
    }
}
