//! Main guild setup.
//!
//! `guild_create` fires for the main guild on every startup and after outages. The
//! handler registers the slash commands, catches up on members and habitués that
//! changed while the bot was offline, repairs the party registry, and starts the
//! periodic reconciliation the first time around.

use std::sync::atomic::Ordering;

use serenity::all::{Context, Guild, Member};

use crate::{
    bot::{command, handler::Handler},
    model::member::GuildMember,
    platform::SerenityPlatform,
    scheduler::party_reconcile,
    service::{habitue::HabitueService, member::MemberService, party::PartyService},
};

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request.
static MEMBERS_PER_REQUEST: u64 = 1000;

/// Handles the guild_create event of the main guild.
///
/// # Arguments
/// - `handler` - Bot handler holding the database, configuration and shared state
/// - `ctx` - Discord context for API requests
/// - `guild` - Guild data from Discord
pub async fn handle_main_guild_create(handler: &Handler, ctx: Context, guild: Guild) {
    let guild_id = guild.id.get();

    tracing::debug!(
        "Main guild available: {} ({}) - member_count: {}",
        guild.name,
        guild_id,
        guild.member_count,
    );

    match guild.id.set_commands(&ctx.http, command::all()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }

    let members: Vec<GuildMember> = fetch_all_members(&ctx, &guild)
        .await
        .iter()
        .map(GuildMember::from_member)
        .collect();

    match MemberService::new(&handler.db).sync_members(&members).await {
        Ok(added) => tracing::debug!("New members: {:?}", added),
        Err(e) => tracing::error!("Failed to sync guild {} members: {}", guild_id, e),
    }

    let platform = SerenityPlatform::new(ctx.clone());

    let habitue_service = HabitueService::new(
        &handler.db,
        &platform,
        &handler.habitue_in_flight,
        handler.config.habitue_role_id,
        &handler.config.color_anchor_role,
    );
    if let Err(e) = habitue_service.sync_habitues(&members).await {
        tracing::error!("Failed to sync guild {} habitues: {}", guild_id, e);
    }

    let party_service = PartyService::new(
        &handler.db,
        &platform,
        &handler.party_locks,
        handler.config.party_grace_period,
    );
    if let Err(e) = party_service.reconcile(guild_id).await {
        tracing::error!("Failed to reconcile parties of guild {}: {}", guild_id, e);
    }

    if !handler.scheduler_started.swap(true, Ordering::SeqCst) {
        if let Err(e) = party_reconcile::start_scheduler(
            handler.db.clone(),
            ctx,
            handler.party_locks.clone(),
            handler.config.clone(),
        )
        .await
        {
            tracing::error!("Party reconciliation scheduler error: {}", e);
            handler.scheduler_started.store(false, Ordering::SeqCst);
        }
    }
}

/// Fetches every member of the guild, paginating through the API.
///
/// Falls back to the members delivered with the guild payload if the API fails.
/// Requires the GUILD_MEMBERS privileged intent.
async fn fetch_all_members(ctx: &Context, guild: &Guild) -> Vec<Member> {
    let mut all_members = Vec::new();
    let mut after: Option<u64> = None;

    loop {
        match ctx
            .http
            .get_guild_members(guild.id, Some(MEMBERS_PER_REQUEST), after)
            .await
        {
            Ok(members) => {
                if members.is_empty() {
                    break;
                }

                after = members.last().map(|m| m.user.id.get());
                let fetched_count = members.len();
                all_members.extend(members);

                if fetched_count < MEMBERS_PER_REQUEST as usize {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch guild {} members from API: {:?}",
                    guild.id,
                    e
                );
                return guild.members.values().cloned().collect();
            }
        }
    }

    tracing::trace!(
        "Fetched total of {} members for guild {}",
        all_members.len(),
        guild.id
    );

    all_members
}
