use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildMemberUpdateEvent, Member, User};

use crate::{
    bot::handler::Handler,
    model::member::GuildMember,
    platform::SerenityPlatform,
    service::{habitue::HabitueService, member::MemberService},
};

/// Handles the guild_member_addition event when a member joins the main guild
pub async fn handle_guild_member_addition(db: &DatabaseConnection, new_member: Member) {
    let member = GuildMember::from_member(&new_member);

    if let Err(e) = MemberService::new(db).member_joined(&member).await {
        tracing::error!(
            "Failed to register member {} ({}): {}",
            member.display_name,
            member.user_id,
            e
        );
    }
}

/// Handles the guild_member_removal event when a member leaves the main guild
pub async fn handle_guild_member_removal(db: &DatabaseConnection, user: User) {
    if let Err(e) = MemberService::new(db).member_left(user.id.get()).await {
        tracing::error!("Failed to remove member {} ({}): {}", user.name, user.id, e);
    }
}

/// Handles the guild_member_update event
///
/// Keeps the stored display name current and follows the habitué role being
/// granted or revoked.
pub async fn handle_guild_member_update(
    handler: &Handler,
    ctx: Context,
    old_if_available: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    let member = GuildMember::from_update_event(&event);
    let old = old_if_available.as_ref().map(GuildMember::from_member);

    let renamed = old
        .as_ref()
        .map_or(true, |old| old.display_name != member.display_name);
    if renamed {
        if let Err(e) = MemberService::new(&handler.db).member_renamed(&member).await {
            tracing::error!("Failed to rename member {}: {}", member.user_id, e);
        }
    }

    let platform = SerenityPlatform::new(ctx);
    let service = HabitueService::new(
        &handler.db,
        &platform,
        &handler.habitue_in_flight,
        handler.config.habitue_role_id,
        &handler.config.color_anchor_role,
    );

    let old_roles = old.as_ref().map(|old| old.role_ids.as_slice());
    match service
        .handle_member_update(event.guild_id.get(), old_roles, &member)
        .await
    {
        Ok(outcome) => tracing::trace!("Member update of {}: {:?}", member.display_name, outcome),
        Err(e) => tracing::error!(
            "Failed to update habitue status of {}: {}",
            member.display_name,
            e
        ),
    }
}
