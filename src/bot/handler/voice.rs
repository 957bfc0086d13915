//! Voice state handler driving the party lifecycle.

use serenity::all::{Context, VoiceState};

use crate::{
    bot::handler::Handler, model::voice::VoicePresenceChange, platform::SerenityPlatform,
    service::party::PartyService,
};

/// Handles a voice state update in the main guild.
///
/// Events that do not change a member's channel are dropped. Errors are logged;
/// the next reconciliation pass repairs whatever a failed event left behind.
///
/// # Arguments
/// - `handler` - Bot handler holding the database and party locks
/// - `ctx` - Discord context for channel operations
/// - `old` - Cached voice state before the update, if any
/// - `new` - Voice state after the update
pub async fn handle_voice_state_update(
    handler: &Handler,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(change) = VoicePresenceChange::from_voice_states(old.as_ref(), &new) else {
        return;
    };

    if change.guild_id != handler.config.main_guild_id {
        return;
    }

    let platform = SerenityPlatform::new(ctx);
    let service = PartyService::new(
        &handler.db,
        &platform,
        &handler.party_locks,
        handler.config.party_grace_period,
    );

    match service.handle_voice_change(&change).await {
        Ok(outcome) => tracing::debug!(
            "Voice change of {} ({:?} -> {:?}): {:?}",
            change.display_name,
            change.previous_channel_id,
            change.new_channel_id,
            outcome
        ),
        Err(e) => tracing::error!(
            "Failed to handle voice change of {}: {}",
            change.display_name,
            e
        ),
    }
}
