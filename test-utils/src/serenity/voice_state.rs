//! Test factory for creating Serenity VoiceState objects.

use serenity::all::VoiceState;

use crate::serenity::member::member_json;

/// Creates a test Serenity VoiceState.
///
/// # Arguments
/// - `guild_id` - Guild the voice state belongs to
/// - `user_id` - Discord user ID
/// - `channel_id` - Connected voice channel, `None` when disconnected
/// - `display_name` - Embeds a member object with this display name; `None` omits the member
/// - `is_bot` - Whether the embedded member is a bot
///
/// # Panics
/// - If the JSON cannot be deserialized into a VoiceState (indicates invalid test data)
pub fn create_test_voice_state(
    guild_id: u64,
    user_id: u64,
    channel_id: Option<u64>,
    display_name: Option<&str>,
    is_bot: bool,
) -> VoiceState {
    let member = display_name.map(|name| member_json(guild_id, user_id, name, is_bot));

    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "channel_id": channel_id.map(|id| id.to_string()),
        "user_id": user_id.to_string(),
        "member": member,
        "session_id": "test-session",
        "deaf": false,
        "mute": false,
        "self_deaf": false,
        "self_mute": false,
        "self_stream": false,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state - invalid JSON structure")
}
