//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

/// Builds the JSON payload of a guild member.
///
/// Shared with the voice state factory, which embeds a member object.
pub(crate) fn member_json(
    guild_id: u64,
    user_id: u64,
    display_name: &str,
    is_bot: bool,
) -> serde_json::Value {
    serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": {
            "id": user_id.to_string(),
            "username": display_name.to_lowercase(),
            "global_name": display_name,
            "discriminator": "0",
            "avatar": null,
            "bot": is_bot,
        },
        "nick": null,
        "avatar": null,
        "roles": [],
        "joined_at": "2026-01-10T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
    })
}

/// Creates a test Serenity Member.
///
/// The display name is set as the user's global name, so `Member::display_name`
/// returns it.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID
/// - `display_name` - Name the member is shown as
/// - `is_bot` - Whether the account is a bot
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(guild_id: u64, user_id: u64, display_name: &str, is_bot: bool) -> Member {
    serde_json::from_value(member_json(guild_id, user_id, display_name, is_bot))
        .expect("Failed to create test member - invalid JSON structure")
}
