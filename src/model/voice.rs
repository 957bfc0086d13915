//! Voice presence transitions delivered by the gateway.

use serenity::all::VoiceState;

/// A member's voice presence change, reduced to what the party lifecycle needs.
#[derive(Debug, Clone, PartialEq)]
pub struct VoicePresenceChange {
    pub guild_id: u64,
    pub user_id: u64,
    /// Guild display name, used to name new party channels.
    pub display_name: String,
    pub is_bot: bool,
    /// Channel the member was connected to before the change.
    pub previous_channel_id: Option<u64>,
    /// Channel the member is connected to after the change.
    pub new_channel_id: Option<u64>,
}

impl VoicePresenceChange {
    /// Builds a presence change from serenity's old/new voice states.
    ///
    /// Returns `None` for events outside a guild, and for events where the channel
    /// did not change (mute, deafen, stream toggles), which carry nothing for the
    /// party lifecycle.
    ///
    /// # Arguments
    /// - `old` - Cached voice state before the update, if the cache had one
    /// - `new` - Voice state after the update
    ///
    /// # Returns
    /// - `Some(VoicePresenceChange)` - A guild member changed voice channel
    /// - `None` - Nothing relevant happened
    pub fn from_voice_states(old: Option<&VoiceState>, new: &VoiceState) -> Option<Self> {
        let guild_id = new.guild_id.or_else(|| old.and_then(|o| o.guild_id))?;

        let previous_channel_id = old.and_then(|o| o.channel_id).map(|id| id.get());
        let new_channel_id = new.channel_id.map(|id| id.get());

        if previous_channel_id == new_channel_id {
            return None;
        }

        let (display_name, is_bot) = match &new.member {
            Some(member) => (member.display_name().to_string(), member.user.bot),
            None => (new.user_id.get().to_string(), false),
        };

        Some(Self {
            guild_id: guild_id.get(),
            user_id: new.user_id.get(),
            display_name,
            is_bot,
            previous_channel_id,
            new_channel_id,
        })
    }
}
