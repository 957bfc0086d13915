//! Guild member snapshot handed from gateway events to the services.

use serenity::all::{GuildMemberUpdateEvent, Member};

/// The parts of a guild member the services act on.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildMember {
    pub user_id: u64,
    /// Nickname, global name or username, whichever the guild shows.
    pub display_name: String,
    pub is_bot: bool,
    pub role_ids: Vec<u64>,
}

impl GuildMember {
    pub fn from_member(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            display_name: member.display_name().to_string(),
            is_bot: member.user.bot,
            role_ids: member.roles.iter().map(|role| role.get()).collect(),
        }
    }

    /// Builds the member from a member-update payload, which is complete even
    /// when the member is not cached.
    pub fn from_update_event(event: &GuildMemberUpdateEvent) -> Self {
        let display_name = event
            .nick
            .clone()
            .or_else(|| event.user.global_name.clone())
            .unwrap_or_else(|| event.user.name.clone());

        Self {
            user_id: event.user.id.get(),
            display_name,
            is_bot: event.user.bot,
            role_ids: event.roles.iter().map(|role| role.get()).collect(),
        }
    }

    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}
