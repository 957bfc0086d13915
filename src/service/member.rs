//! Member registry upkeep.
//!
//! Every non-bot member of the main guild has a user row; parties and habitué
//! rows hang off it and disappear with it.

use sea_orm::DatabaseConnection;

use crate::{
    data::user::UserRepository,
    error::AppError,
    model::{
        member::GuildMember,
        user::{UpsertUserParam, User},
    },
};

pub struct MemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a member who joined the guild.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The registered user
    /// - `Ok(None)` - The member is a bot and was skipped
    /// - `Err(AppError)` - Database error
    pub async fn member_joined(&self, member: &GuildMember) -> Result<Option<User>, AppError> {
        if member.is_bot {
            return Ok(None);
        }

        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id: member.user_id,
                name: member.display_name.clone(),
            })
            .await?;

        tracing::info!("Registered member {} ({})", user.name, user.discord_id);

        Ok(Some(user))
    }

    /// Removes a member who left the guild, with their parties and habitué row.
    ///
    /// # Returns
    /// - `Ok(true)` - The member was registered and has been removed
    /// - `Ok(false)` - The member was not registered
    pub async fn member_left(&self, user_id: u64) -> Result<bool, AppError> {
        let removed = UserRepository::new(self.db).delete(user_id).await?;

        if removed {
            tracing::info!("Removed member {}", user_id);
        }

        Ok(removed)
    }

    /// Stores a member's new display name.
    ///
    /// # Returns
    /// - `Ok(true)` - The stored name was updated
    /// - `Ok(false)` - The member is a bot or not registered
    pub async fn member_renamed(&self, member: &GuildMember) -> Result<bool, AppError> {
        if member.is_bot {
            return Ok(false);
        }

        UserRepository::new(self.db)
            .update_name(member.user_id, member.display_name.clone())
            .await
    }

    /// Registers every non-bot member missing from the registry.
    ///
    /// Catches up on joins missed while the bot was offline. Existing rows are left
    /// as they are.
    ///
    /// # Arguments
    /// - `members` - Current members of the guild
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Display names of the members that were added
    /// - `Err(AppError)` - Database error
    pub async fn sync_members(&self, members: &[GuildMember]) -> Result<Vec<String>, AppError> {
        let params = members
            .iter()
            .filter(|member| !member.is_bot)
            .map(|member| UpsertUserParam {
                discord_id: member.user_id,
                name: member.display_name.clone(),
            })
            .collect();

        let added = UserRepository::new(self.db).insert_missing(params).await?;

        tracing::info!("Added {} new members to the database", added.len());

        Ok(added.into_iter().map(|user| user.name).collect())
    }
}
