//! Habitué colour roles.
//!
//! Habitués get a personal role named after them whose colour they choose. The
//! role sits under the colour section anchor role so it wins over the member's
//! other coloured roles. Granting or revoking the habitué role, by command or by
//! hand, creates or removes the colour role and the stored colour.
//!
//! The bot's own role edits come back as member-update events. Members being
//! processed are tracked in an [`InFlight`] set and their update events ignored.

use sea_orm::DatabaseConnection;

use crate::{
    data::{habitue::HabitueRepository, user::UserRepository},
    error::AppError,
    model::{
        color::Rgb,
        habitue::{color_role_name, Habitue},
        member::GuildMember,
        user::UpsertUserParam,
    },
    platform::{PlatformRole, RolePlatform},
    service::concurrency::InFlight,
};

/// What a member update meant for the habitué role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitueUpdate {
    /// The member is being processed by the bot; the event is its own echo.
    Busy,
    Added,
    Removed,
    Unchanged,
}

pub struct HabitueService<'a, P: RolePlatform> {
    db: &'a DatabaseConnection,
    platform: &'a P,
    in_flight: &'a InFlight<u64>,
    habitue_role_id: u64,
    color_anchor_role: &'a str,
}

impl<'a, P: RolePlatform> HabitueService<'a, P> {
    /// Creates a new HabitueService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `platform` - Chat platform the roles live on
    /// - `in_flight` - Process-wide set of members being processed
    /// - `habitue_role_id` - ID of the habitué role
    /// - `color_anchor_role` - Name of the role colour roles are placed under
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a P,
        in_flight: &'a InFlight<u64>,
        habitue_role_id: u64,
        color_anchor_role: &'a str,
    ) -> Self {
        Self {
            db,
            platform,
            in_flight,
            habitue_role_id,
            color_anchor_role,
        }
    }

    fn busy(member: &GuildMember) -> AppError {
        AppError::BadRequest(format!(
            "{} is already being updated, try again in a moment.",
            member.display_name
        ))
    }

    /// Makes a member a habitué.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the member
    /// - `member` - Member to promote
    /// - `color` - Initial colour, black when omitted
    ///
    /// # Returns
    /// - `Ok(Habitue)` - The stored habitué
    /// - `Err(AppError::BadRequest)` - Already a habitué, or being processed
    /// - `Err(AppError)` - Platform or database error
    pub async fn add_habitue(
        &self,
        guild_id: u64,
        member: &GuildMember,
        color: Option<Rgb>,
    ) -> Result<Habitue, AppError> {
        if member.has_role(self.habitue_role_id) {
            return Err(AppError::BadRequest(format!(
                "{} is already an habitue",
                member.display_name
            )));
        }

        let _guard = self
            .in_flight
            .try_acquire(member.user_id)
            .ok_or_else(|| Self::busy(member))?;

        self.add(guild_id, member, color).await
    }

    /// Revokes a member's habitué status.
    ///
    /// # Returns
    /// - `Ok(())` - Roles and stored colour removed
    /// - `Err(AppError::BadRequest)` - Not a habitué, or being processed
    /// - `Err(AppError)` - Platform or database error
    pub async fn remove_habitue(&self, guild_id: u64, member: &GuildMember) -> Result<(), AppError> {
        if !member.has_role(self.habitue_role_id) {
            return Err(AppError::BadRequest(format!(
                "{} is not an habitue",
                member.display_name
            )));
        }

        let _guard = self
            .in_flight
            .try_acquire(member.user_id)
            .ok_or_else(|| Self::busy(member))?;

        self.remove(guild_id, member).await
    }

    /// Changes a habitué's colour, recreating their colour role if it went missing.
    ///
    /// # Returns
    /// - `Ok(String)` - Display name of the new colour
    /// - `Err(AppError::BadRequest)` - The member is not a habitué
    /// - `Err(AppError::NotFound)` - The colour role is missing and cannot be recreated
    /// - `Err(AppError)` - Platform or database error
    pub async fn set_color(
        &self,
        guild_id: u64,
        member: &GuildMember,
        color: Rgb,
    ) -> Result<String, AppError> {
        if !member.has_role(self.habitue_role_id) {
            return Err(AppError::BadRequest(
                "Only habitues can choose a color.".to_string(),
            ));
        }

        let _guard = self
            .in_flight
            .try_acquire(member.user_id)
            .ok_or_else(|| Self::busy(member))?;

        let role_name = color_role_name(&member.display_name);
        let role = match self.platform.find_role_by_name(guild_id, &role_name).await? {
            Some(role) => role,
            None => {
                tracing::warn!(
                    "Role {} not found, {} seems to be an habitue, creating the color role",
                    role_name,
                    member.display_name
                );
                let role = self
                    .create_color_role(guild_id, &member.display_name, color)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!(
                            "The color role of {} could not be created.",
                            member.display_name
                        ))
                    })?;
                self.platform
                    .add_member_role(guild_id, member.user_id, role.id)
                    .await?;
                role
            }
        };

        self.platform
            .edit_role_color(guild_id, role.id, color)
            .await?;

        self.ensure_user(member).await?;
        HabitueRepository::new(self.db)
            .upsert(member.user_id, color)
            .await?;

        Ok(color.to_hex())
    }

    /// Reacts to a member's roles changing.
    ///
    /// Detects the habitué role being granted or revoked. When the previous roles
    /// are unknown (member not cached), the stored habitué row stands in for them.
    /// A grant for a member who already has a row keeps the stored colour.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the member
    /// - `old_roles` - Role IDs before the update, if known
    /// - `member` - Member after the update
    ///
    /// # Returns
    /// - `Ok(HabitueUpdate)` - What was done
    /// - `Err(AppError)` - Platform or database error
    pub async fn handle_member_update(
        &self,
        guild_id: u64,
        old_roles: Option<&[u64]>,
        member: &GuildMember,
    ) -> Result<HabitueUpdate, AppError> {
        if member.is_bot {
            return Ok(HabitueUpdate::Unchanged);
        }

        let Some(_guard) = self.in_flight.try_acquire(member.user_id) else {
            return Ok(HabitueUpdate::Busy);
        };

        let stored = HabitueRepository::new(self.db)
            .find_by_discord_id(member.user_id)
            .await?
            .is_some();
        let was_habitue = match old_roles {
            Some(roles) => roles.contains(&self.habitue_role_id),
            None => stored,
        };
        let is_habitue = member.has_role(self.habitue_role_id);

        match (was_habitue, is_habitue) {
            // Echo of a grant the bot made itself, arriving after the command ended.
            (false, true) if stored => Ok(HabitueUpdate::Unchanged),
            (false, true) => {
                tracing::info!("{} was given the habitue role", member.display_name);
                self.add(guild_id, member, None).await?;
                Ok(HabitueUpdate::Added)
            }
            (true, false) => {
                tracing::info!("{} was removed from the habitue role", member.display_name);
                self.remove(guild_id, member).await?;
                Ok(HabitueUpdate::Removed)
            }
            _ => Ok(HabitueUpdate::Unchanged),
        }
    }

    /// Stores a row for every habitué missing from the table.
    ///
    /// Roles are left alone; only the stored colour (black) is created.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Display names of the habitués added
    /// - `Err(AppError)` - Database error
    pub async fn sync_habitues(&self, members: &[GuildMember]) -> Result<Vec<String>, AppError> {
        let repo = HabitueRepository::new(self.db);
        let existing = repo.get_all_ids().await?;

        let mut added = Vec::new();
        for member in members {
            if member.is_bot
                || !member.has_role(self.habitue_role_id)
                || existing.contains(&member.user_id)
            {
                continue;
            }

            self.ensure_user(member).await?;
            repo.upsert(member.user_id, Rgb::BLACK).await?;
            added.push(member.display_name.clone());
        }

        tracing::info!("Added {} new habitues to the database", added.len());
        tracing::debug!("New habitues: {:?}", added);

        Ok(added)
    }

    async fn add(
        &self,
        guild_id: u64,
        member: &GuildMember,
        color: Option<Rgb>,
    ) -> Result<Habitue, AppError> {
        let color = color.unwrap_or_default();

        let color_role = self
            .create_color_role(guild_id, &member.display_name, color)
            .await?;

        if !member.has_role(self.habitue_role_id) {
            self.platform
                .add_member_role(guild_id, member.user_id, self.habitue_role_id)
                .await?;
        }

        match &color_role {
            Some(role) => {
                self.platform
                    .add_member_role(guild_id, member.user_id, role.id)
                    .await?;
            }
            None => tracing::info!(
                "Added habitue {} without color role",
                member.display_name
            ),
        }

        self.ensure_user(member).await?;
        let habitue = HabitueRepository::new(self.db)
            .upsert(member.user_id, color)
            .await?;

        tracing::info!("Added habitue {}", member.display_name);

        Ok(habitue)
    }

    async fn remove(&self, guild_id: u64, member: &GuildMember) -> Result<(), AppError> {
        let role_name = color_role_name(&member.display_name);
        match self.platform.find_role_by_name(guild_id, &role_name).await? {
            Some(role) => self.platform.delete_role(guild_id, role.id).await?,
            None => tracing::warn!("Role {} not found in guild {}", role_name, guild_id),
        }

        if member.has_role(self.habitue_role_id) {
            self.platform
                .remove_member_role(guild_id, member.user_id, self.habitue_role_id)
                .await?;
        }

        HabitueRepository::new(self.db)
            .delete(member.user_id)
            .await?;

        tracing::info!("Removed habitue {}", member.display_name);

        Ok(())
    }

    /// Finds or creates the member's colour role.
    ///
    /// # Returns
    /// - `Ok(Some(PlatformRole))` - Existing or new colour role
    /// - `Ok(None)` - The colour anchor role is missing, no role created
    /// - `Err(AppError)` - Platform error
    async fn create_color_role(
        &self,
        guild_id: u64,
        display_name: &str,
        color: Rgb,
    ) -> Result<Option<PlatformRole>, AppError> {
        let role_name = color_role_name(display_name);

        if let Some(existing) = self.platform.find_role_by_name(guild_id, &role_name).await? {
            tracing::debug!("Color role for {} already exists", display_name);
            return Ok(Some(existing));
        }

        let Some(anchor) = self
            .platform
            .find_role_by_name(guild_id, self.color_anchor_role)
            .await?
        else {
            tracing::error!(
                "Color anchor role '{}' not found in guild {}",
                self.color_anchor_role,
                guild_id
            );
            return Ok(None);
        };

        tracing::info!("Creating color role {}", role_name);
        let role = self.platform.create_role(guild_id, &role_name, color).await?;

        if let Err(e) = self
            .platform
            .edit_role_position(guild_id, role.id, anchor.position)
            .await
        {
            tracing::warn!("Could not position color role {}: {}", role_name, e);
        }

        Ok(Some(role))
    }

    /// Habitué rows reference the user table.
    async fn ensure_user(&self, member: &GuildMember) -> Result<(), AppError> {
        UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id: member.user_id,
                name: member.display_name.clone(),
            })
            .await?;

        Ok(())
    }
}
