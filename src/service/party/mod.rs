//! Party lifecycle: creating, reusing and removing party voice channels.
//!
//! Joining a game's lobby channel gives the member their own party channel for that
//! game, created on first join and reused afterwards. When the last member leaves a
//! party channel it is deleted together with its registry row once the grace period
//! has passed without anyone coming back.
//!
//! Every step that reads the registry and then acts on it runs under the
//! `(owner_id, game_category_id)` key of a shared [`KeyedLock`], so a member
//! double-joining the lobby cannot end up with two parties and a party being
//! reused cannot be deleted under their feet.

#[cfg(test)]
mod test;

use std::collections::HashSet;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::{
    data::{game_category::GameCategoryRepository, party::PartyRepository, user::UserRepository},
    error::AppError,
    model::{
        game_category::GameCategory,
        party::{is_party_channel_name, party_channel_name, CreatePartyParam, Party},
        user::UpsertUserParam,
        voice::VoicePresenceChange,
    },
    platform::{snowflake_age, ChannelKind, ChannelPlatform, CreateChannelParam},
    service::concurrency::KeyedLock,
};

/// Lock key of a party: owner and game category.
pub type PartyKey = (u64, u64);

/// Locks shared by every party operation of the process.
pub type PartyLocks = KeyedLock<PartyKey>;

/// Unregistered party channels younger than this are left alone by reconciliation;
/// they may belong to a join that has not registered its row yet.
const ORPHAN_MIN_AGE: Duration = Duration::from_secs(60);

/// Result of a member joining a lobby channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The member was moved into the party they already had.
    Reused { channel_id: u64 },
    /// A new party channel was created, registered, and the member moved into it.
    Created { channel_id: u64 },
    /// The lobby is not inside a category; nothing was created.
    NoValidParent,
}

/// Result of a member leaving a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The channel is not a party channel.
    NotAParty,
    /// Someone is still (or again) connected after the grace period.
    StillOccupied,
    /// The party was removed from the registry.
    ///
    /// `channel_deleted` is false when deleting the platform channel failed; the
    /// empty channel is then left for reconciliation.
    Removed {
        channel_id: u64,
        channel_deleted: bool,
    },
}

/// Outcomes of both halves of a voice presence change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceChangeOutcome {
    pub join: Option<JoinOutcome>,
    pub leave: Option<LeaveOutcome>,
}

/// Counts of what a reconciliation pass cleaned up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Registry rows whose channel no longer existed.
    pub stale_rows_removed: usize,
    /// Registered parties whose channel was empty, removed from platform and registry.
    pub empty_parties_removed: usize,
    /// Empty party channels without a registry row that were deleted.
    pub orphan_channels_removed: usize,
}

pub struct PartyService<'a, P: ChannelPlatform> {
    db: &'a DatabaseConnection,
    platform: &'a P,
    locks: &'a PartyLocks,
    grace_period: Duration,
}

impl<'a, P: ChannelPlatform> PartyService<'a, P> {
    /// Creates a new PartyService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection holding the party registry
    /// - `platform` - Chat platform the channels live on
    /// - `locks` - Process-wide party locks
    /// - `grace_period` - Delay before an emptied party channel is re-checked
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a P,
        locks: &'a PartyLocks,
        grace_period: Duration,
    ) -> Self {
        Self {
            db,
            platform,
            locks,
            grace_period,
        }
    }

    /// Processes one voice presence change.
    ///
    /// A single change may both leave a party channel and join a lobby. The join is
    /// handled first so the member lands in their party without waiting for the
    /// grace period of the channel they left. Both halves always run; the first
    /// error is returned afterwards.
    ///
    /// Bots never get a party, but a bot leaving still counts for emptiness.
    ///
    /// # Returns
    /// - `Ok(VoiceChangeOutcome)` - What happened on each side of the change
    /// - `Err(AppError)` - Database or platform error in either half
    pub async fn handle_voice_change(
        &self,
        change: &VoicePresenceChange,
    ) -> Result<VoiceChangeOutcome, AppError> {
        let join = match change.new_channel_id {
            Some(channel_id) if !change.is_bot => {
                self.join_if_lobby(change, channel_id).await
            }
            _ => Ok(None),
        };

        let leave = match change.previous_channel_id {
            Some(channel_id) => self
                .handle_channel_left(change.guild_id, channel_id)
                .await
                .map(Some),
            None => Ok(None),
        };

        Ok(VoiceChangeOutcome {
            join: join?,
            leave: leave?,
        })
    }

    async fn join_if_lobby(
        &self,
        change: &VoicePresenceChange,
        channel_id: u64,
    ) -> Result<Option<JoinOutcome>, AppError> {
        let category_repo = GameCategoryRepository::new(self.db);

        let Some(category) = category_repo.find_by_lobby(channel_id).await? else {
            return Ok(None);
        };

        self.handle_lobby_join(
            change.guild_id,
            change.user_id,
            &change.display_name,
            &category,
        )
        .await
        .map(Some)
    }

    /// Gives a member who joined a game's lobby their party channel.
    ///
    /// Reuses the member's registered party when its channel still exists. A row
    /// whose channel is gone is dropped and a fresh party created in its place. New
    /// channels are created under the lobby's category; if registering the channel
    /// fails the channel is deleted again, and if moving the member fails the new
    /// party is rolled back entirely.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the lobby
    /// - `user_id` - Member who joined
    /// - `display_name` - Member's display name, used for the channel name
    /// - `category` - Game category the lobby belongs to
    ///
    /// # Returns
    /// - `Ok(JoinOutcome::Reused)` - Moved into the existing party
    /// - `Ok(JoinOutcome::Created)` - New party created and member moved
    /// - `Ok(JoinOutcome::NoValidParent)` - Lobby has no category parent
    /// - `Err(AppError)` - Database or platform error
    pub async fn handle_lobby_join(
        &self,
        guild_id: u64,
        user_id: u64,
        display_name: &str,
        category: &GameCategory,
    ) -> Result<JoinOutcome, AppError> {
        let party_repo = PartyRepository::new(self.db);

        let _guard = self.locks.lock((user_id, category.id)).await;

        if let Some(party) = party_repo.get_by_owner_and_game(user_id, category.id).await? {
            if self
                .platform
                .get_channel(guild_id, party.channel_id)
                .await?
                .is_some()
            {
                self.platform
                    .move_member(guild_id, user_id, party.channel_id)
                    .await?;

                tracing::debug!(
                    "Moved {} back into their party {} for {}",
                    display_name,
                    party.channel_id,
                    category.name
                );

                return Ok(JoinOutcome::Reused {
                    channel_id: party.channel_id,
                });
            }

            tracing::info!(
                "Party channel {} of {} for {} no longer exists, dropping stale row",
                party.channel_id,
                display_name,
                category.name
            );
            party_repo.delete(party.channel_id).await?;
        }

        let Some(parent_id) = self.lobby_parent(guild_id, category).await? else {
            tracing::debug!(
                "Lobby {} of {} is not inside a category, no party created",
                category.voice_id,
                category.name
            );
            return Ok(JoinOutcome::NoValidParent);
        };

        UserRepository::new(self.db)
            .upsert(UpsertUserParam {
                discord_id: user_id,
                name: display_name.to_string(),
            })
            .await?;

        let name = party_channel_name(display_name);
        let channel = self
            .platform
            .create_channel(
                guild_id,
                CreateChannelParam::new(name.clone(), ChannelKind::Voice).parent(parent_id),
            )
            .await?;

        let param = CreatePartyParam {
            channel_id: channel.id,
            game_category_id: category.id,
            owner_id: user_id,
            name,
        };

        if let Err(e) = party_repo.insert(param).await {
            self.discard_channel(channel.id).await;
            return Err(e);
        }

        if let Err(e) = self
            .platform
            .move_member(guild_id, user_id, channel.id)
            .await
        {
            self.discard_channel(channel.id).await;
            if let Err(delete_err) = party_repo.delete(channel.id).await {
                tracing::error!(
                    "Failed to remove party row {} after a failed move: {}",
                    channel.id,
                    delete_err
                );
            }
            return Err(e);
        }

        tracing::info!(
            "Created party {} for {} in {}",
            channel.id,
            display_name,
            category.name
        );

        Ok(JoinOutcome::Created {
            channel_id: channel.id,
        })
    }

    /// Category the lobby sits in, if it exists and really is a category.
    async fn lobby_parent(
        &self,
        guild_id: u64,
        category: &GameCategory,
    ) -> Result<Option<u64>, AppError> {
        let Some(lobby) = self
            .platform
            .get_channel(guild_id, category.voice_id)
            .await?
        else {
            return Ok(None);
        };

        let Some(parent_id) = lobby.parent_id else {
            return Ok(None);
        };

        let parent = self.platform.get_channel(guild_id, parent_id).await?;

        Ok(parent
            .filter(|parent| parent.kind == ChannelKind::Category)
            .map(|parent| parent.id))
    }

    /// Deletes a channel that must not outlive a failed operation.
    async fn discard_channel(&self, channel_id: u64) {
        if let Err(e) = self.platform.delete_channel(channel_id).await {
            tracing::error!(
                "Failed to delete channel {} after a failed party creation: {}",
                channel_id,
                e
            );
        }
    }

    /// Removes a party channel once it has stayed empty for the grace period.
    ///
    /// Channels not following the party naming convention are ignored. The platform
    /// channel is deleted first and the registry row afterwards, whether or not the
    /// platform deletion succeeded.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the channel
    /// - `channel_id` - Channel the member left
    ///
    /// # Returns
    /// - `Ok(LeaveOutcome)` - What was done with the channel
    /// - `Err(AppError)` - Database or platform error
    pub async fn handle_channel_left(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<LeaveOutcome, AppError> {
        let party_repo = PartyRepository::new(self.db);

        let Some(channel) = self.platform.get_channel(guild_id, channel_id).await? else {
            // Deleted out from under us; only the row can be left to clean.
            if party_repo.delete(channel_id).await? {
                return Ok(LeaveOutcome::Removed {
                    channel_id,
                    channel_deleted: false,
                });
            }
            return Ok(LeaveOutcome::NotAParty);
        };

        if !is_party_channel_name(&channel.name) {
            return Ok(LeaveOutcome::NotAParty);
        }

        tokio::time::sleep(self.grace_period).await;

        let party = party_repo.get_by_channel(channel_id).await?;
        let _guard = match &party {
            Some(party) => Some(
                self.locks
                    .lock((party.owner_id, party.game_category_id))
                    .await,
            ),
            None => None,
        };

        if !self
            .platform
            .voice_members(guild_id, channel_id)
            .await?
            .is_empty()
        {
            return Ok(LeaveOutcome::StillOccupied);
        }

        let channel_deleted = self.delete_empty_party(channel_id, party.as_ref()).await?;

        Ok(LeaveOutcome::Removed {
            channel_id,
            channel_deleted,
        })
    }

    /// Deletes the channel, then the registry row regardless of the platform result.
    ///
    /// # Returns
    /// - `Ok(true)` - Channel deleted
    /// - `Ok(false)` - Channel deletion failed (logged), row removed anyway
    /// - `Err(AppError)` - Registry deletion failed
    async fn delete_empty_party(
        &self,
        channel_id: u64,
        party: Option<&Party>,
    ) -> Result<bool, AppError> {
        let channel_deleted = match self.platform.delete_channel(channel_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to delete empty party channel {}, removing its row anyway: {}",
                    channel_id,
                    e
                );
                false
            }
        };

        if party.is_some() {
            PartyRepository::new(self.db).delete(channel_id).await?;
        }

        tracing::info!("Removed empty party {}", channel_id);

        Ok(channel_deleted)
    }

    /// Brings the registry and the guild's party channels back in line.
    ///
    /// Drops rows whose channel vanished, removes registered parties that are empty,
    /// and deletes empty party channels left without a row, such as after a failed
    /// deletion.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to reconcile
    ///
    /// # Returns
    /// - `Ok(ReconcileReport)` - Counts of cleaned up rows and channels
    /// - `Err(AppError)` - Database or platform error
    pub async fn reconcile(&self, guild_id: u64) -> Result<ReconcileReport, AppError> {
        let categories = GameCategoryRepository::new(self.db).get_all().await?;
        let category_ids: Vec<u64> = categories.iter().map(|category| category.id).collect();

        let party_repo = PartyRepository::new(self.db);
        let parties = party_repo.get_by_game_categories(&category_ids).await?;

        let mut report = ReconcileReport::default();

        for party in &parties {
            let _guard = self
                .locks
                .lock((party.owner_id, party.game_category_id))
                .await;

            // A leave or join may have dealt with it since the snapshot.
            if party_repo.get_by_channel(party.channel_id).await?.is_none() {
                continue;
            }

            if self
                .platform
                .get_channel(guild_id, party.channel_id)
                .await?
                .is_none()
            {
                party_repo.delete(party.channel_id).await?;
                report.stale_rows_removed += 1;
                continue;
            }

            if self
                .platform
                .voice_members(guild_id, party.channel_id)
                .await?
                .is_empty()
            {
                self.delete_empty_party(party.channel_id, Some(party)).await?;
                report.empty_parties_removed += 1;
            }
        }

        let registered: HashSet<u64> = parties.iter().map(|party| party.channel_id).collect();
        let game_categories: HashSet<u64> = category_ids.into_iter().collect();

        for channel in self.platform.list_channels(guild_id).await? {
            let in_game_category = channel
                .parent_id
                .is_some_and(|parent| game_categories.contains(&parent));

            if channel.kind != ChannelKind::Voice
                || !in_game_category
                || !is_party_channel_name(&channel.name)
                || registered.contains(&channel.id)
                || snowflake_age(channel.id) < ORPHAN_MIN_AGE
            {
                continue;
            }

            if party_repo.get_by_channel(channel.id).await?.is_some() {
                continue;
            }

            if self
                .platform
                .voice_members(guild_id, channel.id)
                .await?
                .is_empty()
            {
                self.platform.delete_channel(channel.id).await?;
                report.orphan_channels_removed += 1;
            }
        }

        if report != ReconcileReport::default() {
            tracing::info!(
                "Reconciled parties of guild {}: {} stale rows, {} empty parties, {} orphan channels removed",
                guild_id,
                report.stale_rows_removed,
                report.empty_parties_removed,
                report.orphan_channels_removed
            );
        }

        Ok(report)
    }
}
