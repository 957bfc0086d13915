//! In-memory platform used by service tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use serenity::async_trait;

use crate::{
    error::AppError,
    model::color::Rgb,
    platform::{
        ChannelKind, ChannelPlatform, CreateChannelParam, PlatformChannel, PlatformRole,
        RolePlatform,
    },
};

#[derive(Default)]
struct State {
    next_id: u64,
    channels: BTreeMap<u64, PlatformChannel>,
    /// user -> voice channel
    voice: HashMap<u64, u64>,
    roles: BTreeMap<u64, PlatformRole>,
    member_roles: HashSet<(u64, u64)>,
    fail_create: HashSet<ChannelKind>,
    fail_delete: bool,
    fail_move: bool,
    fail_role_create: bool,
    channels_created: usize,
}

/// Single-guild platform kept in memory, with failure injection.
pub struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 10_000,
                ..Default::default()
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_channel(&self, name: &str, kind: ChannelKind, parent_id: Option<u64>) -> u64 {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        let position = state.channels.len() as u16;
        state.channels.insert(
            id,
            PlatformChannel {
                id,
                name: name.to_string(),
                kind,
                parent_id,
                position,
            },
        );
        id
    }

    /// Removes a channel out-of-band, as if an admin deleted it by hand.
    pub fn remove_channel(&self, channel_id: u64) {
        let mut state = self.state();
        state.channels.remove(&channel_id);
        state.voice.retain(|_, channel| *channel != channel_id);
    }

    pub fn channel(&self, channel_id: u64) -> Option<PlatformChannel> {
        self.state().channels.get(&channel_id).cloned()
    }

    pub fn channels_named(&self, name: &str) -> Vec<PlatformChannel> {
        self.state()
            .channels
            .values()
            .filter(|channel| channel.name == name)
            .cloned()
            .collect()
    }

    pub fn channel_count(&self) -> usize {
        self.state().channels.len()
    }

    /// Number of channels created through `create_channel`.
    pub fn channels_created(&self) -> usize {
        self.state().channels_created
    }

    /// ID the next created channel will get.
    pub fn peek_next_id(&self) -> u64 {
        self.state().next_id
    }

    pub fn connect(&self, user_id: u64, channel_id: u64) {
        self.state().voice.insert(user_id, channel_id);
    }

    pub fn disconnect(&self, user_id: u64) {
        self.state().voice.remove(&user_id);
    }

    pub fn member_channel(&self, user_id: u64) -> Option<u64> {
        self.state().voice.get(&user_id).copied()
    }

    pub fn fail_channel_creation(&self, kind: ChannelKind) {
        self.state().fail_create.insert(kind);
    }

    pub fn set_fail_channel_deletion(&self, fail: bool) {
        self.state().fail_delete = fail;
    }

    pub fn set_fail_move(&self, fail: bool) {
        self.state().fail_move = fail;
    }

    pub fn fail_role_creation(&self) {
        self.state().fail_role_create = true;
    }

    pub fn add_role(&self, name: &str, position: u16) -> u64 {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;
        state.roles.insert(
            id,
            PlatformRole {
                id,
                name: name.to_string(),
                color: Rgb::BLACK,
                position,
            },
        );
        id
    }

    pub fn role_named(&self, name: &str) -> Option<PlatformRole> {
        self.state()
            .roles
            .values()
            .find(|role| role.name == name)
            .cloned()
    }

    pub fn grant(&self, user_id: u64, role_id: u64) {
        self.state().member_roles.insert((user_id, role_id));
    }

    pub fn has_role(&self, user_id: u64, role_id: u64) -> bool {
        self.state().member_roles.contains(&(user_id, role_id))
    }
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(what: &str) -> AppError {
    AppError::InternalError(format!("injected failure: {}", what))
}

#[async_trait]
impl ChannelPlatform for FakePlatform {
    async fn get_channel(
        &self,
        _guild_id: u64,
        channel_id: u64,
    ) -> Result<Option<PlatformChannel>, AppError> {
        tokio::task::yield_now().await;
        Ok(self.channel(channel_id))
    }

    async fn list_channels(&self, _guild_id: u64) -> Result<Vec<PlatformChannel>, AppError> {
        Ok(self.state().channels.values().cloned().collect())
    }

    async fn create_channel(
        &self,
        _guild_id: u64,
        param: CreateChannelParam,
    ) -> Result<PlatformChannel, AppError> {
        // Suspend like a network round trip so concurrent callers interleave.
        tokio::task::yield_now().await;

        if self.state().fail_create.contains(&param.kind) {
            return Err(failure("create channel"));
        }

        let id = self.add_channel(&param.name, param.kind, param.parent_id);
        let mut state = self.state();
        state.channels_created += 1;
        let channel = state.channels.get_mut(&id).ok_or_else(|| failure("lost channel"))?;
        if let Some(position) = param.position {
            channel.position = position;
        }

        Ok(channel.clone())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), AppError> {
        tokio::task::yield_now().await;

        if self.state().fail_delete {
            return Err(failure("delete channel"));
        }

        self.remove_channel(channel_id);
        Ok(())
    }

    async fn move_member(
        &self,
        _guild_id: u64,
        user_id: u64,
        channel_id: u64,
    ) -> Result<(), AppError> {
        tokio::task::yield_now().await;

        if self.state().fail_move {
            return Err(failure("move member"));
        }

        if self.channel(channel_id).is_none() {
            return Err(failure("move into unknown channel"));
        }

        self.connect(user_id, channel_id);
        Ok(())
    }

    async fn voice_members(&self, _guild_id: u64, channel_id: u64) -> Result<Vec<u64>, AppError> {
        Ok(self
            .state()
            .voice
            .iter()
            .filter(|(_, channel)| **channel == channel_id)
            .map(|(user, _)| *user)
            .collect())
    }
}

#[async_trait]
impl RolePlatform for FakePlatform {
    async fn find_role_by_name(
        &self,
        _guild_id: u64,
        name: &str,
    ) -> Result<Option<PlatformRole>, AppError> {
        Ok(self.role_named(name))
    }

    async fn create_role(
        &self,
        _guild_id: u64,
        name: &str,
        color: Rgb,
    ) -> Result<PlatformRole, AppError> {
        if self.state().fail_role_create {
            return Err(failure("create role"));
        }

        let id = self.add_role(name, 1);
        let mut state = self.state();
        let role = state.roles.get_mut(&id).ok_or_else(|| failure("lost role"))?;
        role.color = color;

        Ok(role.clone())
    }

    async fn edit_role_color(
        &self,
        _guild_id: u64,
        role_id: u64,
        color: Rgb,
    ) -> Result<(), AppError> {
        let mut state = self.state();
        let role = state
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| failure("edit unknown role"))?;
        role.color = color;
        Ok(())
    }

    async fn edit_role_position(
        &self,
        _guild_id: u64,
        role_id: u64,
        position: u16,
    ) -> Result<(), AppError> {
        let mut state = self.state();
        let role = state
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| failure("move unknown role"))?;
        role.position = position;
        Ok(())
    }

    async fn delete_role(&self, _guild_id: u64, role_id: u64) -> Result<(), AppError> {
        let mut state = self.state();
        state.roles.remove(&role_id);
        state.member_roles.retain(|(_, role)| *role != role_id);
        Ok(())
    }

    async fn add_member_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.grant(user_id, role_id);
        Ok(())
    }

    async fn remove_member_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.state().member_roles.remove(&(user_id, role_id));
        Ok(())
    }
}
