use std::time::Duration;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, context::TestContext, factory};

use crate::{
    error::AppError,
    model::{
        game_category::{category_channel_name, GameCategory, LOBBY_CHANNEL_NAME},
        voice::VoicePresenceChange,
    },
    platform::{fake::FakePlatform, ChannelKind},
    service::party::{
        JoinOutcome, LeaveOutcome, PartyLocks, PartyService, ReconcileReport, VoiceChangeOutcome,
    },
};

mod reconcile;

const GUILD: u64 = 1;
const ALICE: u64 = 501;
const BOB: u64 = 502;

/// Short enough to keep tests fast, long enough to rejoin inside it.
const GRACE: Duration = Duration::from_millis(200);

async fn setup() -> TestContext {
    TestBuilder::new().with_party_tables().build().await.unwrap()
}

fn service<'a>(
    db: &'a DatabaseConnection,
    platform: &'a FakePlatform,
    locks: &'a PartyLocks,
) -> PartyService<'a, FakePlatform> {
    PartyService::new(db, platform, locks, GRACE)
}

/// Provisions a game: a category channel holding the lobby, and its registry row.
async fn create_game(
    db: &DatabaseConnection,
    platform: &FakePlatform,
    name: &str,
) -> Result<GameCategory, AppError> {
    let category_id = platform.add_channel(&category_channel_name(name), ChannelKind::Category, None);
    let lobby_id = platform.add_channel(LOBBY_CHANNEL_NAME, ChannelKind::Voice, Some(category_id));

    let entity = factory::game_category::GameCategoryFactory::new(db)
        .id(category_id.to_string())
        .name(name)
        .voice_id(lobby_id.to_string())
        .build()
        .await?;

    GameCategory::from_entity(entity)
}

async fn party_count(db: &DatabaseConnection) -> Result<u64, AppError> {
    Ok(entity::prelude::Party::find().count(db).await?)
}

fn join_change(user_id: u64, name: &str, from: Option<u64>, to: Option<u64>) -> VoicePresenceChange {
    VoicePresenceChange {
        guild_id: GUILD,
        user_id,
        display_name: name.to_string(),
        is_bot: false,
        previous_channel_id: from,
        new_channel_id: to,
    }
}
