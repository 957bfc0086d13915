//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// Starts well above zero so generated snowflakes never collide with the small
/// literal IDs tests use for fake platform channels.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1_000_000);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a party together with its owner and game category.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, category, party))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_party_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::game_category::Model,
        entity::party::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let category = crate::factory::game_category::create_game_category(db).await?;
    let party = crate::factory::party::create_party(db, &user.discord_id, &category.id).await?;

    Ok((user, category, party))
}
