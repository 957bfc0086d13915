//! Habitué factory for creating test habitué entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a habitué row for an existing user.
///
/// # Arguments
/// - `db` - Database connection
/// - `discord_id` - ID of an existing user row
/// - `color` - Colour as `#rrggbb`
///
/// # Returns
/// - `Ok(entity::habitue::Model)` - Created habitué entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_habitue(
    db: &DatabaseConnection,
    discord_id: &str,
    color: &str,
) -> Result<entity::habitue::Model, DbErr> {
    entity::habitue::ActiveModel {
        discord_id: ActiveValue::Set(discord_id.to_string()),
        color: ActiveValue::Set(color.to_string()),
    }
    .insert(db)
    .await
}
