use std::collections::HashSet;

use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, QuerySelect};

use crate::{
    error::AppError,
    model::{color::Rgb, habitue::Habitue},
    util::parse::parse_u64_from_string,
};

/// Repository for habitué colour rows.
pub struct HabitueRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HabitueRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the habitué row or overwrites its colour.
    ///
    /// The user row must already exist.
    ///
    /// # Returns
    /// - `Ok(Habitue)` - The stored habitué
    /// - `Err(AppError)` - Database error, including a missing user row
    pub async fn upsert(&self, discord_id: u64, color: Rgb) -> Result<Habitue, AppError> {
        let entity = entity::prelude::Habitue::insert(entity::habitue::ActiveModel {
            discord_id: ActiveValue::Set(discord_id.to_string()),
            color: ActiveValue::Set(color.to_hex()),
        })
        .on_conflict(
            OnConflict::column(entity::habitue::Column::DiscordId)
                .update_column(entity::habitue::Column::Color)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Habitue::from_entity(entity)
    }

    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<Habitue>, AppError> {
        let entity = entity::prelude::Habitue::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        entity.map(Habitue::from_entity).transpose()
    }

    /// # Returns
    /// - `Ok(true)` - A row was deleted
    /// - `Ok(false)` - The member was not a registered habitué
    pub async fn delete(&self, discord_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::Habitue::delete_by_id(discord_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_all_ids(&self) -> Result<HashSet<u64>, AppError> {
        let ids: Vec<String> = entity::prelude::Habitue::find()
            .select_only()
            .column(entity::habitue::Column::DiscordId)
            .into_tuple()
            .all(self.db)
            .await?;

        ids.into_iter().map(parse_u64_from_string).collect()
    }
}
