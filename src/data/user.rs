//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing the member registry: one row
//! per non-bot member of the main guild. Parties and habitué rows reference it and are
//! removed by cascade when a member leaves.

use std::collections::HashSet;

use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect,
};

use crate::{
    error::AppError,
    model::user::{UpsertUserParam, User},
    util::parse::parse_u64_from_string,
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts a user from parameter model.
    ///
    /// Inserts a new user or updates an existing user's name.
    ///
    /// # Arguments
    /// - `param` - User upsert parameters including discord_id and name
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            name: ActiveValue::Set(param.name),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_column(entity::user::Column::Name)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by their Discord ID.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID as u64
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user found with that Discord ID
    /// - `Err(AppError)` - Database error during query
    #[cfg(test)]
    pub async fn find_by_discord_id(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Updates the stored display name of an existing user.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID as u64
    /// - `name` - New display name
    ///
    /// # Returns
    /// - `Ok(true)` - The user exists and was updated
    /// - `Ok(false)` - No user with that ID
    /// - `Err(AppError)` - Database error during update
    pub async fn update_name(&self, user_id: u64, name: String) -> Result<bool, AppError> {
        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::Name, Expr::value(name))
            .filter(entity::user::Column::DiscordId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a user by their Discord ID.
    ///
    /// Parties and habitué rows owned by the user are removed by the foreign key
    /// cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - User existed and was deleted
    /// - `Ok(false)` - No user with that ID
    /// - `Err(AppError)` - Database error during deletion
    pub async fn delete(&self, user_id: u64) -> Result<bool, AppError> {
        let result = entity::prelude::User::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the Discord IDs of every registered user.
    ///
    /// # Returns
    /// - `Ok(HashSet<u64>)` - All registered IDs
    /// - `Err(AppError)` - Database error or malformed stored ID
    pub async fn get_all_ids(&self) -> Result<HashSet<u64>, AppError> {
        let ids: Vec<String> = entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::DiscordId)
            .into_tuple()
            .all(self.db)
            .await?;

        ids.into_iter().map(parse_u64_from_string).collect()
    }

    /// Inserts the given users, skipping any that already exist.
    ///
    /// Existing rows are left untouched so a bulk sync never overwrites names that
    /// were updated by member-update events.
    ///
    /// # Arguments
    /// - `params` - Users to insert
    ///
    /// # Returns
    /// - `Ok(Vec<User>)` - The users that were actually inserted
    /// - `Err(AppError)` - Database error during insert
    pub async fn insert_missing(&self, params: Vec<UpsertUserParam>) -> Result<Vec<User>, AppError> {
        let existing = self.get_all_ids().await?;

        let mut seen = HashSet::new();
        let missing: Vec<UpsertUserParam> = params
            .into_iter()
            .filter(|p| !existing.contains(&p.discord_id) && seen.insert(p.discord_id))
            .collect();

        if missing.is_empty() {
            return Ok(Vec::new());
        }

        let models = missing.iter().map(|p| entity::user::ActiveModel {
            discord_id: ActiveValue::Set(p.discord_id.to_string()),
            name: ActiveValue::Set(p.name.clone()),
        });

        entity::prelude::User::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(missing
            .into_iter()
            .map(|p| User {
                discord_id: p.discord_id,
                name: p.name,
            })
            .collect())
    }
}
