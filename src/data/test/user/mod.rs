use crate::{data::user::UserRepository, error::AppError, model::user::UpsertUserParam};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod find_by_discord_id;
mod insert_missing;
mod update_name;
mod upsert;
