use crate::{
    data::game_category::GameCategoryRepository, error::AppError,
    model::game_category::CreateGameCategoryParam,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find;
mod get_all;
