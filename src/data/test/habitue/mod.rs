use crate::{data::habitue::HabitueRepository, error::AppError, model::color::Rgb};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod upsert;
