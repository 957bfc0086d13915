//! Domain models and operation parameters.
//!
//! Repositories convert SeaORM entity models into these types at the data boundary,
//! parsing stored string snowflakes into `u64` so services never touch entities.

pub mod color;
pub mod game_category;
pub mod habitue;
pub mod member;
pub mod party;
pub mod user;
pub mod voice;
