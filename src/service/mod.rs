//! Business logic between the bot's event handlers and the repositories.

pub mod concurrency;
pub mod game_category;
pub mod habitue;
pub mod member;
pub mod party;
