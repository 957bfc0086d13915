//! SeaORM entity models for the ZORS bot database.
//!
//! Discord snowflakes are stored as strings; repositories in the main crate parse
//! them back into `u64` at the data boundary.

pub mod prelude;

pub mod game_category;
pub mod habitue;
pub mod party;
pub mod user;
