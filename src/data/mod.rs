//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models from
//! `crate::model`, keeping the data layer separate from the business logic layer.
//! All database queries, inserts, updates, and deletes go through these repositories.

pub mod game_category;
pub mod habitue;
pub mod party;
pub mod user;

#[cfg(test)]
mod test;
