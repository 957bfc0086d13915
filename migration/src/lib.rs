pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_user_table;
mod m20260110_000002_create_game_category_table;
mod m20260110_000003_create_party_table;
mod m20260112_000004_create_habitue_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_user_table::Migration),
            Box::new(m20260110_000002_create_game_category_table::Migration),
            Box::new(m20260110_000003_create_party_table::Migration),
            Box::new(m20260112_000004_create_habitue_table::Migration),
        ]
    }
}
