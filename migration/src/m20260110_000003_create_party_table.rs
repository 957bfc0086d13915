use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260110_000001_create_user_table::User,
    m20260110_000002_create_game_category_table::GameCategory,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(party_table()).await?;

        // One party per owner per game
        manager
            .create_index(
                Index::create()
                    .name("idx_party_owner_game_category")
                    .table(Party::Table)
                    .col(Party::OwnerId)
                    .col(Party::GameCategoryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_party_owner_game_category")
                    .table(Party::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Party::Table).to_owned())
            .await
    }
}

/// `created_at` is read back as `DateTimeUtc`, which Postgres only decodes from
/// `timestamp with time zone`.
fn party_table() -> TableCreateStatement {
    Table::create()
        .table(Party::Table)
        .if_not_exists()
        .col(string(Party::ChannelId).primary_key())
        .col(string(Party::GameCategoryId))
        .col(string(Party::OwnerId))
        .col(string(Party::Name))
        .col(timestamp_with_time_zone(Party::CreatedAt))
        .foreign_key(
            ForeignKey::create()
                .name("fk_party_game_category_id")
                .from(Party::Table, Party::GameCategoryId)
                .to(GameCategory::Table, GameCategory::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_party_owner_id")
                .from(Party::Table, Party::OwnerId)
                .to(User::Table, User::DiscordId)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Party {
    Table,
    ChannelId,
    GameCategoryId,
    OwnerId,
    Name,
    CreatedAt,
}
