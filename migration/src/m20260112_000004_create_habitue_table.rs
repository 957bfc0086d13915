use sea_orm_migration::{prelude::*, schema::*};

use super::m20260110_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Habitue::Table)
                    .if_not_exists()
                    .col(string(Habitue::DiscordId).primary_key())
                    .col(string_len(Habitue::Color, 7).default("#000000"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_habitue_discord_id")
                            .from(Habitue::Table, Habitue::DiscordId)
                            .to(User::Table, User::DiscordId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Habitue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Habitue {
    Table,
    DiscordId,
    Color,
}
