use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameCategory::Table)
                    .if_not_exists()
                    .col(string(GameCategory::Id).primary_key())
                    .col(string_uniq(GameCategory::Name))
                    .col(string(GameCategory::ForumId))
                    .col(string(GameCategory::TextId))
                    .col(string(GameCategory::VoiceId))
                    .col(string_null(GameCategory::RoleId))
                    .to_owned(),
            )
            .await?;

        // Lobby lookups happen on every voice state update
        manager
            .create_index(
                Index::create()
                    .name("idx_game_category_voice_id")
                    .table(GameCategory::Table)
                    .col(GameCategory::VoiceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_game_category_voice_id")
                    .table(GameCategory::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameCategory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GameCategory {
    Table,
    Id,
    Name,
    ForumId,
    TextId,
    VoiceId,
    RoleId,
}
