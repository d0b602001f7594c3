use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guild::Table)
                    .if_not_exists()
                    .col(pk_auto(Guild::Id))
                    .col(string_uniq(Guild::GuildId))
                    .col(string(Guild::Name))
                    .col(string_null(Guild::IconHash))
                    .col(boolean(Guild::LeaderboardEnabled).default(false))
                    .col(string_null(Guild::LeaderboardChannelId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum Guild {
    Table,
    Id,
    GuildId,
    Name,
    IconHash,
    LeaderboardEnabled,
    LeaderboardChannelId,
}
