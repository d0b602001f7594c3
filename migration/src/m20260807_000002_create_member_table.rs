use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(pk_auto(Member::Id))
                    .col(string(Member::GuildId))
                    .col(string(Member::UserId))
                    .col(string(Member::DisplayName))
                    .col(big_integer(Member::Experience).default(0))
                    .col(big_integer(Member::VoiceActivity).default(0))
                    .col(integer(Member::Placement).default(-1))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_guild_user")
                    .table(Member::Table)
                    .col(Member::GuildId)
                    .col(Member::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum Member {
    Table,
    Id,
    GuildId,
    UserId,
    DisplayName,
    Experience,
    VoiceActivity,
    Placement,
}
