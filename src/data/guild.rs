use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::model::guild::Guild;

pub struct GuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts or refreshes a guild row from gateway data.
    ///
    /// Updates only the display properties on conflict; the leaderboard
    /// settings columns are left untouched so reconnects never reset them.
    ///
    /// # Arguments
    /// - `guild_id`: Discord's unique identifier for the guild
    /// - `name`: Current guild name
    /// - `icon_hash`: Current guild icon hash, if any
    pub async fn upsert(
        &self,
        guild_id: u64,
        name: &str,
        icon_hash: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::Guild::insert(entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            icon_hash: ActiveValue::Set(icon_hash),
            leaderboard_enabled: ActiveValue::Set(false),
            leaderboard_channel_id: ActiveValue::Set(None),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::guild::Column::GuildId)
                .update_columns([entity::guild::Column::Name])
                .update_columns([entity::guild::Column::IconHash])
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Loads every guild known to the bot.
    ///
    /// The weekly leaderboard batch iterates this list and filters on the
    /// per-guild `leaderboard_enabled` flag.
    pub async fn get_all(&self) -> Result<Vec<Guild>, DbErr> {
        entity::prelude::Guild::find()
            .all(self.db)
            .await?
            .into_iter()
            .map(Guild::from_entity)
            .collect()
    }

    /// Finds a guild by its Discord guild ID.
    ///
    /// # Returns
    /// - `Ok(Some(Guild))`: Guild found in database
    /// - `Ok(None)`: Guild not known (bot never saw it)
    /// - `Err(DbErr)`: Database error during query
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<Guild>, DbErr> {
        entity::prelude::Guild::find()
            .filter(entity::guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(Guild::from_entity)
            .transpose()
    }
}
