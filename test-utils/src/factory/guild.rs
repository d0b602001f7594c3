//! Guild factory for creating test guild entities.
//!
//! This module provides factory methods for creating guild entities with
//! sensible defaults, reducing boilerplate in tests. The factory supports
//! customization through a builder pattern.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guilds with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild::GuildFactory;
///
/// let guild = GuildFactory::new(&db)
///     .guild_id("987654321")
///     .leaderboard_enabled(true)
///     .build()
///     .await?;
/// ```
pub struct GuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
    icon_hash: Option<String>,
    leaderboard_enabled: bool,
    leaderboard_channel_id: Option<String>,
}

impl<'a> GuildFactory<'a> {
    /// Creates a new GuildFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented numeric string
    /// - name: `"Guild {id}"`
    /// - icon_hash: `None`
    /// - leaderboard_enabled: `false`
    /// - leaderboard_channel_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("Guild {}", id),
            icon_hash: None,
            leaderboard_enabled: false,
            leaderboard_channel_id: None,
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the guild name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the leaderboard-enabled flag.
    pub fn leaderboard_enabled(mut self, enabled: bool) -> Self {
        self.leaderboard_enabled = enabled;
        self
    }

    /// Sets the leaderboard channel ID.
    pub fn leaderboard_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.leaderboard_channel_id = Some(channel_id.into());
        self
    }

    /// Builds and inserts the guild entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::guild::Model)` - Created guild entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild::Model, DbErr> {
        entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            icon_hash: ActiveValue::Set(self.icon_hash),
            leaderboard_enabled: ActiveValue::Set(self.leaderboard_enabled),
            leaderboard_channel_id: ActiveValue::Set(self.leaderboard_channel_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild with default values.
///
/// Shorthand for `GuildFactory::new(db).build().await`.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::guild::Model, DbErr> {
    GuildFactory::new(db).build().await
}
