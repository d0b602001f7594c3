//! Member factory for creating test member entities.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test members with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::member::MemberFactory;
///
/// let member = MemberFactory::new(&db)
///     .guild_id("123")
///     .experience(1500)
///     .placement(3)
///     .build()
///     .await?;
/// ```
pub struct MemberFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    display_name: String,
    experience: i64,
    voice_activity: i64,
    placement: i32,
}

impl<'a> MemberFactory<'a> {
    /// Creates a new MemberFactory with default values.
    ///
    /// Defaults:
    /// - guild_id / user_id: auto-incremented numeric strings
    /// - display_name: `"Member {id}"`
    /// - experience: `0`
    /// - voice_activity: `0`
    /// - placement: `-1` (never ranked)
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            user_id: id.to_string(),
            display_name: format!("Member {}", id),
            experience: 0,
            voice_activity: 0,
            placement: -1,
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the user ID.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the display name.
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the accumulated experience.
    pub fn experience(mut self, experience: i64) -> Self {
        self.experience = experience;
        self
    }

    /// Sets the accumulated voice activity in milliseconds.
    pub fn voice_activity(mut self, voice_activity: i64) -> Self {
        self.voice_activity = voice_activity;
        self
    }

    /// Sets the previous leaderboard placement.
    pub fn placement(mut self, placement: i32) -> Self {
        self.placement = placement;
        self
    }

    /// Builds and inserts the member entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::member::Model)` - Created member entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::member::Model, DbErr> {
        entity::member::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            display_name: ActiveValue::Set(self.display_name),
            experience: ActiveValue::Set(self.experience),
            voice_activity: ActiveValue::Set(self.voice_activity),
            placement: ActiveValue::Set(self.placement),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a member with default values.
///
/// Shorthand for `MemberFactory::new(db).build().await`.
pub async fn create_member(db: &DatabaseConnection) -> Result<entity::member::Model, DbErr> {
    MemberFactory::new(db).build().await
}
