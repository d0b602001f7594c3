use sea_orm::DbErr;

/// Sentinel stored in `placement` for a member that has never been ranked.
pub const PLACEMENT_UNRANKED: i32 = -1;

/// A guild member's persisted activity aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub guild_id: u64,
    pub user_id: u64,
    /// Name shown on the leaderboard; refreshed on every activity grant.
    pub display_name: String,
    pub experience: i64,
    /// Total eligible voice presence, in milliseconds.
    pub voice_activity: i64,
    /// Rank on the previous leaderboard cycle, or [`PLACEMENT_UNRANKED`].
    pub placement: i32,
}

impl Member {
    /// Builds a fresh aggregate for a member seen for the first time.
    pub fn new(guild_id: u64, user_id: u64) -> Self {
        Self {
            guild_id,
            user_id,
            display_name: String::new(),
            experience: 0,
            voice_activity: 0,
            placement: PLACEMENT_UNRANKED,
        }
    }

    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Member)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse a stored id as u64
    pub fn from_entity(entity: entity::member::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            guild_id,
            user_id,
            display_name: entity.display_name,
            experience: entity.experience,
            voice_activity: entity.voice_activity,
            placement: entity.placement,
        })
    }
}
