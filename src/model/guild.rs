use sea_orm::DbErr;

/// A Discord guild known to the bot, with its leaderboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    /// Discord guild ID.
    pub guild_id: u64,
    /// Last known guild name.
    pub name: String,
    /// Optional guild icon hash.
    pub icon_hash: Option<String>,
    /// Gates both activity accrual and leaderboard publishing for the guild.
    pub leaderboard_enabled: bool,
    /// Channel the weekly leaderboard is published to, when configured.
    pub leaderboard_channel_id: Option<u64>,
}

impl Guild {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// Parses the string ids from the database into u64 for type-safe usage
    /// in the service layer.
    ///
    /// # Returns
    /// - `Ok(Guild)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Failed to parse a stored id as u64
    pub fn from_entity(entity: entity::guild::Model) -> Result<Self, DbErr> {
        let guild_id = entity
            .guild_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse guild_id: {}", e)))?;

        let leaderboard_channel_id = entity
            .leaderboard_channel_id
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|e| DbErr::Custom(format!("Failed to parse leaderboard_channel_id: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            guild_id,
            name: entity.name,
            icon_hash: entity.icon_hash,
            leaderboard_enabled: entity.leaderboard_enabled,
            leaderboard_channel_id,
        })
    }
}
