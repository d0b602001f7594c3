use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild};

use crate::data::guild::GuildRepository;

/// Handle a guild becoming available or the bot joining a new guild
///
/// Keeps the guild table current so the weekly batch can enumerate every
/// guild the bot is in. Leaderboard settings are preserved across updates.
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    _ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    let repo = GuildRepository::new(db);
    let icon_hash = guild.icon_hash.map(|hash| hash.to_string());

    if let Err(e) = repo.upsert(guild.id.get(), &guild.name, icon_hash).await {
        tracing::error!("Failed to upsert guild {}: {:?}", guild.id, e);
    } else {
        tracing::debug!("Synced guild {} ({})", guild.name, guild.id);
    }
}
