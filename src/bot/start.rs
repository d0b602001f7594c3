use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::activity::service::ActivityService;
use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;

/// Builds the Discord client with the gateway intents the bot needs.
///
/// Voice state tracking requires `GUILD_VOICE_STATES`; message experience
/// requires `GUILD_MESSAGES`.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `db` - Database connection for the event handlers
/// - `activity` - Shared activity service fed by the handlers
///
/// # Returns
/// - `Ok(Client)` - Configured client, not yet connected
/// - `Err(AppError)` - Client construction failed
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    activity: Arc<ActivityService>,
) -> Result<Client, AppError> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::GUILD_VOICE_STATES;

    let handler = Handler::new(db, activity);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Starts the Discord bot in a blocking manner
///
/// Blocks until the gateway connection shuts down.
pub async fn start_bot(client: &mut Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
