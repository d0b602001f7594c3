mod activity;
mod bot;
mod config;
mod data;
mod error;
mod leaderboard;
mod model;
mod startup;
mod util;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::activity::service::{ActivityService, ActivitySettings};
use crate::config::Config;
use crate::error::AppError;
use crate::leaderboard::manager::LeaderboardManager;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let activity = Arc::new(ActivityService::new(db.clone(), ActivitySettings::from(&config)));
    let mut client = bot::start::init_bot(&config, db.clone(), activity).await?;

    let mut manager = LeaderboardManager::new(db, client.http.clone());
    manager.schedule().await?;

    // Blocks until the gateway shuts down; dropping the manager afterwards
    // cancels only pending scheduler jobs.
    bot::start::start_bot(&mut client).await
}
