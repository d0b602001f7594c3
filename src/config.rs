use std::str::FromStr;

use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Cap on the speaker count used in the voice point formula; 0 = uncapped.
    pub max_speaking_members: u32,
    /// Multiplier applied to all experience grants.
    pub experience_multiplier: i64,
    /// Half-open range of experience granted per cooldown-gated text message.
    pub message_experience_min: i64,
    pub message_experience_max: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            max_speaking_members: optional("ACTIVITY_MAX_SPEAKING_MEMBERS", 0)?,
            experience_multiplier: optional("ACTIVITY_EXPERIENCE_MULTIPLIER", 1)?,
            message_experience_min: optional("MESSAGE_EXPERIENCE_MIN", 15)?,
            message_experience_max: optional("MESSAGE_EXPERIENCE_MAX", 25)?,
        })
    }
}

fn required(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()).into())
}

fn optional<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_string()).into()),
        Err(_) => Ok(default),
    }
}
