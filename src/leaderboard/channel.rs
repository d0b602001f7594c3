use std::sync::Arc;

use serenity::all::{
    ChannelId, ChannelType, CreateEmbed, CreateMessage, GetMessages, MessageFlags, MessageId,
    UserId,
};
use serenity::async_trait;
use serenity::http::Http;

use crate::error::AppError;

/// How far back the publish step looks for stale boards to purge.
const PURGE_HISTORY_LIMIT: u8 = 10;

/// Handle to a message produced by [`LeaderboardChannel::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle {
    pub message_id: u64,
}

/// Outbound messaging contract used to publish a guild's leaderboard.
///
/// Abstracted behind a trait so the strict purge → send → crosspost ordering
/// can be exercised against fakes in tests.
#[async_trait]
pub trait LeaderboardChannel: Send + Sync {
    /// Deletes prior bot-authored, non-pinned, non-ephemeral messages.
    async fn purge(&self) -> Result<(), AppError>;

    /// Sends the rendered leaderboard embed.
    async fn send(&self, embed: CreateEmbed) -> Result<MessageHandle, AppError>;

    /// Whether the channel supports crossposting (announcement channels).
    fn supports_crosspost(&self) -> bool;

    /// Crossposts a previously sent message to following channels.
    async fn crosspost(&self, message: &MessageHandle) -> Result<(), AppError>;
}

/// Publishes an embed through the channel in the required strict order:
/// purge the previous board, send the new one, then crosspost it where
/// supported. Each step must complete before the next starts so a failed
/// send can never leave duplicate boards behind.
pub async fn publish_leaderboard<C>(channel: &C, embed: CreateEmbed) -> Result<(), AppError>
where
    C: LeaderboardChannel + ?Sized,
{
    channel.purge().await?;
    let message = channel.send(embed).await?;

    if channel.supports_crosspost() {
        channel.crosspost(&message).await?;
    }
    Ok(())
}

/// [`LeaderboardChannel`] backed by the Discord HTTP API.
pub struct DiscordLeaderboardChannel {
    http: Arc<Http>,
    channel_id: ChannelId,
    bot_user_id: UserId,
    announcement: bool,
}

impl DiscordLeaderboardChannel {
    /// Resolves the configured channel, returning `None` when it no longer
    /// exists or is not a guild channel (deleted mid-session is a silent
    /// skip, not an error).
    pub async fn resolve(http: Arc<Http>, channel_id: u64) -> Result<Option<Self>, AppError> {
        let channel = match http.get_channel(ChannelId::new(channel_id)).await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::debug!("Leaderboard channel {} unavailable: {}", channel_id, e);
                return Ok(None);
            }
        };

        let Some(guild_channel) = channel.guild() else {
            return Ok(None);
        };

        let bot_user_id = http.get_current_user().await?.id;

        Ok(Some(Self {
            channel_id: guild_channel.id,
            bot_user_id,
            announcement: guild_channel.kind == ChannelType::News,
            http,
        }))
    }
}

#[async_trait]
impl LeaderboardChannel for DiscordLeaderboardChannel {
    async fn purge(&self) -> Result<(), AppError> {
        let messages = self
            .channel_id
            .messages(&self.http, GetMessages::new().limit(PURGE_HISTORY_LIMIT))
            .await?;

        for message in messages {
            let ephemeral = message
                .flags
                .is_some_and(|flags| flags.contains(MessageFlags::EPHEMERAL));

            if message.author.id == self.bot_user_id && !message.pinned && !ephemeral {
                self.http
                    .delete_message(self.channel_id, message.id, None)
                    .await?;
            }
        }

        Ok(())
    }

    async fn send(&self, embed: CreateEmbed) -> Result<MessageHandle, AppError> {
        let message = self
            .channel_id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(MessageHandle {
            message_id: message.id.get(),
        })
    }

    fn supports_crosspost(&self) -> bool {
        self.announcement
    }

    async fn crosspost(&self, message: &MessageHandle) -> Result<(), AppError> {
        self.http
            .crosspost_message(self.channel_id, MessageId::new(message.message_id))
            .await?;

        Ok(())
    }
}
