use serenity::all::{Context, Message};

use crate::activity::service::{ActivityService, MessageReceived};

/// Handle message creation in a channel
pub async fn handle_message(activity: &ActivityService, _ctx: Context, message: Message) {
    let event = MessageReceived {
        guild_id: message.guild_id.map(|id| id.get()),
        author_id: message.author.id.get(),
        display_name: message
            .author
            .global_name
            .clone()
            .unwrap_or_else(|| message.author.name.clone()),
        is_bot: message.author.bot,
        is_webhook: message.webhook_id.is_some(),
    };

    if let Err(e) = activity.handle_message(event).await {
        tracing::error!(
            "Failed to grant message activity to user {}: {}",
            message.author.id,
            e
        );
    }
}
