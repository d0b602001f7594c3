use serenity::all::{Context, VoiceState};

use crate::activity::service::{ActivityService, VoiceUpdate};

/// Handle a member's voice state changing
///
/// A change that keeps the member in the same channel is a mute/deafen/
/// suppress toggle and becomes a freeze broadcast; anything else is a
/// channel transition (join, leave, or move).
pub async fn handle_voice_state_update(
    activity: &ActivityService,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };
    let Some(member) = new.member.as_ref() else {
        return;
    };

    let user_id = new.user_id.get();
    let is_bot = member.user.bot;
    let frozen = is_frozen(&new);
    let display_name = member.display_name().to_string();

    let channel_left = old.as_ref().and_then(|state| state.channel_id).map(|id| id.get());
    let channel_joined = new.channel_id.map(|id| id.get());

    if channel_left == channel_joined {
        activity
            .handle_freeze(guild_id.get(), user_id, is_bot, frozen)
            .await;
        return;
    }

    let afk_channel = ctx
        .cache
        .guild(guild_id)
        .and_then(|guild| guild.afk_metadata.as_ref().map(|afk| afk.afk_channel_id.get()));

    let update = VoiceUpdate {
        guild_id: guild_id.get(),
        user_id,
        display_name,
        is_bot,
        frozen,
        channel_left,
        channel_joined,
        afk_channel,
    };

    if let Err(e) = activity.handle_voice_update(update).await {
        tracing::error!(
            "Failed to update voice activity for user {} in guild {}: {}",
            user_id,
            guild_id,
            e
        );
    }
}

/// A member accrues nothing while muted, deafened, or suppressed.
fn is_frozen(state: &VoiceState) -> bool {
    state.mute || state.self_mute || state.deaf || state.self_deaf || state.suppress
}
