use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

use crate::activity::member_state::MemberActivityState;
use crate::activity::service::{ActivityService, ActivitySettings, MessageReceived, VoiceUpdate};

fn settings(experience_multiplier: i64) -> ActivitySettings {
    ActivitySettings {
        max_speaking_members: 0,
        experience_multiplier,
        // Degenerate range makes the message grant deterministic
        message_experience_min: 15,
        message_experience_max: 16,
    }
}

fn voice_update(guild_id: u64, user_id: u64, left: Option<u64>, joined: Option<u64>) -> VoiceUpdate {
    VoiceUpdate {
        guild_id,
        user_id,
        display_name: format!("User {}", user_id),
        is_bot: false,
        frozen: false,
        channel_left: left,
        channel_joined: joined,
        afk_channel: None,
    }
}

fn message(guild_id: Option<u64>, author_id: u64) -> MessageReceived {
    MessageReceived {
        guild_id,
        author_id,
        display_name: format!("User {}", author_id),
        is_bot: false,
        is_webhook: false,
    }
}

async fn find_member(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
) -> Result<Option<entity::member::Model>, DbErr> {
    entity::prelude::Member::find()
        .filter(entity::member::Column::GuildId.eq(guild_id.to_string()))
        .filter(entity::member::Column::UserId.eq(user_id.to_string()))
        .one(db)
        .await
}

/// Tests the flush arithmetic from settled state to stored aggregate.
///
/// A settled state of 120,000 ms and 2.0 points with a multiplier of 3 must
/// grant `2.0 * 3 * 15 = 90` experience and the full settled time, creating
/// the member row on first flush.
///
/// Expected: member row with 90 experience and 120,000 ms voice activity
#[tokio::test]
async fn flush_converts_points_into_experience() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db)
        .leaderboard_enabled(true)
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(3));
    let update = voice_update(guild_id, 42, Some(10), None);

    service
        .flush_voice_activity(&update, MemberActivityState::with_totals(120_000, 2.0))
        .await?;

    let member = find_member(db, guild_id, 42).await?.unwrap();
    assert_eq!(member.experience, 90);
    assert_eq!(member.voice_activity, 120_000);
    assert_eq!(member.display_name, "User 42");
    assert_eq!(member.placement, -1);

    Ok(())
}

/// Tests that leaving a tracked channel flushes a member row.
///
/// Joins two members so the channel is eligible, then removes one; the
/// settled state (however small) must be written through to storage.
///
/// Expected: member row created for the leaving member
#[tokio::test]
async fn voice_leave_flushes_member_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db)
        .leaderboard_enabled(true)
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(1));

    service
        .handle_voice_update(voice_update(guild_id, 1, None, Some(10)))
        .await
        .unwrap();
    service
        .handle_voice_update(voice_update(guild_id, 2, None, Some(10)))
        .await
        .unwrap();
    service
        .handle_voice_update(voice_update(guild_id, 1, Some(10), None))
        .await
        .unwrap();

    let member = find_member(db, guild_id, 1).await?.unwrap();
    assert_eq!(member.display_name, "User 1");
    assert!(member.voice_activity >= 0);

    Ok(())
}

/// Tests that voice activity is gated on the guild's enabled flag.
///
/// Expected: no member row for a disabled or unknown guild
#[tokio::test]
async fn voice_update_requires_enabled_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let disabled = factory::guild::create_guild(db).await?;
    let disabled_id: u64 = disabled.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(1));

    service
        .handle_voice_update(voice_update(disabled_id, 1, None, Some(10)))
        .await
        .unwrap();
    service
        .handle_voice_update(voice_update(disabled_id, 1, Some(10), None))
        .await
        .unwrap();

    // Unknown guild behaves the same as a disabled one
    service
        .handle_voice_update(voice_update(999_999, 1, Some(10), None))
        .await
        .unwrap();

    assert!(find_member(db, disabled_id, 1).await?.is_none());
    assert!(find_member(db, 999_999, 1).await?.is_none());

    Ok(())
}

/// Tests that bots never accrue voice activity.
///
/// Expected: no member row for a bot transition
#[tokio::test]
async fn bots_are_excluded_from_tracking() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db)
        .leaderboard_enabled(true)
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(1));

    let mut update = voice_update(guild_id, 1, Some(10), None);
    update.is_bot = true;
    service.handle_voice_update(update).await.unwrap();

    assert!(find_member(db, guild_id, 1).await?.is_none());

    Ok(())
}

/// Tests that time in the guild's AFK channel is never tracked.
///
/// Expected: joining and leaving the AFK channel produces no member row
#[tokio::test]
async fn afk_channel_presence_is_not_tracked() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db)
        .leaderboard_enabled(true)
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(1));

    let mut join = voice_update(guild_id, 1, None, Some(10));
    join.afk_channel = Some(10);
    service.handle_voice_update(join).await.unwrap();

    let mut leave = voice_update(guild_id, 1, Some(10), None);
    leave.afk_channel = Some(10);
    service.handle_voice_update(leave).await.unwrap();

    assert!(find_member(db, guild_id, 1).await?.is_none());

    Ok(())
}

/// Tests the message grant and its per-minute cooldown.
///
/// With a degenerate random range the grant is deterministic: 15 times the
/// multiplier. A second message inside the cooldown window must not grant
/// again.
///
/// Expected: exactly one grant of 30 experience
#[tokio::test]
async fn message_grants_once_per_cooldown() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db)
        .leaderboard_enabled(true)
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(2));

    service.handle_message(message(Some(guild_id), 7)).await.unwrap();
    service.handle_message(message(Some(guild_id), 7)).await.unwrap();

    let member = find_member(db, guild_id, 7).await?.unwrap();
    assert_eq!(member.experience, 30);

    Ok(())
}

/// Tests that bot, webhook, and direct messages grant nothing.
///
/// Expected: no member rows created
#[tokio::test]
async fn message_ignores_bots_webhooks_and_dms() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db)
        .leaderboard_enabled(true)
        .build()
        .await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(1));

    let mut bot_message = message(Some(guild_id), 1);
    bot_message.is_bot = true;
    service.handle_message(bot_message).await.unwrap();

    let mut webhook_message = message(Some(guild_id), 2);
    webhook_message.is_webhook = true;
    service.handle_message(webhook_message).await.unwrap();

    service.handle_message(message(None, 3)).await.unwrap();

    assert!(find_member(db, guild_id, 1).await?.is_none());
    assert!(find_member(db, guild_id, 2).await?.is_none());

    Ok(())
}

/// Tests that the cooldown is recorded even when the guild is disabled.
///
/// A message to a disabled guild grants nothing but still consumes the
/// cooldown slot, so enabling the leaderboard immediately afterwards cannot
/// be farmed retroactively within the window.
///
/// Expected: no grant before or after enabling within one cooldown window
#[tokio::test]
async fn cooldown_recorded_for_disabled_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let service = ActivityService::new(db.clone(), settings(1));

    service.handle_message(message(Some(guild_id), 7)).await.unwrap();
    assert!(find_member(db, guild_id, 7).await?.is_none());

    let mut active: entity::guild::ActiveModel = guild.into();
    active.leaderboard_enabled = ActiveValue::Set(true);
    active.update(db).await?;

    service.handle_message(message(Some(guild_id), 7)).await.unwrap();
    assert!(find_member(db, guild_id, 7).await?.is_none());

    Ok(())
}
