use super::*;

/// Tests inserting a guild seen for the first time.
///
/// Verifies that the repository creates a new guild row with the leaderboard
/// disabled and no channel configured.
///
/// Expected: Ok with guild created using default settings
#[tokio::test]
async fn creates_new_guild_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    repo.upsert(123, "Test Guild", Some("abc123".to_string())).await?;

    let guild = repo.find_by_guild_id(123).await?.unwrap();
    assert_eq!(guild.guild_id, 123);
    assert_eq!(guild.name, "Test Guild");
    assert_eq!(guild.icon_hash, Some("abc123".to_string()));
    assert!(!guild.leaderboard_enabled);
    assert!(guild.leaderboard_channel_id.is_none());

    Ok(())
}

/// Tests re-upserting a known guild.
///
/// Verifies that display properties are refreshed while the leaderboard
/// settings survive, so a gateway reconnect never resets configuration.
///
/// Expected: Ok with updated name and preserved settings
#[tokio::test]
async fn updates_name_preserving_settings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let seeded = factory::guild::GuildFactory::new(db)
        .guild_id("456")
        .name("Old Name")
        .leaderboard_enabled(true)
        .leaderboard_channel_id("789")
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    repo.upsert(456, "New Name", None).await?;

    let guild = repo.find_by_guild_id(456).await?.unwrap();
    assert_eq!(guild.name, "New Name");
    assert!(guild.leaderboard_enabled);
    assert_eq!(guild.leaderboard_channel_id, Some(789));
    assert_eq!(seeded.guild_id, "456");

    Ok(())
}
