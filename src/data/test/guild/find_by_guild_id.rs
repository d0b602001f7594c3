use super::*;

/// Tests finding a guild by its Discord ID.
///
/// Expected: Ok(Some) with parsed settings for a known guild
#[tokio::test]
async fn finds_known_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db)
        .guild_id("42")
        .leaderboard_enabled(true)
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    let guild = repo.find_by_guild_id(42).await?.unwrap();

    assert_eq!(guild.guild_id, 42);
    assert!(guild.leaderboard_enabled);

    Ok(())
}

/// Tests finding a guild that was never seen.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);

    assert!(repo.find_by_guild_id(999).await?.is_none());

    Ok(())
}
