use super::*;

/// Tests loading every known guild.
///
/// Expected: Ok with all created guilds returned
#[tokio::test]
async fn returns_every_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::create_guild(db).await?;
    factory::guild::create_guild(db).await?;
    factory::guild::create_guild(db).await?;

    let repo = GuildRepository::new(db);
    let guilds = repo.get_all().await?;

    assert_eq!(guilds.len(), 3);

    Ok(())
}

/// Tests loading guilds from an empty table.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn returns_empty_when_no_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let guilds = repo.get_all().await?;

    assert!(guilds.is_empty());

    Ok(())
}
