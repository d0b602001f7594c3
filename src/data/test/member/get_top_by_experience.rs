use super::*;

/// Tests the top-N ordering by experience.
///
/// Verifies that members are returned highest experience first and that the
/// limit is applied after ordering.
///
/// Expected: Ok with the two richest members in descending order
#[tokio::test]
async fn orders_by_experience_and_limits() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for (user_id, experience) in [(1u64, 100), (2, 300), (3, 200)] {
        factory::member::MemberFactory::new(db)
            .guild_id("10")
            .user_id(user_id.to_string())
            .experience(experience)
            .build()
            .await?;
    }

    let repo = MemberRepository::new(db);
    let top = repo.get_top_by_experience(10, 2).await?;

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].user_id, 2);
    assert_eq!(top[0].experience, 300);
    assert_eq!(top[1].user_id, 3);
    assert_eq!(top[1].experience, 200);

    Ok(())
}

/// Tests that the ranking is scoped to one guild.
///
/// Expected: Ok with members of other guilds excluded
#[tokio::test]
async fn scopes_to_requested_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::member::MemberFactory::new(db)
        .guild_id("10")
        .user_id("1")
        .experience(100)
        .build()
        .await?;
    factory::member::MemberFactory::new(db)
        .guild_id("20")
        .user_id("2")
        .experience(999)
        .build()
        .await?;

    let repo = MemberRepository::new(db);
    let top = repo.get_top_by_experience(10, 16).await?;

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].user_id, 1);

    Ok(())
}
