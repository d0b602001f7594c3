use super::*;

/// Tests persisting a placement change through save.
///
/// Mirrors the ranking engine's flow: load a member, change its placement,
/// save it back.
///
/// Expected: Ok with the stored placement updated
#[tokio::test]
async fn persists_placement_change() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::member::MemberFactory::new(db)
        .guild_id("10")
        .user_id("42")
        .experience(500)
        .placement(3)
        .build()
        .await?;

    let repo = MemberRepository::new(db);
    let mut member = repo.get_top_by_experience(10, 16).await?.remove(0);
    assert_eq!(member.placement, 3);

    member.placement = 1;
    repo.save(&member).await?;

    let stored = repo.get_top_by_experience(10, 16).await?.remove(0);
    assert_eq!(stored.placement, 1);

    Ok(())
}

/// Tests that save inserts when the member row is missing.
///
/// Expected: Ok with the aggregate stored as given
#[tokio::test]
async fn inserts_missing_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);

    let mut member = Member::new(10, 42);
    member.display_name = "Ranked".to_string();
    member.experience = 750;
    member.placement = 2;
    repo.save(&member).await?;

    let stored = repo.get_top_by_experience(10, 16).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], member);

    Ok(())
}
