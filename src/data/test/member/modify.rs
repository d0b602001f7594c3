use super::*;

/// Tests that modifying an unknown member creates the row.
///
/// Verifies the read-modify-write contract starts from a fresh aggregate
/// (zero totals, unranked placement) when no row exists.
///
/// Expected: Ok with a new row holding the mutated values
#[tokio::test]
async fn creates_missing_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRepository::new(db);
    let member = repo
        .modify(10, 42, |member| {
            member.display_name = "Newcomer".to_string();
            member.experience += 25;
        })
        .await?;

    assert_eq!(member.experience, 25);
    assert_eq!(member.placement, -1);

    let stored = repo.get_top_by_experience(10, 16).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].display_name, "Newcomer");
    assert_eq!(stored[0].experience, 25);

    Ok(())
}

/// Tests that modifying an existing member updates in place.
///
/// Expected: Ok with accumulated values and no duplicate row
#[tokio::test]
async fn updates_existing_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::member::MemberFactory::new(db)
        .guild_id("10")
        .user_id("42")
        .experience(100)
        .voice_activity(5_000)
        .build()
        .await?;

    let repo = MemberRepository::new(db);
    let member = repo
        .modify(10, 42, |member| {
            member.experience += 50;
            member.voice_activity += 1_000;
        })
        .await?;

    assert_eq!(member.experience, 150);
    assert_eq!(member.voice_activity, 6_000);

    let stored = repo.get_top_by_experience(10, 16).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].experience, 150);
    assert_eq!(stored[0].voice_activity, 6_000);

    Ok(())
}
