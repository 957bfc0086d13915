use super::*;

/// Tests removing a habitué row.
///
/// Verifies that the user row itself is kept.
///
/// Expected: Ok(true), then Ok(false) for a second deletion
#[tokio::test]
async fn deletes_habitue_keeping_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_habitue(db, &user.discord_id, "#e74c3c").await?;
    let discord_id: u64 = user.discord_id.parse().unwrap();

    let repo = HabitueRepository::new(db);

    assert!(repo.delete(discord_id).await?);
    assert!(repo.find_by_discord_id(discord_id).await?.is_none());
    assert!(!repo.delete(discord_id).await?);

    let user = crate::data::user::UserRepository::new(db)
        .find_by_discord_id(discord_id)
        .await?;
    assert!(user.is_some());

    Ok(())
}
