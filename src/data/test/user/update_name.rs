use super::*;

/// Tests renaming a registered user.
///
/// Expected: Ok(true) and the stored name changed
#[tokio::test]
async fn renames_existing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("123456789")
        .name("Alice")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo.update_name(123456789, "Alicia".to_string()).await?;

    assert!(updated);
    let user = repo.find_by_discord_id(123456789).await?.unwrap();
    assert_eq!(user.name, "Alicia");

    Ok(())
}

/// Tests renaming a user that was never registered.
///
/// Verifies that no row is created as a side effect.
///
/// Expected: Ok(false)
#[tokio::test]
async fn ignores_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let updated = repo.update_name(123456789, "Ghost".to_string()).await?;

    assert!(!updated);
    assert!(repo.find_by_discord_id(123456789).await?.is_none());

    Ok(())
}
