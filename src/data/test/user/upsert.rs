use super::*;

/// Tests inserting a new user.
///
/// Verifies that the repository creates a row when the Discord ID is unknown.
///
/// Expected: Ok(User) with the given ID and name
#[tokio::test]
async fn creates_new_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            name: "Alice".to_string(),
        })
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.name, "Alice");

    Ok(())
}

/// Tests upserting a user that already exists.
///
/// Verifies that the name is overwritten instead of a second row being created.
///
/// Expected: Ok(User) with the new name, single row in the table
#[tokio::test]
async fn updates_existing_user_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.upsert(UpsertUserParam {
        discord_id: 123456789,
        name: "Alice".to_string(),
    })
    .await?;

    let user = repo
        .upsert(UpsertUserParam {
            discord_id: 123456789,
            name: "Alicia".to_string(),
        })
        .await?;

    assert_eq!(user.name, "Alicia");
    assert_eq!(repo.get_all_ids().await?.len(), 1);

    Ok(())
}
