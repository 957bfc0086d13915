use super::*;

/// Tests the bulk insert used by member synchronization.
///
/// Verifies that existing rows keep their stored name and that only unknown
/// members are inserted and returned.
///
/// Expected: Ok(Vec<User>) containing only the new member
#[tokio::test]
async fn inserts_only_unknown_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("111")
        .name("Renamed Alice")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let inserted = repo
        .insert_missing(vec![
            UpsertUserParam {
                discord_id: 111,
                name: "Alice".to_string(),
            },
            UpsertUserParam {
                discord_id: 222,
                name: "Bob".to_string(),
            },
        ])
        .await?;

    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].discord_id, 222);

    let alice = repo.find_by_discord_id(111).await?.unwrap();
    assert_eq!(alice.name, "Renamed Alice");
    assert_eq!(repo.get_all_ids().await?.len(), 2);

    Ok(())
}

/// Tests that duplicated members in one batch are inserted once.
///
/// Expected: Ok(Vec<User>) with a single entry
#[tokio::test]
async fn deduplicates_batch() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let param = || UpsertUserParam {
        discord_id: 333,
        name: "Carol".to_string(),
    };

    let inserted = repo.insert_missing(vec![param(), param()]).await?;

    assert_eq!(inserted.len(), 1);

    Ok(())
}

/// Tests an empty batch.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn empty_batch_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let inserted = UserRepository::new(db).insert_missing(Vec::new()).await?;

    assert!(inserted.is_empty());

    Ok(())
}
