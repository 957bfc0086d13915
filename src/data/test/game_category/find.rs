use super::*;

/// Tests resolving a lobby voice channel to its game.
///
/// Expected: Ok(Some(GameCategory)) for the lobby, Ok(None) for any other channel
#[tokio::test]
async fn finds_by_lobby() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::game_category::GameCategoryFactory::new(db)
        .name("Chess")
        .voice_id("3000")
        .build()
        .await?;

    let repo = GameCategoryRepository::new(db);

    let found = repo.find_by_lobby(3000).await?.unwrap();
    assert_eq!(found.id.to_string(), created.id);
    assert_eq!(found.name, "Chess");

    assert!(repo.find_by_lobby(3001).await?.is_none());

    Ok(())
}

/// Tests looking up games by name and by category ID.
///
/// Expected: Ok(Some(GameCategory)) for known values, Ok(None) otherwise
#[tokio::test]
async fn finds_by_name_and_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::game_category::GameCategoryFactory::new(db)
        .id("4000")
        .name("Go")
        .build()
        .await?;

    let repo = GameCategoryRepository::new(db);

    assert_eq!(repo.find_by_name("Go").await?.unwrap().id, 4000);
    assert!(repo.find_by_name("Chess").await?.is_none());

    assert_eq!(repo.find_by_id(4000).await?.unwrap().name, "Go");
    assert!(repo.find_by_id(4001).await?.is_none());

    Ok(())
}
