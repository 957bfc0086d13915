use super::*;

fn chess() -> CreateGameCategoryParam {
    CreateGameCategoryParam {
        id: 100,
        name: "Chess".to_string(),
        forum_id: 101,
        text_id: 102,
        voice_id: 103,
        role_id: None,
    }
}

/// Tests registering a provisioned game category.
///
/// Expected: Ok(GameCategory) with all channel IDs stored
#[tokio::test]
async fn creates_game_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GameCategoryRepository::new(db);
    let category = repo.create(chess()).await?;

    assert_eq!(category.id, 100);
    assert_eq!(category.name, "Chess");
    assert_eq!(category.forum_id, 101);
    assert_eq!(category.text_id, 102);
    assert_eq!(category.voice_id, 103);
    assert_eq!(category.role_id, None);

    Ok(())
}

/// Tests that game names are unique.
///
/// Expected: Err(AppError::DbErr)
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GameCategoryRepository::new(db);
    repo.create(chess()).await?;

    let result = repo
        .create(CreateGameCategoryParam {
            id: 200,
            forum_id: 201,
            text_id: 202,
            voice_id: 203,
            ..chess()
        })
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}

/// Tests storing the optional game role.
///
/// Expected: Ok(GameCategory) with `role_id` set
#[tokio::test]
async fn stores_role_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GameCategoryRepository::new(db);
    let category = repo
        .create(CreateGameCategoryParam {
            role_id: Some(104),
            ..chess()
        })
        .await?;

    assert_eq!(category.role_id, Some(104));

    Ok(())
}
