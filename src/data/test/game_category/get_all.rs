use super::*;

/// Tests listing every game.
///
/// Expected: Ok(Vec<GameCategory>) ordered by name
#[tokio::test]
async fn lists_games_ordered_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for name in ["Go", "Chess", "Shogi"] {
        factory::game_category::GameCategoryFactory::new(db)
            .name(name)
            .build()
            .await?;
    }

    let names: Vec<String> = GameCategoryRepository::new(db)
        .get_all()
        .await?
        .into_iter()
        .map(|category| category.name)
        .collect();

    assert_eq!(names, vec!["Chess", "Go", "Shogi"]);

    Ok(())
}

/// Tests listing with no games provisioned.
///
/// Expected: Ok(empty Vec)
#[tokio::test]
async fn returns_empty_without_games() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(GameCategoryRepository::new(db).get_all().await?.is_empty());

    Ok(())
}
