use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests deleting a game that still has parties.
///
/// Verifies that the parties registered under the game are removed by cascade
/// while their owners stay registered.
///
/// Expected: Ok(true), no party left, owner still present
#[tokio::test]
async fn cascades_to_parties() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, category, _party) =
        factory::helpers::create_party_with_dependencies(db).await?;

    let repo = GameCategoryRepository::new(db);
    let deleted = repo.delete(category.id.parse().unwrap()).await?;

    assert!(deleted);
    assert_eq!(entity::prelude::Party::find().count(db).await?, 0);
    assert_eq!(entity::prelude::User::find().count(db).await?, 1);

    Ok(())
}

/// Tests deleting an unknown game.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_game() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GameCategory)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!GameCategoryRepository::new(db).delete(4242).await?);

    Ok(())
}
