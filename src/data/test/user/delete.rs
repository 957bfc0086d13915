use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests deleting a user who owns a party and a habitué row.
///
/// Verifies that the foreign key cascade removes the dependent rows.
///
/// Expected: Ok(true), no party or habitué row left
#[tokio::test]
async fn cascades_to_party_and_habitue() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _category, _party) =
        factory::helpers::create_party_with_dependencies(db).await?;
    factory::create_habitue(db, &user.discord_id, "#3498db").await?;

    let repo = UserRepository::new(db);
    let deleted = repo.delete(user.discord_id.parse().unwrap()).await?;

    assert!(deleted);
    assert_eq!(entity::prelude::Party::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Habitue::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting a user that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(!repo.delete(123456789).await?);

    Ok(())
}
