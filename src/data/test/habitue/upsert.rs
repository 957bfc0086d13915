use super::*;

/// Tests storing a habitué colour and changing it afterwards.
///
/// Expected: Ok(Habitue) with the latest colour, a single row
#[tokio::test]
async fn creates_then_updates_color() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let discord_id: u64 = user.discord_id.parse().unwrap();

    let repo = HabitueRepository::new(db);

    let habitue = repo.upsert(discord_id, Rgb::BLACK).await?;
    assert_eq!(habitue.color, Rgb::BLACK);

    let habitue = repo.upsert(discord_id, Rgb::from_u32(0x3498db)).await?;
    assert_eq!(habitue.color.to_hex(), "#3498db");

    let stored = repo.find_by_discord_id(discord_id).await?.unwrap();
    assert_eq!(stored.color, Rgb::from_u32(0x3498db));
    assert_eq!(repo.get_all_ids().await?.len(), 1);

    Ok(())
}

/// Tests that a habitué row needs a registered user.
///
/// Expected: Err(AppError::DbErr)
#[tokio::test]
async fn requires_registered_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = HabitueRepository::new(db).upsert(123456789, Rgb::BLACK).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
