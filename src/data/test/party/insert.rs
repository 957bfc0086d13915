use super::*;

/// Tests registering a new party channel.
///
/// Expected: Ok(Party) with the channel, owner and game stored
#[tokio::test]
async fn registers_party() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let category = factory::create_game_category(db).await?;
    let owner_id: u64 = user.discord_id.parse().unwrap();
    let game_category_id: u64 = category.id.parse().unwrap();

    let party = PartyRepository::new(db)
        .insert(CreatePartyParam {
            channel_id: 9000,
            game_category_id,
            owner_id,
            name: "Alice-party".to_string(),
        })
        .await?;

    assert_eq!(party.channel_id, 9000);
    assert_eq!(party.owner_id, owner_id);
    assert_eq!(party.game_category_id, game_category_id);
    assert_eq!(party.name, "Alice-party");

    Ok(())
}

/// Tests the one-party-per-owner-and-game constraint.
///
/// Verifies that a second channel cannot be registered for the same owner and
/// game, which is what makes a failed insert after channel creation observable.
///
/// Expected: Err(AppError::DbErr)
#[tokio::test]
async fn rejects_second_party_for_same_owner_and_game() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, category, _party) =
        factory::helpers::create_party_with_dependencies(db).await?;

    let result = PartyRepository::new(db)
        .insert(CreatePartyParam {
            channel_id: 9001,
            game_category_id: category.id.parse().unwrap(),
            owner_id: user.discord_id.parse().unwrap(),
            name: "second-party".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}

/// Tests that one owner can hold parties in different games.
///
/// Expected: Ok(Party) for the second game
#[tokio::test]
async fn allows_parties_in_different_games() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _category, _party) =
        factory::helpers::create_party_with_dependencies(db).await?;
    let other_game = factory::create_game_category(db).await?;

    let result = PartyRepository::new(db)
        .insert(CreatePartyParam {
            channel_id: 9002,
            game_category_id: other_game.id.parse().unwrap(),
            owner_id: user.discord_id.parse().unwrap(),
            name: "other-party".to_string(),
        })
        .await;

    assert!(result.is_ok());

    Ok(())
}
