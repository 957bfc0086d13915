use super::*;
use sea_orm::{EntityTrait, PaginatorTrait};

/// Tests looking a party up by owner and game.
///
/// Expected: Ok(Some(Party)) for the owner's game, Ok(None) for another game
#[tokio::test]
async fn gets_by_owner_and_game() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, category, party) = factory::helpers::create_party_with_dependencies(db).await?;
    let other_game = factory::create_game_category(db).await?;

    let repo = PartyRepository::new(db);
    let owner_id: u64 = user.discord_id.parse().unwrap();

    let found = repo
        .get_by_owner_and_game(owner_id, category.id.parse().unwrap())
        .await?
        .unwrap();
    assert_eq!(found.channel_id.to_string(), party.channel_id);

    let missing = repo
        .get_by_owner_and_game(owner_id, other_game.id.parse().unwrap())
        .await?;
    assert!(missing.is_none());

    Ok(())
}

/// Tests looking a party up by its voice channel.
///
/// Expected: Ok(Some(Party)) for a registered channel, Ok(None) otherwise
#[tokio::test]
async fn gets_by_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let category = factory::create_game_category(db).await?;
    factory::party::PartyFactory::new(db, &user.discord_id, &category.id)
        .channel_id("7000")
        .name("Bob-party")
        .build()
        .await?;

    let repo = PartyRepository::new(db);

    let found = repo.get_by_channel(7000).await?.unwrap();
    assert_eq!(found.name, "Bob-party");

    assert!(repo.get_by_channel(7001).await?.is_none());

    Ok(())
}

/// Tests scoping the registry to a set of games.
///
/// Expected: only parties of the requested games, nothing for an empty set
#[tokio::test]
async fn gets_by_game_categories() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, chess, _) = factory::helpers::create_party_with_dependencies(db).await?;
    let (_, go, _) = factory::helpers::create_party_with_dependencies(db).await?;
    factory::helpers::create_party_with_dependencies(db).await?;

    let repo = PartyRepository::new(db);
    let chess_id: u64 = chess.id.parse().unwrap();
    let go_id: u64 = go.id.parse().unwrap();

    let parties = repo.get_by_game_categories(&[chess_id, go_id]).await?;
    assert_eq!(parties.len(), 2);
    assert!(parties
        .iter()
        .all(|party| party.game_category_id == chess_id || party.game_category_id == go_id));

    assert!(repo.get_by_game_categories(&[]).await?.is_empty());
    assert_eq!(entity::prelude::Party::find().count(db).await?, 3);

    Ok(())
}
