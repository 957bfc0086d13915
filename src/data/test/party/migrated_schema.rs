use super::*;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

/// Connects to an in-memory database whose schema comes from the migrations
/// rather than from the entities.
async fn migrated_db() -> Result<DatabaseConnection, AppError> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Tests registering and reading back a party on the migrated schema.
///
/// Verifies that `created_at` as created by the migration decodes into the
/// entity's UTC timestamp, on insert with returning and on lookup.
///
/// Expected: Ok(Party) from both insert and lookup with the same timestamp
#[tokio::test]
async fn registers_and_reads_party() -> Result<(), AppError> {
    let db = migrated_db().await?;

    let user = factory::user::UserFactory::new(&db)
        .discord_id("501")
        .build()
        .await?;
    let category = factory::game_category::GameCategoryFactory::new(&db)
        .id("100")
        .build()
        .await?;

    let repo = PartyRepository::new(&db);
    let inserted = repo
        .insert(CreatePartyParam {
            channel_id: 9000,
            game_category_id: category.id.parse().unwrap(),
            owner_id: user.discord_id.parse().unwrap(),
            name: "Alice-party".to_string(),
        })
        .await?;

    let found = repo.get_by_owner_and_game(501, 100).await?.unwrap();

    assert_eq!(found.channel_id, 9000);
    assert_eq!(found.created_at, inserted.created_at);

    Ok(())
}

/// Tests the unique owner and game index created by the migration.
///
/// Expected: Err(AppError::DbErr) for a second party of the same owner and game
#[tokio::test]
async fn enforces_one_party_per_owner_and_game() -> Result<(), AppError> {
    let db = migrated_db().await?;

    let (user, category, _party) = factory::helpers::create_party_with_dependencies(&db).await?;

    let result = PartyRepository::new(&db)
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
