use super::*;

/// Tests removing a registered party.
///
/// Expected: Ok(true), then Ok(false) when deleting again
#[tokio::test]
async fn deletes_party_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_party_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_user, _category, party) = factory::helpers::create_party_with_dependencies(db).await?;
    let channel_id: u64 = party.channel_id.parse().unwrap();

    let repo = PartyRepository::new(db);

    assert!(repo.delete(channel_id).await?);
    assert!(repo.get_by_channel(channel_id).await?.is_none());
    assert!(!repo.delete(channel_id).await?);

    Ok(())
}
