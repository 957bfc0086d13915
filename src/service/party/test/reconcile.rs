use super::*;

use crate::data::party::PartyRepository;

/// Tests reconciliation of every kind of inconsistency at once.
///
/// - Alice's party channel was deleted by hand (stale row)
/// - Bob's party is empty
/// - Carol's channel is an empty party channel with no row
///
/// Expected: all three cleaned up and counted
#[tokio::test]
async fn cleans_stale_rows_empty_parties_and_orphans() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let platform = FakePlatform::new();
    let locks = PartyLocks::new();
    let chess = create_game(db, &platform, "Chess").await?;
    let service = service(db, &platform, &locks);

    let JoinOutcome::Created { channel_id: alice } = service
        .handle_lobby_join(GUILD, ALICE, "Alice", &chess)
        .await?
    else {
        panic!("expected Alice's party");
    };
    let JoinOutcome::Created { channel_id: bob } = service
        .handle_lobby_join(GUILD, BOB, "Bob", &chess)
        .await?
    else {
        panic!("expected Bob's party");
    };
    let carol = platform.add_channel("Carol-party", ChannelKind::Voice, Some(chess.id));

    platform.remove_channel(alice);
    platform.disconnect(BOB);

    let report = service.reconcile(GUILD).await?;

    assert_eq!(
        report,
        ReconcileReport {
            stale_rows_removed: 1,
            empty_parties_removed: 1,
            orphan_channels_removed: 1,
        }
    );
    assert!(platform.channel(bob).is_none());
    assert!(platform.channel(carol).is_none());
    assert_eq!(party_count(db).await?, 0);

    Ok(())
}

/// Tests reconciliation with occupied parties and unrelated channels.
///
/// Expected: nothing removed
#[tokio::test]
async fn leaves_occupied_parties_and_foreign_channels() -> Result<(), AppError> {
    let test = setup().await;
    let db = test.db.as_ref().unwrap();
    let platform = FakePlatform::new();
    let locks = PartyLocks::new();
    let chess = create_game(db, &platform, "Chess").await?;
    let service = service(db, &platform, &locks);

    let JoinOutcome::Created { channel_id } = service
        .handle_lobby_join(GUILD, ALICE, "Alice", &chess)
        .await?
    else {
        panic!("expected Alice's party");
    };
    let foreign = platform.add_channel("after-party", ChannelKind::Voice, None);

    let report = service.reconcile(GUILD).await?;

    assert_eq!(report, ReconcileReport::default());
    assert!(platform.channel(channel_id).is_some());
    assert!(platform.channel(chess.voice_id).is_some());
    assert!(platform.channel(foreign).is_some());
    assert!(PartyRepository::new(db)
        .get_by_channel(channel_id)
        .await?
        .is_some());

    Ok(())
}
