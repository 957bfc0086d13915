use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::Context;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::Config,
    error::AppError,
    platform::SerenityPlatform,
    service::party::{PartyLocks, PartyService},
};

/// Starts the party reconciliation scheduler
///
/// Runs on the `RECONCILE_CRON` schedule and repairs the party registry: rows
/// whose channel is gone, parties left empty when an event was missed, and party
/// channels that were never registered.
///
/// # Arguments
/// - `db`: Database connection
/// - `ctx`: Discord context for channel operations
/// - `locks`: Party locks shared with the voice event handler
/// - `config`: Application configuration
pub async fn start_scheduler(
    db: DatabaseConnection,
    ctx: Context,
    locks: Arc<PartyLocks>,
    config: Config,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_config = config.clone();

    let job = Job::new_async(config.reconcile_cron.as_str(), move |_uuid, _lock| {
        let db = db.clone();
        let ctx = ctx.clone();
        let locks = locks.clone();
        let config = job_config.clone();

        Box::pin(async move {
            if let Err(e) = reconcile_parties(&db, ctx, &locks, &config).await {
                tracing::error!("Error reconciling parties: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Party reconciliation scheduler started ({})",
        config.reconcile_cron
    );

    Ok(())
}

/// Reconciles the parties of the main guild once
pub async fn reconcile_parties(
    db: &DatabaseConnection,
    ctx: Context,
    locks: &PartyLocks,
    config: &Config,
) -> Result<(), AppError> {
    let platform = SerenityPlatform::new(ctx);
    let service = PartyService::new(db, &platform, locks, config.party_grace_period);

    let report = service.reconcile(config.main_guild_id).await?;

    tracing::debug!("Scheduled party reconciliation done: {:?}", report);

    Ok(())
}
