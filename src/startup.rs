use std::path::Path;

use tracing::{Level, Metadata};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::{config::Config, error::AppError};

/// Weekly files kept per log folder, about one month.
const MAX_LOG_FILES: usize = 5;

/// Initializes the tracing subscriber.
///
/// Everything goes to stdout. Below `WARN` is also written to `events/`, `WARN`
/// and above to `issues/`, both under `LOGS_PATH` and rotated weekly.
///
/// `RUST_LOG` takes precedence when set; otherwise the bot logs at `LOG_LEVEL`
/// and keeps serenity and the database driver at `warn`.
///
/// # Arguments
/// - `config` - Application configuration containing the log level and directory
///
/// # Returns
/// - `Ok(Vec<WorkerGuard>)` - Guards flushing the file writers; keep them alive
/// - `Err(AppError::LogInitErr)` - A log folder could not be created
pub fn init_logging(config: &Config) -> Result<Vec<WorkerGuard>, AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "zors={},serenity=warn,sqlx=warn,sea_orm=warn",
            config.log_level
        )
        .into()
    });

    let (events, events_guard) =
        tracing_appender::non_blocking(rolling_appender(&config.logs_path, "events")?);
    let (issues, issues_guard) =
        tracing_appender::non_blocking(rolling_appender(&config.logs_path, "issues")?);

    let events_layer = fmt::Layer::default()
        .with_ansi(false)
        .with_writer(events)
        .with_filter(filter_fn(|metadata| !is_issue(metadata)));

    let issues_layer = fmt::Layer::default()
        .with_ansi(false)
        .with_writer(issues)
        .with_filter(filter_fn(is_issue));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::Layer::default())
        .with(events_layer)
        .with(issues_layer)
        .init();

    Ok(vec![events_guard, issues_guard])
}

fn rolling_appender(logs_path: &Path, name: &str) -> Result<RollingFileAppender, AppError> {
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::WEEKLY)
        .filename_prefix(name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(logs_path.join(name))?)
}

/// Whether a record belongs in the issues log rather than the events log.
fn is_issue(metadata: &Metadata<'_>) -> bool {
    is_issue_level(metadata.level())
}

fn is_issue_level(level: &Level) -> bool {
    level <= &Level::WARN
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration,
/// then runs all pending SeaORM migrations so the schema is up-to-date before the
/// bot handles its first event.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
