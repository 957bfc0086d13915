mod bot;
mod config;
mod data;
mod error;
mod model;
mod platform;
mod scheduler;
mod service;
mod startup;
mod util;

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let _log_guards = startup::init_logging(&config)?;

    let db = startup::connect_to_database(&config).await?;

    tracing::info!("Starting zors");

    bot::start::start_bot(config, db).await
}
