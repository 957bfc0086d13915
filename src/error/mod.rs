//! Error types for the bot.
//!
//! `AppError` is the top-level error type wrapping domain-specific errors. Event
//! handlers never propagate it to serenity; they log it and return. Slash commands
//! turn the user-facing variants (`NotFound`, `BadRequest`) into a reply and log
//! everything else.

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion so repository and
/// platform calls can be chained with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Unexpected internal state, such as a stored snowflake that fails to parse.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Log directory could not be set up for the rolling file appenders.
    #[error(transparent)]
    LogInitErr(#[from] tracing_appender::rolling::InitError),

    /// Resource not found error, shown to the invoking user.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error, shown to the invoking user.
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with custom message.
    ///
    /// The message is logged but a generic message is shown to users.
    #[error("{0}")]
    InternalError(String),
}

/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Message safe to show to a Discord user in a command reply.
    ///
    /// User-facing variants return their own message; everything else collapses
    /// into a generic message so internals never leak into the channel.
    ///
    /// # Returns
    /// - `String` - Reply content for the invoking user
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
            _ => "An error occurred while executing the command. Please contact an admin."
                .to_string(),
        }
    }
}
