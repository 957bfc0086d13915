//! Slash commands registered on the main guild.
//!
//! Each command returns the reply content on success. The interaction handler is
//! responsible for deferring, replying and logging failures.

pub mod game;
pub mod habitue;
pub mod ping;

use serenity::all::{CommandInteraction, Context, CreateCommand, ResolvedOption, ResolvedValue};

use crate::{bot::handler::Handler, error::AppError};

/// Every slash command the bot registers.
pub fn all() -> Vec<CreateCommand> {
    vec![
        game::add_game(),
        game::delete_game(),
        habitue::add_habitue(),
        habitue::remove_habitue(),
        habitue::set_color(),
        habitue::set_custom_color(),
        ping::ping(),
    ]
}

/// Runs the command named by the interaction.
///
/// # Returns
/// - `Ok(String)` - Reply content for the invoking user
/// - `Err(AppError::BadRequest)` - Unknown command or invalid options
/// - `Err(AppError)` - The command failed
pub async fn dispatch(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    let guild_id = command
        .guild_id
        .ok_or_else(|| AppError::BadRequest("Commands can only be used in a server.".to_string()))?;
    let options = command.data.options();

    match command.data.name.as_str() {
        "add_game" => game::run_add_game(handler, ctx, guild_id.get(), &options).await,
        "delete_game" => game::run_delete_game(handler, ctx, guild_id.get(), &options).await,
        "add_habitue" => habitue::run_add_habitue(handler, ctx, guild_id, &options).await,
        "remove_habitue" => habitue::run_remove_habitue(handler, ctx, guild_id, &options).await,
        "set_color" => habitue::run_set_color(handler, ctx, guild_id, command, &options).await,
        "set_custom_color" => {
            habitue::run_set_custom_color(handler, ctx, guild_id, command, &options).await
        }
        "ping" => Ok(ping::run_ping(command.user.id)),
        other => Err(AppError::BadRequest(format!("Unknown command {}", other))),
    }
}

/// Finds an option by name among the resolved options of a command.
pub(crate) fn option<'a>(
    options: &'a [ResolvedOption<'a>],
    name: &str,
) -> Option<&'a ResolvedValue<'a>> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub(crate) fn missing_option(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing option {}", name))
}
