//! Slash command and autocomplete dispatch.

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, EditInteractionResponse, Interaction,
};

use crate::bot::{
    command::{self, game},
    handler::Handler,
};

/// Handles an interaction from the main guild.
///
/// Commands are deferred first since provisioning channels can exceed the
/// three-second reply window; the reply is edited in once the command ends.
pub async fn handle_interaction_create(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            if command.guild_id.map(|id| id.get()) != Some(handler.config.main_guild_id) {
                return;
            }
            handle_command(handler, &ctx, &command).await;
        }
        Interaction::Autocomplete(autocomplete) => {
            if autocomplete.data.name != "delete_game" {
                return;
            }
            let Some(focused) = autocomplete.data.autocomplete() else {
                return;
            };

            match game::autocomplete_game(handler, &ctx, &focused).await {
                Ok(choices) => {
                    if let Err(e) = autocomplete
                        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(choices))
                        .await
                    {
                        tracing::warn!("Failed to answer game autocompletion: {}", e);
                    }
                }
                Err(e) => tracing::error!("Failed to list games for autocompletion: {}", e),
            }
        }
        _ => {}
    }
}

async fn handle_command(handler: &Handler, ctx: &Context, command: &CommandInteraction) {
    tracing::debug!(
        "/{} invoked by {} ({})",
        command.data.name,
        command.user.name,
        command.user.id
    );

    if let Err(e) = command.defer(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {}", command.data.name, e);
        return;
    }

    let content = match command::dispatch(handler, ctx, command).await {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("/{} failed: {}", command.data.name, e);
            e.user_message()
        }
    };

    if let Err(e) = command
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await
    {
        tracing::error!("Failed to reply to /{}: {}", command.data.name, e);
    }
}
