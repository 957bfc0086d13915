//! `/add_game` and `/delete_game`.

use serenity::all::{
    AutocompleteOption, CommandOptionType, Context, CreateAutocompleteResponse, CreateCommand,
    CreateCommandOption, Permissions, ResolvedOption, ResolvedValue,
};

use crate::{
    bot::{
        command::{missing_option, option},
        handler::Handler,
    },
    error::AppError,
    platform::SerenityPlatform,
    service::game_category::GameCategoryService,
};

/// Discord caps autocomplete responses at 25 choices.
const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

pub fn add_game() -> CreateCommand {
    CreateCommand::new("add_game")
        .description("Create a category, channels and a lobby for a new game")
        .default_member_permissions(Permissions::MANAGE_CHANNELS)
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "game", "Name of the game")
                .required(true),
        )
}

pub fn delete_game() -> CreateCommand {
    CreateCommand::new("delete_game")
        .description("Delete a game category and all of its channels")
        .default_member_permissions(Permissions::MANAGE_CHANNELS)
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "game", "Game to delete")
                .required(true)
                .set_autocomplete(true),
        )
}

pub async fn run_add_game(
    handler: &Handler,
    ctx: &Context,
    guild_id: u64,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let Some(ResolvedValue::String(name)) = option(options, "game") else {
        return Err(missing_option("game"));
    };

    let platform = SerenityPlatform::new(ctx.clone());
    let service =
        GameCategoryService::new(&handler.db, &platform, &handler.config.games_anchor_category);

    let category = service.add_game(guild_id, name).await?;

    tracing::info!("Game {} added ({})", category.name, category.id);

    Ok(format!("The game {} was added.", category.name))
}

/// The option value is the category id picked from the autocompletion.
pub async fn run_delete_game(
    handler: &Handler,
    ctx: &Context,
    guild_id: u64,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let Some(ResolvedValue::String(value)) = option(options, "game") else {
        return Err(missing_option("game"));
    };

    let category_id = value
        .parse::<u64>()
        .map_err(|_| AppError::NotFound("This game category does not exist.".to_string()))?;

    let platform = SerenityPlatform::new(ctx.clone());
    let service =
        GameCategoryService::new(&handler.db, &platform, &handler.config.games_anchor_category);

    let category = service.delete_game(guild_id, category_id).await?;

    tracing::info!("Game {} deleted ({})", category.name, category.id);

    Ok(format!("The game {} was deleted.", category.name))
}

/// Suggests stored games whose name contains the typed text.
pub async fn autocomplete_game(
    handler: &Handler,
    ctx: &Context,
    focused: &AutocompleteOption<'_>,
) -> Result<CreateAutocompleteResponse, AppError> {
    let platform = SerenityPlatform::new(ctx.clone());
    let service =
        GameCategoryService::new(&handler.db, &platform, &handler.config.games_anchor_category);

    let typed = focused.value.to_lowercase();
    let response = service
        .list_all()
        .await?
        .into_iter()
        .filter(|category| category.name.to_lowercase().contains(&typed))
        .take(MAX_AUTOCOMPLETE_CHOICES)
        .fold(CreateAutocompleteResponse::new(), |response, category| {
            response.add_string_choice(category.name, category.id.to_string())
        });

    Ok(response)
}
