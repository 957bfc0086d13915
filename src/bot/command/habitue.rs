//! Habitué commands: granting the status and choosing a colour.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId,
    Permissions, ResolvedOption, ResolvedValue,
};

use crate::{
    bot::{
        command::{missing_option, option},
        handler::Handler,
    },
    error::AppError,
    model::{
        color::{Rgb, PRESETS},
        member::GuildMember,
    },
    platform::SerenityPlatform,
    service::habitue::HabitueService,
};

pub fn add_habitue() -> CreateCommand {
    CreateCommand::new("add_habitue")
        .description("Grant the habitue role and a color role to a member")
        .default_member_permissions(Permissions::MANAGE_ROLES)
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "member", "Member to promote")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "color",
            "Initial color as #rrggbb",
        ))
}

pub fn remove_habitue() -> CreateCommand {
    CreateCommand::new("remove_habitue")
        .description("Revoke the habitue role and delete the color role of a member")
        .default_member_permissions(Permissions::MANAGE_ROLES)
        .add_option(
            CreateCommandOption::new(CommandOptionType::User, "member", "Member to demote")
                .required(true),
        )
}

pub fn set_color() -> CreateCommand {
    let color = PRESETS.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "color", "New color").required(true),
        |choices, (name, _)| choices.add_string_choice(*name, *name),
    );

    CreateCommand::new("set_color")
        .description("Choose the color of your name")
        .add_option(color)
}

pub fn set_custom_color() -> CreateCommand {
    let component = |name: &str, description: &str| {
        CreateCommandOption::new(CommandOptionType::Integer, name, description)
            .required(true)
            .min_int_value(0)
            .max_int_value(255)
    };

    CreateCommand::new("set_custom_color")
        .description("Choose the color of your name from RGB values")
        .add_option(component("red", "Red component (0-255)"))
        .add_option(component("green", "Green component (0-255)"))
        .add_option(component("blue", "Blue component (0-255)"))
}

pub async fn run_add_habitue(
    handler: &Handler,
    ctx: &Context,
    guild_id: GuildId,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let member = member_option(ctx, guild_id, options).await?;
    let color = match option(options, "color") {
        Some(ResolvedValue::String(hex)) => Some(Rgb::from_hex(hex)?),
        _ => None,
    };

    let platform = SerenityPlatform::new(ctx.clone());
    let habitue = service(handler, &platform)
        .add_habitue(guild_id.get(), &member, color)
        .await?;

    tracing::info!("{} is now an habitue", member.display_name);

    Ok(format!(
        "{} is now an habitue with the color {}.",
        member.display_name, habitue.color
    ))
}

pub async fn run_remove_habitue(
    handler: &Handler,
    ctx: &Context,
    guild_id: GuildId,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let member = member_option(ctx, guild_id, options).await?;

    let platform = SerenityPlatform::new(ctx.clone());
    service(handler, &platform)
        .remove_habitue(guild_id.get(), &member)
        .await?;

    tracing::info!("{} is no longer an habitue", member.display_name);

    Ok(format!("{} is no longer an habitue.", member.display_name))
}

pub async fn run_set_color(
    handler: &Handler,
    ctx: &Context,
    guild_id: GuildId,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let Some(ResolvedValue::String(name)) = option(options, "color") else {
        return Err(missing_option("color"));
    };
    let color = Rgb::preset(name)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown color {}", name)))?;

    apply_color(handler, ctx, guild_id, command, color).await
}

pub async fn run_set_custom_color(
    handler: &Handler,
    ctx: &Context,
    guild_id: GuildId,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) -> Result<String, AppError> {
    let component = |name: &str| match option(options, name) {
        Some(ResolvedValue::Integer(value)) => u8::try_from(*value)
            .map_err(|_| AppError::BadRequest(format!("{} must be between 0 and 255", name))),
        _ => Err(missing_option(name)),
    };

    let color = Rgb::new(component("red")?, component("green")?, component("blue")?);

    apply_color(handler, ctx, guild_id, command, color).await
}

async fn apply_color(
    handler: &Handler,
    ctx: &Context,
    guild_id: GuildId,
    command: &CommandInteraction,
    color: Rgb,
) -> Result<String, AppError> {
    let member = match command.member.as_deref() {
        Some(member) => GuildMember::from_member(member),
        None => GuildMember::from_member(&guild_id.member(&ctx.http, command.user.id).await?),
    };

    let platform = SerenityPlatform::new(ctx.clone());
    let hex = service(handler, &platform)
        .set_color(guild_id.get(), &member, color)
        .await?;

    tracing::debug!("{} changed their color to {}", member.display_name, hex);

    Ok(format!("Your color is now {}.", hex))
}

fn service<'a>(
    handler: &'a Handler,
    platform: &'a SerenityPlatform,
) -> HabitueService<'a, SerenityPlatform> {
    HabitueService::new(
        &handler.db,
        platform,
        &handler.habitue_in_flight,
        handler.config.habitue_role_id,
        &handler.config.color_anchor_role,
    )
}

/// Resolves the `member` option to a full guild member.
///
/// The interaction only carries a partial member, so the roles are fetched again.
async fn member_option(
    ctx: &Context,
    guild_id: GuildId,
    options: &[ResolvedOption<'_>],
) -> Result<GuildMember, AppError> {
    let Some(ResolvedValue::User(user, _)) = option(options, "member") else {
        return Err(missing_option("member"));
    };

    let member = guild_id.member(&ctx.http, user.id).await?;

    Ok(GuildMember::from_member(&member))
}
