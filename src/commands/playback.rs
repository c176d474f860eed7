//! Pause, resume and volume.

use tracing::instrument;

use crate::data::GetData;
use crate::error::UserError;
use crate::lib;
use crate::BotError;
use crate::Context;

/// Pause the player.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn pause(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;

    if player.get_player().await?.paused {
        Err(UserError::AlreadyPaused)?
    }

    player.set_pause(true).await?;
    lib::acknowledge(&ctx).await
}

/// Resume the player.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn resume(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;

    if !player.get_player().await?.paused {
        Err(UserError::NotPaused)?
    }

    player.set_pause(false).await?;
    lib::acknowledge(&ctx).await
}

/// Change the volume of the player.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn volume(
    ctx: Context<'_>,
    #[description = "New volume, 100 is the original loudness"] value: i64,
) -> Result<(), BotError> {
    let player = ctx.player()?;

    let volume = lib::filters::clamp_volume(value);
    tracing::debug!("Setting volume to {volume}.");
    player.set_volume(volume).await?;

    lib::acknowledge(&ctx).await
}
