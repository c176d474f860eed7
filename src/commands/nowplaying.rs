//! Implements the `nowplaying` command.

use tracing::instrument;

use crate::data::GetData;
use crate::error::UserError;
use crate::lib;
use crate::BotError;
use crate::Context;

/// Shows the current song that the player is playing
///
/// The embed goes to the player's home channel, like the track start announcements.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only, aliases("np"))]
pub async fn nowplaying(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;
    let current = player.current().await?.ok_or(UserError::NothingPlaying)?;

    player.data()?.announce(&current).await?;
    lib::acknowledge(&ctx).await?;
    Ok(())
}
