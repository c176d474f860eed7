//! Implements the `skip` command.
//!
//! The bot will skip the current track and start playing the next one
//! in the queue (if there is one).

use tracing::instrument;

use crate::data::GetData;
use crate::error::UserError;
use crate::lib;
use crate::BotError;
use crate::Context;

/// Skips the current song, only ever to the next song in the queue.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn skip(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;
    let current = player.current().await?.ok_or(UserError::NothingPlaying)?;

    tracing::info!("Skipping {current}");
    player.skip_or_stop().await?;

    lib::acknowledge(&ctx).await
}
