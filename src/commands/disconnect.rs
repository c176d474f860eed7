//! Implements the `disconnect` command.
//!
//! This clears the queue and disconnects the bot from the current voice channel.

use tracing::instrument;

use crate::data::GetData;
use crate::lib;
use crate::BotError;
use crate::Context;

/// Disconnect the player.
#[instrument(skip(ctx))]
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    aliases("dc", "stop", "leave", "bye")
)]
pub async fn disconnect(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;

    let cleared = player.clear_queue().await?;
    lib::call::leave(&ctx).await?;

    let message = if cleared > 0 {
        "Queue has been cleared. Bot has been successfully disconnected."
    } else {
        "Bot has been successfully disconnected."
    };
    ctx.say(message).await?;

    lib::acknowledge(&ctx).await
}
