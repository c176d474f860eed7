//! Audio filter commands.

use tracing::instrument;

use crate::data::GetData;
use crate::lib;
use crate::BotError;
use crate::Context;

/// Resets the currently applied filters on the player
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn reset(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;
    player.set_filters(lib::filters::reset()).await?;

    ctx.say("All filters have been reset.").await?;
    lib::acknowledge(&ctx).await
}

/// Set the filter to a nightcore style.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only, aliases("nc"))]
pub async fn nightcore(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;
    player.set_filters(lib::filters::nightcore()).await?;

    ctx.say("Applied nightcore filter").await?;
    lib::acknowledge(&ctx).await
}
