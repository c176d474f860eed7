//! Commands that look at or rearrange the queue.

use tracing::instrument;

use crate::data::track::queue_pages;
use crate::data::GetData;
use crate::error::UserError;
use crate::lib;
use crate::BotError;
use crate::Context;

/// Views the queue to see what songs are queued up
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only, aliases("q"))]
pub async fn queue(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;
    let tracks = player.queue_metadata().await?;

    if tracks.is_empty() {
        ctx.say("The queue is currently empty").await?;
        return Ok(());
    }

    let pages = queue_pages(&tracks, ctx.data().player_config.queue_page_size);
    let pages: Vec<&str> = pages.iter().map(String::as_str).collect();
    poise::builtins::paginate(ctx, &pages).await?;
    Ok(())
}

/// Moves a song in the queue to the top, e.g. `top 3` plays the third song next
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn top(
    ctx: Context<'_>,
    #[description = "Position in the queue, starting at 1"] index: Option<i64>,
) -> Result<(), BotError> {
    let position = lib::queue::position(index)?;
    let player = ctx.player()?;
    let mut queue = player.queue().await?;

    lib::queue::move_to_front(&mut queue, position)?;
    let moved = queue
        .front()
        .map(|in_queue| crate::data::TrackMetadata::from(&in_queue.track))
        .ok_or(UserError::EmptyQueue)?;
    player.replace_queue(queue)?;

    ctx.say(format!(
        "Moved ***[{title}]({uri})*** to the top of the queue.",
        title = moved.title,
        uri = moved.uri.unwrap_or_default()
    ))
    .await?;
    Ok(())
}

/// Shuffles the queue to a randomized order
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn shuffle(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;
    let mut queue = player.queue().await?;

    lib::queue::shuffle(&mut queue)?;
    player.replace_queue(queue)?;

    ctx.say("The queue has been shuffled.").await?;
    Ok(())
}

/// Clear the queue of any tracks that was queued up
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn clear(ctx: Context<'_>) -> Result<(), BotError> {
    let player = ctx.player()?;

    if player.clear_queue().await? == 0 {
        Err(UserError::EmptyQueue)?
    }

    ctx.say("The queue has been cleared.").await?;
    Ok(())
}
