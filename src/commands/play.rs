//! Implements the `play` command.
//!
//! Links are queued straight away (every track of a playlist link). Anything
//! else is searched and the author picks one of the top results by replying
//! with its number.

use lavalink_rs::model::track::TrackData;
use tracing::instrument;

use crate::data::GetData;
use crate::data::TrackMetadata;
use crate::error::UserError;
use crate::lib;
use crate::lib::search::Loaded;
use crate::lib::search::Query;
use crate::serenity;
use crate::BotError;
use crate::Context;

/// Plays from the given link or searches youtube for the query.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn play(
    ctx: Context<'_>,
    #[description = "Youtube query or url"]
    #[rest]
    query: String,
) -> Result<(), BotError> {
    let guild_id = ctx.guild_id().ok_or(UserError::GuildOnly)?;

    // Join the call if not in there
    let player = lib::call::get_or_join(&ctx).await?;
    player.check_home(ctx.channel_id())?;

    let requester = ctx.author().id;
    let query = Query::parse(&query);

    match lib::search::load(ctx.lavalink(), guild_id, &query).await? {
        Loaded::Empty => Err(UserError::NoResults { user: requester })?,
        Loaded::Playlist { name, tracks } => {
            let added = player.enqueue(tracks, requester)?;
            ctx.say(format!(
                "Added the playlist **`{name}`** ({added} songs) to the queue."
            ))
            .await?;
        }
        Loaded::Track(track) => {
            let meta = TrackMetadata::from(&track);
            player.enqueue([track], requester)?;
            ctx.say(format!("Added **`{meta}`** to the queue.")).await?;
        }
        Loaded::Search(results) => {
            let track = pick_result(&ctx, results).await?;
            let meta = TrackMetadata::from(&track);
            player.enqueue([track], requester)?;
            ctx.say(format!("Added **`{meta}`** to the queue.")).await?;
        }
    }

    player.start_if_idle().await?;
    Ok(())
}

/// Show the top search results and wait for the author to pick one.
async fn pick_result(
    ctx: &Context<'_>,
    mut results: Vec<TrackData>,
) -> Result<TrackData, BotError> {
    let config = &ctx.data().player_config;
    let limit = config.search_results.max(1);
    results.truncate(limit);

    let metas: Vec<TrackMetadata> = results.iter().map(TrackMetadata::from).collect();
    ctx.say(lib::search::search_menu(&metas, limit)).await?;

    let reply = serenity::MessageCollector::new(ctx.serenity_context())
        .author_id(ctx.author().id)
        .channel_id(ctx.channel_id())
        .timeout(config.choice_timeout())
        .next()
        .await
        .ok_or(UserError::ChoiceTimeout)?;

    let index = lib::search::parse_choice(&reply.content, results.len())?;
    tracing::debug!("Picked search result {index}.");
    Ok(results.swap_remove(index))
}
