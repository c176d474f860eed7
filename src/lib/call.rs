//! Joining and leaving voice channels.
//!
//! Songbird only does the voice gateway handshake here. The connection info
//! it gets is handed to the node, which then streams audio by itself.

use std::sync::Arc;

use tracing::instrument;

use crate::data::GetData;
use crate::data::GuildPlayer;
use crate::data::PlayerData;
use crate::error::UserError;
use crate::serenity;
use crate::BotError;
use crate::Context;

/// Convenience type alias for [songbird::Songbird].
type Manager = Arc<songbird::Songbird>;

/// Get the [Manager] from [Context]
pub async fn get_manager(ctx: &Context<'_>) -> Result<Manager, BotError> {
    songbird::get(ctx.serenity_context())
        .await
        .ok_or(BotError::MissingFromSetup {
            reason: "Expecting songbird manager.".to_string(),
        })
}

/// Find the voice channel the author is in.
fn author_channel(ctx: &Context<'_>) -> Result<serenity::ChannelId, UserError> {
    let guild = ctx.guild().ok_or(UserError::NotInGuild)?;
    guild
        .voice_states
        .get(&ctx.author().id)
        .and_then(|vs| vs.channel_id)
        .ok_or(UserError::NotInVoice)
}

/// Returns the guild's player, joining the author's voice channel if there is none yet.
///
/// A new player remembers the channel it was created from as its home and
/// starts at the configured volume.
#[instrument(skip(ctx), fields(author=%ctx.author().name, guild=?ctx.guild_id(), channel=?ctx.channel_id()))]
pub async fn get_or_join(ctx: &Context<'_>) -> Result<GuildPlayer, BotError> {
    if let Some(player) = ctx.try_player()? {
        return Ok(player);
    }

    let guild_id = ctx.guild_id().ok_or(UserError::GuildOnly)?;
    let channel_id = author_channel(ctx)?;
    let manager = get_manager(ctx).await?;

    tracing::info!("Joining {channel_id} in {guild_id}.");

    let (connection_info, _call) = match manager.join_gateway(guild_id, channel_id).await {
        Ok(joined) => joined,
        Err(e) => {
            tracing::warn!("Could not join voice channel: {e}");
            Err(UserError::JoinFailed)?
        }
    };

    let player_data = PlayerData {
        home: ctx.channel_id(),
        http: ctx.serenity_context().http.clone(),
    };

    let player: GuildPlayer = ctx
        .lavalink()
        .create_player_context_with_data(guild_id, connection_info, Arc::new(player_data))
        .await?
        .into();

    player
        .set_volume(ctx.data().player_config.default_volume)
        .await?;

    Ok(player)
}

/// Delete the guild's player on the node and leave the voice channel.
#[instrument(skip(ctx), fields(guild=?ctx.guild_id()))]
pub async fn leave(ctx: &Context<'_>) -> Result<(), BotError> {
    let guild_id = ctx.guild_id().ok_or(UserError::GuildOnly)?;

    ctx.lavalink().delete_player(guild_id).await?;

    let manager = get_manager(ctx).await?;
    if manager.get(guild_id).is_some() {
        manager.remove(guild_id).await?;
    }

    tracing::info!("Left voice in {guild_id}.");
    Ok(())
}

#[cfg(test)]
mod test {
    #[test]
    fn voice_connection_info_converts_for_the_node() {
        fn converts<T: Into<lavalink_rs::model::player::ConnectionInfo>>() {}
        converts::<songbird::ConnectionInfo>();
    }
}
