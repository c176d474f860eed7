//! Event handling for events pushed by the audio node.

use std::future::Future;

use lavalink_rs::client::LavalinkClient;
use lavalink_rs::hook;
use lavalink_rs::model::events;

use crate::data::NodeData;
use crate::data::PlayerData;
use crate::data::TrackMetadata;
use crate::serenity;
use crate::BotError;

/// The node connected (or reconnected).
/// Without a resumed session the node forgot all players, so drop ours too.
#[hook]
pub async fn ready(client: LavalinkClient, session_id: String, event: &events::Ready) {
    tracing::info!(
        "Lavalink node connected: {session_id} | Resumed: {resumed}",
        resumed = event.resumed
    );

    if !event.resumed {
        if let Err(e) = clear_stale_players(&client).await {
            tracing::error!("Failed to clear stale players: {e}");
        }
    }
}

/// Delete every player and leave its voice call.
async fn clear_stale_players(client: &LavalinkClient) -> Result<(), BotError> {
    let node_data = client
        .data::<NodeData>()
        .map_err(|_| BotError::MissingFromSetup {
            reason: "Expected node data on lavalink client.".to_string(),
        })?;
    let manager = node_data.songbird.as_ref();

    let guilds: Vec<serenity::GuildId> = client
        .players
        .iter()
        .map(|entry| serenity::GuildId::new(entry.key().0))
        .collect();

    let failed = for_each_guild(guilds, move |guild_id| {
        drop_stale_player(client, manager, guild_id)
    })
    .await;

    if failed > 0 {
        tracing::warn!("{failed} stale players could not be cleared.");
    }
    Ok(())
}

/// Delete one player, leaving the call even when the node already forgot it.
async fn drop_stale_player(
    client: &LavalinkClient,
    manager: &songbird::Songbird,
    guild_id: serenity::GuildId,
) -> Result<(), BotError> {
    let deleted = client.delete_player(guild_id).await;

    if manager.get(guild_id).is_some() {
        manager.remove(guild_id).await?;
    }

    deleted?;
    Ok(())
}

/// Run `clear` for every guild, logging failures instead of stopping at them.
/// Returns how many guilds failed.
async fn for_each_guild<F, Fut>(guilds: Vec<serenity::GuildId>, mut clear: F) -> usize
where
    F: FnMut(serenity::GuildId) -> Fut,
    Fut: Future<Output = Result<(), BotError>>,
{
    let mut failed = 0;
    for guild_id in guilds {
        if let Err(e) = clear(guild_id).await {
            tracing::warn!("Failed to clear stale player in {guild_id}: {e}");
            failed += 1;
        }
    }
    failed
}

/// A track started, post it to the player's home channel.
#[hook]
pub async fn track_start(client: LavalinkClient, _session_id: String, event: &events::TrackStart) {
    if let Err(e) = announce_track(&client, event).await {
        tracing::error!("Failed to announce track: {e}");
    }
}

/// Send the now playing embed for the started track.
async fn announce_track(
    client: &LavalinkClient,
    event: &events::TrackStart,
) -> Result<(), BotError> {
    let Some(player) = client.get_player_context(event.guild_id) else {
        // The player was deleted before the event arrived.
        tracing::debug!("Track started without a player.");
        return Ok(());
    };

    let data = player
        .data::<PlayerData>()
        .map_err(|_| BotError::MissingFromSetup {
            reason: "Expected player data on guild player.".to_string(),
        })?;

    let meta = TrackMetadata::from(&event.track);
    tracing::info!("Now playing '{meta}'.");

    data.announce(&meta).await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::UserError;

    #[tokio::test]
    async fn one_failed_guild_does_not_stop_the_rest() {
        let guilds: Vec<_> = (1..=3).map(serenity::GuildId::new).collect();
        let mut visited = Vec::new();

        let failed = for_each_guild(guilds.clone(), |guild_id| {
            visited.push(guild_id);
            async move {
                if guild_id.get() == 2 {
                    Err(BotError::from(UserError::NoPlayer))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(failed, 1);
        assert_eq!(visited, guilds);
    }
}
