//! This module contains everything relating to [Data].

pub mod player;
pub mod track;

use std::collections::HashSet;
use std::sync::Arc;

use futures::TryFutureExt;
use lavalink_rs::client::LavalinkClient;
use serenity::UserId;

use crate::error::UserError;
use crate::serenity;
use crate::setup::PlayerConfig;
use crate::BotError;
use crate::Context;
pub use player::GuildPlayer;
pub use track::TrackMetadata;

/// The data kept between shards
pub struct Data {
    /// List of users to send bug notifications
    pub notify_list: HashSet<UserId>,
    /// Connection to the audio node, cheap to clone.
    pub lavalink: LavalinkClient,
    /// Settings applied to every guild player.
    pub player_config: PlayerConfig,
}

/// Data attached to every guild player on creation.
pub struct PlayerData {
    /// The text channel the player was started from.
    /// Now playing messages go here and `play` only works from here.
    pub home: serenity::ChannelId,
    /// Needed to send messages from node events.
    pub http: Arc<serenity::Http>,
}

impl PlayerData {
    /// Post the now playing embed for `track` in the home channel.
    pub async fn announce(&self, track: &TrackMetadata) -> Result<(), BotError> {
        self.home
            .send_message(&self.http, track.now_playing_message())
            .map_err(BotError::from)
            .await?;
        Ok(())
    }
}

/// Data attached to the [LavalinkClient], available in node event hooks.
pub struct NodeData {
    /// Voice manager, to leave calls the node no longer knows about.
    pub songbird: Arc<songbird::Songbird>,
}

/// Is able to get the [LavalinkClient] and guild players.
pub trait GetData {
    /// Returns the [LavalinkClient].
    fn lavalink(&self) -> &LavalinkClient;
    /// Returns the player of the current guild, if there is one.
    fn try_player(&self) -> Result<Option<GuildPlayer>, UserError>;
    /// Returns the player of the current guild. Errors if there is none.
    fn player(&self) -> Result<GuildPlayer, UserError> {
        self.try_player()?.ok_or(UserError::NoPlayer)
    }
}

impl GetData for Context<'_> {
    fn lavalink(&self) -> &LavalinkClient {
        &self.data().lavalink
    }

    fn try_player(&self) -> Result<Option<GuildPlayer>, UserError> {
        let guild_id = self.guild_id().ok_or(UserError::GuildOnly)?;
        Ok(self.lavalink().get_player_context(guild_id).map(GuildPlayer::from))
    }
}
