//! A guild's player, wrapping the node client's [PlayerContext].

use std::collections::VecDeque;
use std::sync::Arc;

use delegate::delegate;
use lavalink_rs::error::LavalinkResult;
use lavalink_rs::model::player::Filters;
use lavalink_rs::model::player::Player;
use lavalink_rs::model::track::TrackData;
use lavalink_rs::player_context::PlayerContext;
use lavalink_rs::player_context::QueueRef;
use lavalink_rs::player_context::TrackInQueue;

use super::track::requester_data;
use super::PlayerData;
use super::TrackMetadata;
use crate::error::UserError;
use crate::serenity;
use crate::BotError;

/// The player of one guild.
/// Internally the node client uses channels, so it's cheap to clone.
#[derive(Clone)]
pub struct GuildPlayer {
    #[allow(clippy::missing_docs_in_private_items)]
    inner: PlayerContext,
}

impl From<PlayerContext> for GuildPlayer {
    fn from(inner: PlayerContext) -> Self {
        GuildPlayer { inner }
    }
}

impl GuildPlayer {
    delegate! {
        to self.inner {
            /// Current state as the node sees it.
            pub async fn get_player(&self) -> LavalinkResult<Player>;
            /// Pause or resume.
            pub async fn set_pause(&self, pause: bool) -> LavalinkResult<Player>;
            /// Set the volume, 100 is unchanged.
            pub async fn set_volume(&self, volume: u16) -> LavalinkResult<Player>;
            /// Replace all filters.
            pub async fn set_filters(&self, filters: Filters) -> LavalinkResult<Player>;
            /// Stop the current track without touching the queue.
            pub async fn stop_now(&self) -> LavalinkResult<Player>;
            /// Play the next track in the queue.
            pub fn skip(&self) -> LavalinkResult<()>;
            /// Upcoming tracks, the current track isn't part of it.
            pub fn get_queue(&self) -> QueueRef;
        }
    }

    /// Data set when the player was created.
    pub fn data(&self) -> Result<Arc<PlayerData>, BotError> {
        self.inner
            .data::<PlayerData>()
            .map_err(|_| BotError::MissingFromSetup {
                reason: "Expected player data on guild player.".to_string(),
            })
    }

    /// Errors unless `channel` is where this player was started.
    pub fn check_home(&self, channel: serenity::ChannelId) -> Result<(), BotError> {
        let home = self.data()?.home;
        if home == channel {
            Ok(())
        } else {
            Err(UserError::WrongChannel { home }.into())
        }
    }

    /// The track currently playing.
    pub async fn current(&self) -> Result<Option<TrackMetadata>, BotError> {
        let state = self.get_player().await?;
        Ok(state.track.as_ref().map(TrackMetadata::from))
    }

    /// A copy of the upcoming tracks.
    pub async fn queue(&self) -> Result<VecDeque<TrackInQueue>, BotError> {
        Ok(self.get_queue().get_queue().await?)
    }

    /// Metadata of the upcoming tracks.
    pub async fn queue_metadata(&self) -> Result<Vec<TrackMetadata>, BotError> {
        let queue = self.queue().await?;
        Ok(queue
            .iter()
            .map(|in_queue| TrackMetadata::from(&in_queue.track))
            .collect())
    }

    /// Overwrite the upcoming tracks.
    pub fn replace_queue(&self, queue: VecDeque<TrackInQueue>) -> Result<(), BotError> {
        Ok(self.get_queue().replace(queue)?)
    }

    /// Remove all upcoming tracks. Returns how many there were.
    pub async fn clear_queue(&self) -> Result<usize, BotError> {
        let queue = self.get_queue();
        let count = queue.get_count().await?;
        if count > 0 {
            queue.clear()?;
        }
        Ok(count)
    }

    /// Add tracks to the back of the queue, tagged with who asked for them.
    pub fn enqueue(
        &self,
        tracks: impl IntoIterator<Item = TrackData>,
        requester: serenity::UserId,
    ) -> Result<usize, BotError> {
        let tracks: VecDeque<TrackInQueue> = tracks
            .into_iter()
            .map(|mut track| {
                track.user_data = Some(requester_data(requester));
                TrackInQueue::from(track)
            })
            .collect();
        let count = tracks.len();

        tracing::debug!("Adding {count} tracks to the queue.");
        self.get_queue().append(tracks)?;
        Ok(count)
    }

    /// Start playing from the queue if nothing is playing.
    /// Once started, the node client keeps playing through the queue by itself.
    pub async fn start_if_idle(&self) -> Result<(), BotError> {
        let state = self.get_player().await?;
        if state.track.is_some() {
            return Ok(());
        }

        if self.get_queue().get_track(0).await?.is_some() {
            tracing::debug!("Nothing playing, starting the queue.");
            self.skip()?;
        }
        Ok(())
    }

    /// Skip the current track, stopping if nothing comes next.
    pub async fn skip_or_stop(&self) -> Result<(), BotError> {
        if self.get_queue().get_count().await? > 0 {
            self.skip()?;
        } else {
            self.stop_now().await?;
        }
        Ok(())
    }
}
