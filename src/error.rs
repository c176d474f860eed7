//! Error types.
//!
//! [UserError]s are caused by the person using a command and are shown to them.
//! Everything else in [BotError] is unexpected and gets logged as an error.

use std::time::Duration;

use thiserror::Error;

use crate::serenity;

/// Top level error for the bot.
#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    UserError(#[from] UserError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error("Discord error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Lavalink error: {0}")]
    Lavalink(#[from] lavalink_rs::error::LavalinkError),

    #[error("Failed to join voice: {0}")]
    Join(#[from] songbird::error::JoinError),

    #[error("The node failed to load '{query}': {reason}")]
    LoadFailed { query: String, reason: String },

    #[error("Command check failed. {}", reason.as_deref().unwrap_or("No reason given."))]
    CheckFailed { reason: Option<String> },

    #[error("Command panicked. {}", payload.as_deref().unwrap_or("No payload."))]
    Panic { payload: Option<String> },

    #[error("Command structure mismatch: {description}")]
    CommandStructureMismatch { description: String },

    #[error("Missing from setup: {reason}")]
    MissingFromSetup { reason: String },
}

/// Errors caused by users, the message is sent back to them as is.
#[derive(Error, Debug)]
pub enum UserError {
    #[error("This command only works in a server.")]
    GuildOnly,

    #[error("This command only works in DMs.")]
    DmOnly,

    #[error("This command only works in NSFW channels.")]
    NsfwOnly,

    #[error("Only the bot owner can use this command.")]
    NotOwner,

    #[error("Could not find a server for this command.")]
    NotInGuild,

    #[error("Please join a voice channel first before using this command.")]
    NotInVoice,

    #[error("I was unable to join this voice channel. Please try again.")]
    JoinFailed,

    #[error("I am not in a voice channel.")]
    NoPlayer,

    #[error("You can only play songs in <#{home}>, as the player has already started there.")]
    WrongChannel { home: serenity::ChannelId },

    #[error("<@{user}> - Could not find any tracks for that song. Please try again.")]
    NoResults { user: serenity::UserId },

    #[error("Invalid choice, enter number from 1 to {max} only")]
    InvalidChoice { max: usize },

    #[error("You took too long to respond.")]
    ChoiceTimeout,

    #[error("The queue is empty.")]
    EmptyQueue,

    #[error("Nothing is playing right now.")]
    NothingPlaying,

    #[error("Player is already paused.")]
    AlreadyPaused,

    #[error("Player is not currently paused.")]
    NotPaused,

    #[error("Track index must be more than 0")]
    BadIndex,

    #[error("There is no track at position {position}, the queue has {len} tracks.")]
    NoTrackAt { position: usize, len: usize },

    #[error("Could not understand `{}`.", input.as_deref().unwrap_or_default())]
    BadArgs { input: Option<String> },

    #[error("Slow down! Try again in {}s.", remaining_cooldown.as_secs())]
    OnCooldown { remaining_cooldown: Duration },

    #[error("I need these permissions first: {missing_permissions}")]
    MissingBotPermissions {
        missing_permissions: serenity::Permissions,
    },

    #[error("You are missing permissions for this command.")]
    MissingUserPermissions {
        missing_permissions: Option<serenity::Permissions>,
    },

    #[error("Pick one of these subcommands: {subcmds}")]
    MissingSubcommand { subcmds: String },
}

/// Errors when reading the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found. {action_msg}")]
    MissingConfig { action_msg: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Could not access config file: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn user_errors_read_like_replies() {
        let home = serenity::ChannelId::new(42);
        assert_eq!(
            UserError::WrongChannel { home }.to_string(),
            "You can only play songs in <#42>, as the player has already started there."
        );
        assert_eq!(
            UserError::InvalidChoice { max: 5 }.to_string(),
            "Invalid choice, enter number from 1 to 5 only"
        );
        assert_eq!(
            UserError::NoResults {
                user: serenity::UserId::new(7)
            }
            .to_string(),
            "<@7> - Could not find any tracks for that song. Please try again."
        );
    }

    #[test]
    fn user_error_passes_through_transparently() {
        let err: BotError = UserError::EmptyQueue.into();
        assert_eq!(err.to_string(), "The queue is empty.");
    }
}
