//! Defines and implements custom bot functionality.

mod config;
mod framework;

use songbird::SerenityInit;

use crate::serenity;
use crate::BotError;

pub use config::Config;
pub use config::PlayerConfig;

/// Constructs a [serenity::Client] with initialized [songbird].
/// The Lavalink client is created later, once the bot knows its own user id.
pub(super) async fn client(config: Config) -> Result<serenity::Client, BotError> {
    // Get discord token from config file
    let token = config.token()?.clone();

    // Intents we wish to use, message content is needed for prefix commands.
    // See https://discord.com/developers/docs/topics/gateway#gateway-intents
    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework::framework(config))
        .register_songbird()
        .await?;

    Ok(client)
}
