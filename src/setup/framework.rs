//! Setup for [poise::Framework]

use std::sync::Arc;

use lavalink_rs::client::LavalinkClient;
use lavalink_rs::model::events;
use lavalink_rs::node::NodeBuilder;
use lavalink_rs::prelude::NodeDistributionStrategy;

use crate::commands;
use crate::data::NodeData;
use crate::lib;
use crate::serenity;
use crate::Config;
use crate::Data;
use crate::BotError;

/// Convenient type alias, only this [poise::Framework] type is used.
type Framework = poise::Framework<Data, BotError>;

/// Construct a [poise::Framework]
pub(super) fn framework(config: Config) -> Framework {
    poise::Framework::builder()
        .options(framework_options(&config))
        .setup(|ctx, rdy, fw| framework_setup(ctx, rdy, fw, config))
        .build()
}

/// Configure options for the [Framework]
fn framework_options(config: &Config) -> poise::FrameworkOptions<Data, BotError> {
    poise::FrameworkOptions {
        // Add commands to the framework
        commands: commands::list(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(config.prefix().to_string()),
            ..Default::default()
        },
        // Handle framework errors
        on_error: |e| crate::log::handle_framework_error(e),
        // Log when commands start
        pre_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().name;
                let user = &ctx.author().name;
                tracing::info!("Started '{cmd_name}' command from {user}.")
            })
        },
        // Log when finishing commands
        post_command: |ctx| {
            Box::pin(async move {
                let cmd_name = &ctx.command().name;
                let user = &ctx.author().name;
                tracing::info!("Finished '{cmd_name}' command from {user}.")
            })
        },
        ..Default::default()
    }
}

/// Construct future that runs on startup
fn framework_setup<'a>(
    ctx: &'a serenity::Context,
    rdy: &'a serenity::Ready,
    fw: &'a Framework,
    config: Config,
) -> poise::BoxFuture<'a, Result<Data, BotError>> {
    Box::pin(async move {
        // Register the commands
        let app_commands = poise::builtins::create_application_commands(&fw.options().commands);

        serenity::Command::set_global_commands(&ctx, app_commands.clone()).await?;
        if let Some(dev_guild) = config.dev_guild() {
            // This is faster than global registers, useful for development.
            tracing::info!("Registering commands on dev guild.");
            dev_guild.set_commands(ctx, app_commands).await?;
        }

        let bot_name = &rdy.user.name;
        let bot_id = rdy.user.id;
        tracing::info!("Logged in: {bot_name} | {bot_id}");

        let songbird = songbird::get(ctx).await.ok_or(BotError::MissingFromSetup {
            reason: "Expecting songbird manager.".to_string(),
        })?;
        let lavalink = connect_node(&config, bot_id, NodeData { songbird }).await;

        let data = Data {
            notify_list: config.notify_list(fw),
            lavalink,
            player_config: config.player().clone(),
        };

        Ok(data)
    })
}

/// Build the [LavalinkClient] and connect to the configured node.
async fn connect_node(
    config: &Config,
    bot_id: serenity::UserId,
    node_data: NodeData,
) -> LavalinkClient {
    let node_config = config.lavalink();

    let client_events = events::Events {
        ready: Some(lib::events::ready),
        track_start: Some(lib::events::track_start),
        ..Default::default()
    };

    let node = NodeBuilder {
        hostname: node_config.hostname.clone(),
        is_ssl: node_config.is_ssl,
        events: events::Events::default(),
        password: node_config.password.clone(),
        user_id: bot_id.into(),
        session_id: None,
    };

    tracing::info!("Connecting to Lavalink node at {}.", node_config.hostname);

    LavalinkClient::new_with_data(
        client_events,
        vec![node],
        NodeDistributionStrategy::round_robin(),
        Arc::new(node_data),
    )
    .await
}
