//! Logging functionality and error reporting.
//! The logging library of choice is [tracing].

use itertools::Itertools;
use poise::BoxFuture;
use poise::CreateReply;
use poise::FrameworkError;
use serenity::CreateMessage;
use tracing::debug;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::error::UserError;
use crate::serenity;
use crate::BotError;
use crate::Config;
use crate::Context;
use crate::Data;

/// The name of this crate, used to set filter target.
const THIS_CRATE: &str = env!("CARGO_CRATE_NAME");

/// Which traces are tracked.
/// By default, all INFO traces and above are shown.
fn targets(debug: bool) -> Targets {
    let targets = Targets::new()
        .with_default(LevelFilter::INFO)
        // The node client is chatty about every websocket message.
        .with_target("lavalink_rs", LevelFilter::WARN);

    if debug {
        targets.with_target(THIS_CRATE, LevelFilter::DEBUG)
    } else {
        targets
    }
}

/// Setup format layers, tracing subscribers, and installs tracing.
pub(super) fn install_tracing(config: &Config) -> Option<WorkerGuard> {
    // Uses local time.
    let timer = fmt::time::ChronoLocal::rfc_3339();
    let debug = config.console_debug();
    let target = targets(debug);

    // Compose the layer that prints traces to stdout.
    // File and line numbers only show in debug mode.
    let console_layer = fmt::layer()
        .with_ansi(true)
        .with_file(debug)
        .with_level(true)
        .with_line_number(debug)
        .with_target(true)
        .with_timer(timer.clone())
        .pretty()
        .with_filter(target.clone());

    // Compose the layer that writes logs and get a guard for the writer.
    let (log_layer, guard) = if config.logs_enabled() {
        // Put file logs in `log_dir` directory as "{THIS_CRATE}.log.{TIMESTAMP}" on an hourly basis.
        let prefix_format = format!("{THIS_CRATE}.log");
        let appender = tracing_appender::rolling::hourly(config.log_dir(), prefix_format);

        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer()
            .with_ansi(false)
            .with_file(debug)
            .with_level(true)
            .with_line_number(debug)
            .with_target(true)
            .with_timer(timer)
            .with_writer(writer)
            .compact()
            .with_filter(target);

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_layer)
        .init();

    guard
}

/// Defines various behaviors for how to handle errors.
/// [UserError]s are replied to and logged as debug.
/// Unexpected errors are logged as errors and trigger a [notify_bug].
pub fn handle_framework_error(err: FrameworkError<'_, Data, BotError>) -> BoxFuture<'_, ()> {
    let handler = async move {
        match err {
            // ---
            // Errors that should be invisible to users.
            // ---
            FrameworkError::Setup { error, .. } => error!("Error during startup: {error}"),
            FrameworkError::EventHandler { error, event, .. } => {
                error!("Error while handling event. Event: {event:#?} Error:{error}")
            }

            // ---
            // Errors users see but that aren't bugs.
            // ---
            FrameworkError::Command {
                error: BotError::UserError(user_error),
                ctx,
                ..
            } => user_response(&ctx, user_error).await,
            FrameworkError::SubcommandRequired { ctx } => {
                let subcmds = ctx
                    .command()
                    .subcommands
                    .iter()
                    .map(|s| s.name.as_str())
                    .join(", ");
                user_response(&ctx, UserError::MissingSubcommand { subcmds }).await
            }
            FrameworkError::ArgumentParse {
                error, input, ctx, ..
            } => {
                let user_error = UserError::BadArgs { input };

                Response::builder()
                    .ctx(&ctx)
                    .reply(user_error.to_string())
                    .source(user_error)
                    .add_info(error.to_string())
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CooldownHit {
                remaining_cooldown,
                ctx,
                ..
            } => user_response(&ctx, UserError::OnCooldown { remaining_cooldown }).await,
            FrameworkError::MissingBotPermissions {
                missing_permissions,
                ctx,
                ..
            } => {
                let user_error = UserError::MissingBotPermissions {
                    missing_permissions,
                };
                user_response(&ctx, user_error).await
            }
            FrameworkError::MissingUserPermissions {
                missing_permissions,
                ctx,
                ..
            } => {
                let user_error = UserError::MissingUserPermissions {
                    missing_permissions,
                };
                user_response(&ctx, user_error).await
            }
            FrameworkError::NotAnOwner { ctx, .. } => user_response(&ctx, UserError::NotOwner).await,
            FrameworkError::GuildOnly { ctx, .. } => user_response(&ctx, UserError::GuildOnly).await,
            FrameworkError::DmOnly { ctx, .. } => user_response(&ctx, UserError::DmOnly).await,
            FrameworkError::NsfwOnly { ctx, .. } => user_response(&ctx, UserError::NsfwOnly).await,
            FrameworkError::CommandCheckFailed { error, ctx, .. } => {
                let error = BotError::CheckFailed {
                    reason: error.map(|e| e.to_string()),
                };

                Response::builder()
                    .ctx(&ctx)
                    .reply(error.to_string())
                    .source(error)
                    .build()
                    .send()
                    .await;
            }

            // ---
            // Errors users see that are logged as error!
            // These are unexpected and should be fixed, so they also cause a bug notification.
            // ---
            FrameworkError::Command { error, ctx, .. } => {
                Response::builder()
                    .ctx(&ctx)
                    .reply("Something went wrong... A bug report has been sent.")
                    .source(error)
                    .notify(true)
                    .is_error(true)
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CommandPanic { payload, ctx, .. } => {
                Response::builder()
                    .ctx(&ctx)
                    .reply("Something went horribly wrong... A bug report has been sent.")
                    .source(BotError::Panic { payload })
                    .notify(true)
                    .is_error(true)
                    .build()
                    .send()
                    .await;
            }
            FrameworkError::CommandStructureMismatch {
                description, ctx, ..
            } => {
                let error = BotError::CommandStructureMismatch {
                    description: description.to_string(),
                };

                Response::builder()
                .ctx(&ctx.into())
                .reply("Command structure mismatch. Please wait until discord catches up to a bot update.")
                .source(error)
                .notify(true)
                .is_error(true)
                .build()
                .send()
                .await;
            }

            // ---
            // Nothing to answer.
            // ---
            FrameworkError::UnknownCommand {
                msg_content, ..
            } => {
                debug!("Ignoring unknown command: {msg_content}")
            }
            FrameworkError::UnknownInteraction { interaction, .. } => {
                let name = &interaction.data.name;
                error!("Received unknown interaction: {name}")
            }
            FrameworkError::DynamicPrefix { error, msg, .. } => {
                error!("Dynamic prefix failed on '{}': {error}", msg.content)
            }
            _ => error!("Unhandled framework error."),
        }
    };

    Box::pin(handler)
}

/// Reply with a [UserError] and log it as debug.
async fn user_response(ctx: &Context<'_>, user_error: UserError) {
    Response::builder()
        .ctx(ctx)
        .reply(user_error.to_string())
        .source(user_error)
        .build()
        .send()
        .await;
}

/// Sends an ephemeral reply to the [Context] author.
/// Prefix commands can't be ephemeral, those get a normal reply.
async fn ephemeral_reply(ctx: &Context<'_>, content: impl Into<String>) {
    let reply = CreateReply::default()
        .ephemeral(true)
        .reply(true)
        .content(content);
    if let Err(e) = ctx.send(reply).await {
        error!("Failed to send ephemeral reply. {e}")
    };
}

/// Sends a notification (via private message) to users in the notify list.
/// If message fails, only log and don't retry.
async fn notify_bug(ctx: &Context<'_>, content: impl Into<String>) {
    let message = CreateMessage::new().content(content);

    let notify_list = &ctx.data().notify_list;
    for user in notify_list {
        if let Err(e) = user.direct_message(ctx, message.clone()).await {
            error!("Failed to send bug notification. {e}");
        }
    }
}

/// Helper function to create debug information from [Context]
fn debug_info(ctx: &Context) -> String {
    let user = &ctx.author().name;
    let cmd = &ctx.command().name;
    let user_input = ctx.invocation_string();
    format!("{user} tried to use {cmd} with {user_input}.")
}

/// Structured response to errors.
/// Always logs as at least [debug level](tracing::debug), but is upgraded to
/// [error level](tracing::error) if `is_error` is set.
/// Additionally, notify messages are accompanied by [debug info](debug_info).
#[derive(bon::Builder)]
#[builder(on(String, into))]
struct Response<'a> {
    /// The context of the response
    ctx: &'a Context<'a>,
    /// The reason for this reply, usually the error causing the response.
    #[builder(into)]
    source: BotError,
    /// Optional ephemeral reply to user.
    reply: Option<String>,
    /// Additional information to log
    add_info: Option<String>,
    /// Set to `true` to log as error.
    #[builder(default = false)]
    is_error: bool,
    /// Set to `true` to send notifications of the error.
    /// Does nothing if `is_error` is false.
    #[builder(default = false)]
    notify: bool,
}

impl Response<'_> {
    /// Execute the response
    async fn send(&self) {
        let ctx = self.ctx;

        let log_message = match &self.add_info {
            Some(info) => format!("{} | {info}", self.source),
            None => self.source.to_string(),
        };

        if self.is_error {
            error!("{log_message}");
            if self.notify {
                let content = format!("Debug Info: {}\n{log_message}", debug_info(ctx));
                notify_bug(ctx, content).await;
            }
        } else {
            debug!("{log_message}");
        }

        if let Some(ref reply) = self.reply {
            ephemeral_reply(ctx, reply).await;
        }
    }
}
