//! Misc

pub mod call;
pub mod events;
pub mod filters;
pub mod queue;
pub mod search;

use crate::Context;
use crate::BotError;

/// Helper function to format a duration given in milliseconds.
/// Gives `m:ss`, or `h:mm:ss` for an hour or longer.
pub fn format_millis(millis: u64) -> String {
    let total_secs = millis / 1000;
    let total_mins = total_secs / 60;

    let hours = total_mins / 60;
    let mins = total_mins % 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

/// Acknowledge a command.
/// Prefix commands get a reaction on the invoking message, slash commands a short reply.
pub async fn acknowledge(ctx: &Context<'_>) -> Result<(), BotError> {
    match ctx {
        poise::Context::Prefix(prefix) => {
            prefix.msg.react(ctx.serenity_context(), '\u{2705}').await?;
        }
        poise::Context::Application(_) => {
            ctx.say("\u{2705}").await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_millis(0), "0:00");
        assert_eq!(format_millis(999), "0:00");
        assert_eq!(format_millis(65_000), "1:05");
        assert_eq!(format_millis(3_599_000), "59:59");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_millis(3_600_000), "1:00:00");
        assert_eq!(format_millis(3_725_000), "1:02:05");
    }
}
