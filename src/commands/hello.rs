//! Implements the `test` command, a quick check that the bot is listening.

use tracing::instrument;

use crate::lib;
use crate::serenity::Mentionable;
use crate::BotError;
use crate::Context;

/// Says hello back, echoing whatever was given.
#[instrument(skip(ctx))]
#[poise::command(prefix_command, slash_command)]
pub async fn test(
    ctx: Context<'_>,
    #[description = "Anything, numbers are recognized"] query: Option<String>,
) -> Result<(), BotError> {
    let mention = ctx.author().mention().to_string();
    ctx.say(greeting(&mention, query.as_deref())).await?;

    lib::acknowledge(&ctx).await
}

/// The reply to `test`.
fn greeting(mention: &str, query: Option<&str>) -> String {
    match query {
        None => format!("Hello, there {mention}!"),
        Some(q) if !q.is_empty() && q.chars().all(|c| c.is_ascii_digit()) => {
            format!("Hello, there {mention}! Your number is: {q}.")
        }
        Some(q) => format!("Hello, there {mention}! Your query is: {q}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_without_query() {
        assert_eq!(greeting("<@1>", None), "Hello, there <@1>!");
    }

    #[test]
    fn recognizes_numbers() {
        assert_eq!(
            greeting("<@1>", Some("42")),
            "Hello, there <@1>! Your number is: 42."
        );
    }

    #[test]
    fn echoes_other_queries() {
        assert_eq!(
            greeting("<@1>", Some("4b")),
            "Hello, there <@1>! Your query is: 4b."
        );
    }
}
