//! Bot commands.
//!
//! Every command works both with the configured prefix (e.g. `d!play`) and as a slash command.

mod disconnect;
mod filters;
mod hello;
mod nowplaying;
mod play;
mod playback;
mod queue;
mod skip;

use crate::{BotError, Data};

/// Convenient type alias for [poise::Command].
pub type Command = poise::Command<Data, BotError>;

/// Lists all the implemented commands
pub fn list() -> Vec<Command> {
    vec![
        play::play(),
        nowplaying::nowplaying(),
        queue::queue(),
        queue::top(),
        queue::shuffle(),
        queue::clear(),
        skip::skip(),
        playback::pause(),
        playback::resume(),
        playback::volume(),
        disconnect::disconnect(),
        filters::reset(),
        filters::nightcore(),
        hello::test(),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_and_aliases_are_unique() {
        let mut seen = HashSet::new();
        for command in list() {
            assert!(seen.insert(command.name.clone()), "{}", command.name);
            for alias in &command.aliases {
                assert!(seen.insert(alias.clone()), "{alias}");
            }
        }
    }

    #[test]
    fn aliases_are_registered() {
        let commands = list();
        let aliases_of = |name: &str| {
            commands
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.aliases.clone())
                .unwrap_or_default()
        };

        assert_eq!(aliases_of("nowplaying"), vec!["np"]);
        assert_eq!(aliases_of("queue"), vec!["q"]);
        assert_eq!(aliases_of("nightcore"), vec!["nc"]);
        assert_eq!(aliases_of("disconnect"), vec!["dc", "stop", "leave", "bye"]);
    }
}
