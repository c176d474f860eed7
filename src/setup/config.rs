//! Configuration for running this bot.

use std::collections::HashSet;
use std::time::Duration;

use poise::Framework;
use serde::Deserialize;
use serde::Serialize;
use serenity::GuildId;
use serenity::UserId;

use crate::error::ConfigError;
use crate::serenity;

/// The path to the config file
const CONFIG_PATH: &str = "config.toml";

/// Settings read from [CONFIG_PATH] that modify bot behavior.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Token needed to use a bot account.
    discord_token: String,

    /// Prefix for text commands.
    prefix: String,

    /// See [LavalinkConfig]
    lavalink: LavalinkConfig,

    /// See [PlayerConfig]
    player: PlayerConfig,

    /// See [LoggingConfig]
    logging: LoggingConfig,

    /// Useful developer specific configs.
    dev_utils: DevConfig,
}

impl Config {
    /// Tries to read [CONFIG_PATH] to extract a [Config].
    /// If a file doesn't exists, create the default config file and returns error.
    /// If a file exists but is empty, re-write the default values and return error.
    /// If a file exists but is incomplete, show error and don't change files.
    /// If a file exists and is complete, read file to create a config.
    /// If file existance is indeterminent (e.g. missing permissions), return error.
    pub fn read() -> Result<Config, ConfigError> {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(content) => {
                // Write default values to file if it's empty.
                if content.trim().is_empty() {
                    write_file(Config::default())?;
                    Err(ConfigError::InvalidConfig {
                        reason: format!("Empty config file! Rewriting {CONFIG_PATH} ..."),
                    })
                } else {
                    Config::parse(&content)
                }
            }
            Err(file_error) => match file_error.kind() {
                std::io::ErrorKind::NotFound => {
                    let action = format!("Creating {CONFIG_PATH}, fill in your token.");
                    write_file(Config::default())?;
                    Err(ConfigError::MissingConfig { action_msg: action })
                }
                _ => Err(ConfigError::IoError(file_error)),
            },
        }
    }

    /// Parse a config from toml.
    /// On failure the error names the path of the offending key.
    fn parse(content: &str) -> Result<Config, ConfigError> {
        let to_toml = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(to_toml).map_err(|error| ConfigError::InvalidConfig {
            reason: error.to_string(),
        })
    }

    /// Basic sanity check for if a token was given.
    pub fn token(&self) -> Result<&String, ConfigError> {
        let default_token = Config::default().discord_token;
        let given_token = &self.discord_token;

        let is_empty = given_token.trim().is_empty();
        let contains_default = given_token.contains(&default_token);

        if !is_empty && !contains_default {
            Ok(&self.discord_token)
        } else {
            Err(ConfigError::InvalidConfig {
                reason: "Missing discord token".to_string(),
            })
        }
    }

    /// Prefix for text commands.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Settings for the audio node connection.
    pub fn lavalink(&self) -> &LavalinkConfig {
        &self.lavalink
    }

    /// Settings applied to every guild player.
    pub fn player(&self) -> &PlayerConfig {
        &self.player
    }

    /// Construct a bug notification notify list based on the config.
    /// Wrapper for [NotifyConfig::notify_list]
    pub fn notify_list<U, E>(&self, fw: &Framework<U, E>) -> HashSet<UserId> {
        self.dev_utils.notifications.notify_list(&fw.options().owners)
    }

    /// Getter for log_dir.
    pub fn log_dir(&self) -> &str {
        &self.logging.log_dir
    }

    /// Is debug mode enabled for console logs
    pub fn console_debug(&self) -> bool {
        self.logging.console_debug
    }

    /// Is file logging enabled.
    pub fn logs_enabled(&self) -> bool {
        self.logging.logs_enabled
    }

    pub fn dev_guild(&self) -> Option<GuildId> {
        self.dev_utils.dev_guild
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_token: "put_token_here".to_string(),

            prefix: "d!".to_string(),

            lavalink: LavalinkConfig {
                hostname: "localhost:2333".to_string(),
                password: "youshallnotpass".to_string(),
                is_ssl: false,
            },

            player: PlayerConfig {
                default_volume: 50,
                search_results: 5,
                choice_timeout_secs: 30,
                queue_page_size: 10,
            },

            logging: LoggingConfig {
                console_debug: false,
                logs_enabled: true,
                log_dir: "logs".to_string(),
            },

            dev_utils: DevConfig {
                dev_guild: None,
                notifications: NotifyConfig {
                    enabled: false,
                    add_owners: true,
                    userids: vec![],
                },
            },
        }
    }
}

/// Where to find the Lavalink node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LavalinkConfig {
    /// Host and port, e.g. `localhost:2333`.
    pub hostname: String,
    /// Node password, matches `lavalink.server.password` on the node.
    pub password: String,
    /// Connect with TLS?
    pub is_ssl: bool,
}

/// Player behaviour shared by every guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Volume a new player starts at.
    pub default_volume: u16,
    /// Amount of search results offered to pick from.
    pub search_results: usize,
    /// Seconds to wait for a search pick.
    pub choice_timeout_secs: u64,
    /// Tracks per page when showing the queue.
    pub queue_page_size: usize,
}

impl PlayerConfig {
    /// How long to wait for a search pick.
    pub fn choice_timeout(&self) -> Duration {
        Duration::from_secs(self.choice_timeout_secs)
    }
}

/// Configs for
#[derive(Debug, Serialize, Deserialize)]
struct LoggingConfig {
    /// Print debug traces to console?
    console_debug: bool,
    /// Enable writing to log file?
    logs_enabled: bool,
    /// Directory to store log files
    log_dir: String,
}

/// Optional configs to enable developer-specific behavior.
#[derive(Debug, Serialize, Deserialize)]
struct DevConfig {
    /// Optional guild to automatically update commands quickly.
    #[serde(serialize_with = "serialize_opt", deserialize_with = "deserialize_opt")]
    dev_guild: Option<GuildId>,
    /// See [NotifyConfig]
    notifications: NotifyConfig,
}

/// Configs for notification behavior when encountering unexpected errors.
#[derive(Debug, Serialize, Deserialize)]
struct NotifyConfig {
    /// Enable this behavior or not. (bot sends a private message)
    enabled: bool,
    /// Whether to automatically add owners to the notify list.
    add_owners: bool,
    /// Additional users to add to the notify list.
    userids: Vec<UserId>,
}

impl NotifyConfig {
    /// Construct a bug notification notify list from the config and the bot owners.
    fn notify_list(&self, owners: &HashSet<UserId>) -> HashSet<UserId> {
        let mut notify_list = HashSet::new();

        if !self.enabled {
            return notify_list;
        }

        if self.add_owners {
            notify_list.extend(owners.iter().copied());
        }

        notify_list.extend(self.userids.iter().copied());

        notify_list
    }
}

/// Write the given config to [CONFIG_PATH].
fn write_file(config: Config) -> Result<(), ConfigError> {
    use std::fs::write;

    let content = toml::to_string_pretty(&config).expect("config serialization can't fail");
    write(CONFIG_PATH, content).map_err(ConfigError::IoError)
}

fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<GuildId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_str(OptVisitor)
}

fn serialize_opt<T, S>(val: &Option<T>, ser: S) -> Result<S::Ok, S::Error>
where
    T: serde::Serialize,
    S: serde::Serializer,
{
    match val {
        Some(v) => v.serialize(ser),
        None => ser.serialize_str(""),
    }
}

struct OptVisitor;

impl<'de> serde::de::Visitor<'de> for OptVisitor {
    type Value = Option<GuildId>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a valid guild id")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match v {
            "" => Ok(None),
            _ => {
                let num: u64 = v.parse().map_err(|_| E::custom("not u64"))?;
                Ok(Some(GuildId::new(num)))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn default_toml() -> String {
        toml::to_string_pretty(&Config::default()).expect("serialize default")
    }

    #[test]
    fn default_config_parses_back() {
        let config = Config::parse(&default_toml()).expect("parse default");
        assert_eq!(config.prefix(), "d!");
        assert_eq!(config.lavalink().hostname, "localhost:2333");
        assert_eq!(config.player().default_volume, 50);
        assert_eq!(config.player().choice_timeout(), Duration::from_secs(30));
        assert_eq!(config.dev_guild(), None);
    }

    #[test]
    fn placeholder_token_is_rejected() {
        let config = Config::default();
        assert!(matches!(
            config.token(),
            Err(ConfigError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn real_token_is_accepted() {
        let content = default_toml().replace("put_token_here", "abc.def.ghi");
        let config = Config::parse(&content).expect("parse");
        assert_eq!(config.token().expect("token"), "abc.def.ghi");
    }

    #[test]
    fn dev_guild_reads_from_string() {
        let content = default_toml().replace("dev_guild = \"\"", "dev_guild = \"1234\"");
        let config = Config::parse(&content).expect("parse");
        assert_eq!(config.dev_guild(), Some(GuildId::new(1234)));
    }

    #[test]
    fn missing_key_names_its_path() {
        let content = default_toml().replace("password = \"youshallnotpass\"", "");
        match Config::parse(&content) {
            Err(ConfigError::InvalidConfig { reason }) => {
                assert!(reason.contains("lavalink"), "{reason}")
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn notify_list_respects_flags() {
        let owners: HashSet<UserId> = [UserId::new(1)].into();
        let mut notify = NotifyConfig {
            enabled: false,
            add_owners: true,
            userids: vec![UserId::new(2)],
        };
        assert!(notify.notify_list(&owners).is_empty());

        notify.enabled = true;
        assert_eq!(notify.notify_list(&owners).len(), 2);

        notify.add_owners = false;
        assert_eq!(
            notify.notify_list(&owners),
            [UserId::new(2)].into_iter().collect()
        );
    }
}
