//! Turning user queries into node lookups, and search results into choices.

use std::fmt::Write;

use lavalink_rs::model::track::Track;
use lavalink_rs::model::track::TrackData;
use lavalink_rs::model::track::TrackLoadData;
use tracing::instrument;
use url::Url;

use crate::data::TrackMetadata;
use crate::error::UserError;
use crate::BotError;

/// Prefix telling the node to search youtube.
const YOUTUBE_SEARCH: &str = "ytsearch:";

/// What the node is asked to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A link, handed to the node as is.
    Url(Url),
    /// Free text to search for.
    Search(String),
}

impl Query {
    /// Links with an http(s) scheme are loaded directly, everything else is searched.
    pub fn parse(input: &str) -> Query {
        let input = input.trim();
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Query::Url(url),
            _ => Query::Search(input.to_string()),
        }
    }

    /// The identifier sent to the node.
    pub fn identifier(&self) -> String {
        match self {
            Query::Url(url) => url.to_string(),
            Query::Search(terms) => format!("{YOUTUBE_SEARCH}{terms}"),
        }
    }
}

/// What the node found.
#[derive(Debug, Clone)]
pub enum Loaded {
    /// A single track, from a direct link.
    Track(TrackData),
    /// All tracks of a playlist.
    Playlist { name: String, tracks: Vec<TrackData> },
    /// Search results, the user picks one.
    Search(Vec<TrackData>),
    /// Nothing matched.
    Empty,
}

impl Loaded {
    /// Classify a node load result.
    /// A node side failure is an error, an empty search is [Loaded::Empty].
    pub fn classify(query: &Query, loaded: Track) -> Result<Loaded, BotError> {
        let loaded = match loaded.data {
            Some(TrackLoadData::Track(track)) => Loaded::Track(track),
            Some(TrackLoadData::Playlist(playlist)) if playlist.tracks.is_empty() => Loaded::Empty,
            Some(TrackLoadData::Playlist(playlist)) => Loaded::Playlist {
                name: playlist.info.name,
                tracks: playlist.tracks,
            },
            Some(TrackLoadData::Search(tracks)) if tracks.is_empty() => Loaded::Empty,
            Some(TrackLoadData::Search(tracks)) => Loaded::Search(tracks),
            Some(TrackLoadData::Error(error)) => Err(BotError::LoadFailed {
                query: query.identifier(),
                reason: format!("{error:?}"),
            })?,
            None => Loaded::Empty,
        };
        Ok(loaded)
    }
}

/// Ask the node to load the query for a guild.
#[instrument(skip(lavalink))]
pub async fn load(
    lavalink: &lavalink_rs::client::LavalinkClient,
    guild_id: crate::serenity::GuildId,
    query: &Query,
) -> Result<Loaded, BotError> {
    let identifier = query.identifier();
    tracing::debug!("Loading '{identifier}'.");
    let result = lavalink.load_tracks(guild_id, &identifier).await?;
    Loaded::classify(query, result)
}

/// The menu text offered for the first `limit` search results.
pub fn search_menu(tracks: &[TrackMetadata], limit: usize) -> String {
    let shown = tracks.len().min(limit);
    let mut menu = format!("Top {shown} Results:\n");
    for (index, track) in tracks.iter().take(shown).enumerate() {
        writeln!(menu, "{}", track.menu_line(index)).expect("write to string buffer can't fail");
    }
    menu.push_str("\nEnter a number for the song you want to choose:");
    menu
}

/// Parse a reply to the search menu into a 0 based index.
/// `available` is the amount of choices offered.
pub fn parse_choice(content: &str, available: usize) -> Result<usize, UserError> {
    let invalid = UserError::InvalidChoice { max: available };
    let choice: usize = content.trim().parse().map_err(|_| invalid)?;

    if (1..=available).contains(&choice) {
        Ok(choice - 1)
    } else {
        Err(UserError::InvalidChoice { max: available })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::track::test::track;

    #[test]
    fn links_are_loaded_directly() {
        let query = Query::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert!(matches!(query, Query::Url(_)));
        assert_eq!(
            query.identifier(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn text_is_searched() {
        let query = Query::parse("  one last kiss ");
        assert_eq!(query, Query::Search("one last kiss".to_string()));
        assert_eq!(query.identifier(), "ytsearch:one last kiss");
    }

    #[test]
    fn non_web_schemes_are_searched() {
        // "artist:song" parses as a url with scheme "artist".
        let query = Query::parse("artist:song");
        assert_eq!(query.identifier(), "ytsearch:artist:song");
    }

    /// A node track as it comes over the wire.
    fn node_track(title: &str) -> serde_json::Value {
        serde_json::json!({
            "encoded": format!("encoded-{title}"),
            "info": {
                "identifier": title,
                "isSeekable": true,
                "author": "Someone",
                "length": 60000,
                "isStream": false,
                "position": 0,
                "title": title,
                "uri": format!("https://example.com/{title}"),
                "artworkUrl": null,
                "isrc": null,
                "sourceName": "youtube"
            },
            "pluginInfo": {}
        })
    }

    /// A load result with the given type and data.
    fn load_result(load_type: &str, data: serde_json::Value) -> Track {
        serde_json::from_value(serde_json::json!({
            "loadType": load_type,
            "data": data
        }))
        .unwrap()
    }

    fn playlist(tracks: Vec<serde_json::Value>) -> Track {
        load_result(
            "playlist",
            serde_json::json!({
                "info": { "name": "mix", "selectedTrack": -1 },
                "pluginInfo": {},
                "tracks": tracks
            }),
        )
    }

    fn classify(loaded: Track) -> Result<Loaded, BotError> {
        Loaded::classify(&Query::parse("anything"), loaded)
    }

    #[test]
    fn direct_link_is_one_track() {
        let loaded = classify(load_result("track", node_track("song"))).unwrap();
        assert!(matches!(loaded, Loaded::Track(track) if track.info.title == "song"));
    }

    #[test]
    fn playlist_keeps_name_and_order() {
        let loaded = classify(playlist(vec![node_track("a"), node_track("b")])).unwrap();
        let Loaded::Playlist { name, tracks } = loaded else {
            panic!("expected a playlist, got {loaded:?}");
        };
        assert_eq!(name, "mix");
        let titles: Vec<_> = tracks.iter().map(|t| t.info.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn search_results_are_offered() {
        let data = serde_json::json!([node_track("a"), node_track("b"), node_track("c")]);
        let loaded = classify(load_result("search", data)).unwrap();
        assert!(matches!(loaded, Loaded::Search(tracks) if tracks.len() == 3));
    }

    #[test]
    fn nothing_found_is_empty() {
        assert!(matches!(
            classify(load_result("search", serde_json::json!([]))).unwrap(),
            Loaded::Empty
        ));
        assert!(matches!(classify(playlist(vec![])).unwrap(), Loaded::Empty));
        assert!(matches!(
            classify(load_result("empty", serde_json::Value::Null)).unwrap(),
            Loaded::Empty
        ));
    }

    #[test]
    fn node_failure_is_an_error() {
        let data = serde_json::json!({
            "message": "This video is unavailable",
            "severity": "common",
            "cause": "Unavailable"
        });
        let err = classify(load_result("error", data)).unwrap_err();
        assert!(
            matches!(&err, BotError::LoadFailed { query, .. } if query == "ytsearch:anything"),
            "{err}"
        );
    }

    #[test]
    fn menu_lists_at_most_limit() {
        let tracks: Vec<_> = (0..8).map(|i| track(&format!("t{i}"), 60)).collect();
        let menu = search_menu(&tracks, 5);

        assert!(menu.starts_with("Top 5 Results:\n1. `t0`"));
        assert!(menu.contains("5. `t4`"));
        assert!(!menu.contains("t5"));
        assert!(menu.ends_with("Enter a number for the song you want to choose:"));
    }

    #[test]
    fn menu_with_few_results() {
        let tracks = vec![track("only", 60)];
        assert!(search_menu(&tracks, 5).starts_with("Top 1 Results:"));
    }

    #[test]
    fn choices_are_one_based() {
        assert_eq!(parse_choice("1", 5).unwrap(), 0);
        assert_eq!(parse_choice(" 5 ", 5).unwrap(), 4);
    }

    #[test]
    fn bad_choices_are_rejected() {
        for content in ["0", "6", "-1", "two", ""] {
            assert!(
                matches!(
                    parse_choice(content, 5),
                    Err(UserError::InvalidChoice { max: 5 })
                ),
                "{content}"
            );
        }
    }
}
