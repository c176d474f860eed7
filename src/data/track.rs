//! Track metadata from the node and how it's shown in discord.

use std::fmt::Display;

use itertools::Itertools;
use lavalink_rs::model::track::TrackData;
use serde_json::Value;

use crate::lib::format_millis;
use crate::serenity;

/// Footer on every now playing embed.
const EMBED_FOOTER: &str = "Powered by Donuts™";

/// Discord limits embed descriptions and messages, keep pages below it.
const PAGE_CHAR_LIMIT: usize = 2000;

/// Metadata for a track, taken from [TrackData].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMetadata {
    /// Title of the track.
    pub title: String,
    /// Url to source
    pub uri: Option<String>,
    /// Uploader or artist.
    pub author: String,
    /// Length in milliseconds.
    pub length: u64,
    /// The url to the source's artwork.
    pub artwork_url: Option<String>,
    /// Album name, only provided by some node plugins.
    pub album: Option<String>,
    /// Where the node found this track (e.g. youtube).
    pub source: String,
    /// Who asked for the track.
    pub requester: Option<serenity::UserId>,
}

impl From<&TrackData> for TrackMetadata {
    fn from(track: &TrackData) -> Self {
        let info = &track.info;
        let album = track
            .plugin_info
            .as_ref()
            .and_then(|plugin| plugin.get("albumName"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        TrackMetadata {
            title: info.title.clone(),
            uri: info.uri.clone(),
            author: info.author.clone(),
            length: info.length,
            artwork_url: info.artwork_url.clone(),
            album,
            source: info.source_name.clone(),
            requester: track.user_data.as_ref().and_then(requester_from),
        }
    }
}

/// Tag a track with who requested it, stored in the track's user data.
pub fn requester_data(requester: serenity::UserId) -> Value {
    serde_json::json!({ "requester_id": requester.get() })
}

/// Read the tag written by [requester_data].
fn requester_from(user_data: &Value) -> Option<serenity::UserId> {
    user_data
        .get("requester_id")
        .and_then(Value::as_u64)
        .filter(|id| *id != 0)
        .map(serenity::UserId::new)
}

impl TrackMetadata {
    /// Title as a markdown link if there is an uri.
    fn linked_title(&self) -> String {
        match &self.uri {
            Some(uri) => format!("[{}]({uri})", self.title),
            None => self.title.clone(),
        }
    }

    /// Line used in the now playing embed.
    pub fn describe(&self) -> String {
        format!(
            "**{title}**  - *{length}* by `{author}`",
            title = self.linked_title(),
            length = format_millis(self.length),
            author = self.author
        )
    }

    /// Line in a search menu. `index` is 0 based.
    pub fn menu_line(&self, index: usize) -> String {
        format!(
            "{num}. `{title}` - *{length}* by `{author}`",
            num = index + 1,
            title = self.title,
            length = format_millis(self.length),
            author = self.author
        )
    }

    /// Line in the queue listing. `index` is 0 based.
    pub fn queue_line(&self, index: usize) -> String {
        format!(
            "**{num}**. **{title}** - *{length}*",
            num = index + 1,
            title = self.linked_title(),
            length = format_millis(self.length)
        )
    }

    /// The embed posted when this track starts and for `nowplaying`.
    pub fn now_playing_embed(&self) -> serenity::CreateEmbed {
        let mut description = self.describe();
        if let Some(requester) = self.requester {
            description.push_str(&format!("\n\nRequested by <@{requester}>"));
        }

        let mut embed = serenity::CreateEmbed::new()
            .title("Now Playing")
            .description(description)
            .footer(serenity::CreateEmbedFooter::new(EMBED_FOOTER));

        if let Some(url) = &self.artwork_url {
            embed = embed.thumbnail(url);
        }

        if let Some(album) = &self.album {
            embed = embed.field("Album", album, true);
        }

        if !self.source.is_empty() {
            embed = embed.field("Source", &self.source, true);
        }

        embed
    }

    /// A message carrying only the [now playing embed](Self::now_playing_embed).
    pub fn now_playing_message(&self) -> serenity::CreateMessage {
        serenity::CreateMessage::new().embed(self.now_playing_embed())
    }
}

impl Display for TrackMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Split the queue into pages of at most `page_size` lines.
/// Pages are also cut before they grow past what discord allows in a message.
pub fn queue_pages(tracks: &[TrackMetadata], page_size: usize) -> Vec<String> {
    let page_size = page_size.max(1);
    let mut pages = Vec::new();

    for chunk in &tracks.iter().enumerate().chunks(page_size) {
        let mut page = String::new();
        for (index, track) in chunk {
            let line = track.queue_line(index);
            if !page.is_empty() && page.len() + line.len() + 1 > PAGE_CHAR_LIMIT {
                pages.push(std::mem::take(&mut page));
            }
            if !page.is_empty() {
                page.push('\n');
            }
            page.push_str(&line);
        }
        pages.push(page);
    }

    pages
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// A track with the given title lasting `secs` seconds.
    pub(crate) fn track(title: &str, secs: u64) -> TrackMetadata {
        TrackMetadata {
            title: title.to_string(),
            uri: Some(format!("https://example.com/{title}")),
            author: "Someone".to_string(),
            length: secs * 1000,
            source: "youtube".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn describe_links_title() {
        let line = track("song", 215).describe();
        assert_eq!(
            line,
            "**[song](https://example.com/song)**  - *3:35* by `Someone`"
        );
    }

    #[test]
    fn describe_without_uri() {
        let mut meta = track("song", 5);
        meta.uri = None;
        assert_eq!(meta.describe(), "**song**  - *0:05* by `Someone`");
    }

    #[test]
    fn menu_and_queue_lines_are_one_based() {
        let meta = track("song", 61);
        assert_eq!(meta.menu_line(0), "1. `song` - *1:01* by `Someone`");
        assert_eq!(
            meta.queue_line(2),
            "**3**. **[song](https://example.com/song)** - *1:01*"
        );
    }

    #[test]
    fn now_playing_message_carries_embed() {
        let mut meta = track("song", 90);
        meta.album = Some("Album".to_string());
        meta.requester = Some(serenity::UserId::new(9));

        let message = serde_json::to_value(meta.now_playing_message()).unwrap();
        let embed = &message["embeds"][0];
        assert_eq!(embed["title"], "Now Playing");
        assert_eq!(embed["footer"]["text"], EMBED_FOOTER);
        assert!(embed["description"]
            .as_str()
            .unwrap()
            .ends_with("Requested by <@9>"));
        assert_eq!(embed["fields"][0]["name"], "Album");
    }

    #[test]
    fn requester_round_trips_through_user_data() {
        let data = requester_data(serenity::UserId::new(77));
        assert_eq!(requester_from(&data), Some(serenity::UserId::new(77)));
        assert_eq!(requester_from(&serde_json::json!({})), None);
    }

    #[test]
    fn queue_pages_chunk_by_size() {
        let tracks: Vec<_> = (0..23).map(|i| track(&format!("t{i}"), 10)).collect();
        let pages = queue_pages(&tracks, 10);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines().count(), 10);
        assert_eq!(pages[2].lines().count(), 3);
        // Numbering continues across pages.
        assert!(pages[1].starts_with("**11**."));
    }

    #[test]
    fn queue_pages_respect_char_limit() {
        let long_title = "x".repeat(900);
        let tracks: Vec<_> = (0..3).map(|_| track(&long_title, 10)).collect();
        let pages = queue_pages(&tracks, 10);

        assert!(pages.len() > 1);
        assert!(pages.iter().all(|page| page.len() <= PAGE_CHAR_LIMIT));
    }

    #[test]
    fn empty_queue_has_no_pages() {
        assert!(queue_pages(&[], 10).is_empty());
    }
}
