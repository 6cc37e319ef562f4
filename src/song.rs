//! # Song Documents
//!
//! A song is its lyrics plus an optional YAML frontmatter block:
//! ```text
//! ---
//! title: Amazing Grace
//! artist: John Newton
//! key: G
//! ---
//! [G]Amazing [C]grace how [D]sweet the [G]sound
//! ```
//! Every field is optional. A declared `key` wins over detection; it may be any
//! spelling of the tonic (`A#` reads as `Bb`). Without a `---` block the whole
//! source is lyrics.

use serde::{Deserialize, Serialize};

use crate::error::ChordError;
use crate::key::{detect_key, Key};

/// Title used when a song has none.
pub const UNTITLED: &str = "Untitled Song";

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    /// Key declared in the frontmatter, if any.
    pub declared_key: Option<Key>,
    /// Canonical inline lyrics.
    pub lyrics: String,
}

impl Song {
    pub fn new(title: &str, artist: &str, lyrics: &str) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            artist: artist.trim().to_string(),
            declared_key: None,
            lyrics: lyrics.to_string(),
        }
    }

    /// Declared key, or the key detected from the lyrics.
    pub fn key(&self) -> Key {
        self.declared_key.unwrap_or_else(|| detect_key(&self.lyrics))
    }

    /// Serialize back to frontmatter + lyrics. Empty fields are left out, and a
    /// song with no metadata at all is written as bare lyrics.
    pub fn to_source(&self) -> String {
        let raw = RawMetadata {
            title: Some(self.title.clone()).filter(|t| !t.is_empty() && t != UNTITLED),
            artist: Some(self.artist.clone()).filter(|a| !a.is_empty()),
            key: self.declared_key.map(|k| k.label().to_string()),
        };
        if raw.title.is_none() && raw.artist.is_none() && raw.key.is_none() {
            return self.lyrics.clone();
        }

        // Serializing three optional strings cannot fail
        let yaml = serde_yaml::to_string(&raw).unwrap_or_default();
        format!("---\n{}---\n{}", yaml, self.lyrics)
    }
}

/// Parse a song document.
///
/// # Errors
/// `MetadataError` for malformed YAML, `UnknownKey` for a `key` that names no pitch class.
///
/// # Examples
/// ```
/// use chordshift::{parse_song, Key};
///
/// let song = parse_song("---\ntitle: Amazing Grace\n---\n[G]Amazing [C]grace")?;
/// assert_eq!(song.title, "Amazing Grace");
/// assert_eq!(song.lyrics, "[G]Amazing [C]grace");
/// assert_eq!(song.key(), Key::G);
/// # Ok::<(), chordshift::ChordError>(())
/// ```
pub fn parse_song(source: &str) -> Result<Song, ChordError> {
    let (metadata, lyrics) = extract_frontmatter(source);

    let raw: RawMetadata = match metadata {
        Some(content) if !content.trim().is_empty() => serde_yaml::from_str(&content)
            .map_err(|e| ChordError::MetadataError(e.to_string()))?,
        _ => RawMetadata::default(),
    };

    let declared_key = raw.key.as_deref().map(str::parse::<Key>).transpose()?;
    let mut song = Song::new(
        raw.title.as_deref().unwrap_or_default(),
        raw.artist.as_deref().unwrap_or_default(),
        &lyrics,
    );
    song.declared_key = declared_key;

    log::debug!(
        "parsed song {:?} ({} lyric lines)",
        song.title,
        song.lyrics.split('\n').count()
    );
    Ok(song)
}

/// Split a leading `---` block from the body.
/// Returns (metadata_content, lyrics)
fn extract_frontmatter(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.split('\n').collect();

    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return (None, source.to_string());
    };
    if lines[start].trim() != "---" {
        return (None, source.to_string());
    }

    match lines[start + 1..].iter().position(|l| l.trim() == "---") {
        Some(offset) => {
            let end = start + 1 + offset;
            (Some(lines[start + 1..end].join("\n")), lines[end + 1..].join("\n"))
        }
        None => (None, source.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let song = parse_song("[C]just lyrics").unwrap();
        assert_eq!(song.title, UNTITLED);
        assert_eq!(song.artist, "");
        assert_eq!(song.declared_key, None);
        assert_eq!(song.lyrics, "[C]just lyrics");
    }

    #[test]
    fn test_full_frontmatter() {
        let source = "---\ntitle: Be Thou My Vision\nartist: Traditional\nkey: Eb\n---\n[Eb]Be thou my [Ab]vision";
        let song = parse_song(source).unwrap();
        assert_eq!(song.title, "Be Thou My Vision");
        assert_eq!(song.artist, "Traditional");
        assert_eq!(song.declared_key, Some(Key::EFlat));
        assert_eq!(song.key(), Key::EFlat);
    }

    #[test]
    fn test_declared_key_overrides_detection() {
        let song = parse_song("---\nkey: A#\n---\n[C]one [F]two [G]three [C]four").unwrap();
        assert_eq!(song.key(), Key::BFlat);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let result = parse_song("---\nkey: H\n---\n[C]x");
        assert!(matches!(result, Err(ChordError::UnknownKey(_))));
    }

    #[test]
    fn test_bad_yaml_is_metadata_error() {
        let result = parse_song("---\ntitle: [unclosed\n---\nwords");
        assert!(matches!(result, Err(ChordError::MetadataError(_))));
    }

    #[test]
    fn test_unterminated_block_is_lyrics() {
        let source = "---\nnot closed";
        let song = parse_song(source).unwrap();
        assert_eq!(song.lyrics, source);
    }

    #[test]
    fn test_blank_title_defaults() {
        let song = Song::new("   ", " Someone ", "");
        assert_eq!(song.title, UNTITLED);
        assert_eq!(song.artist, "Someone");
    }

    #[test]
    fn test_to_source_round_trip() {
        let mut song = Song::new("Amazing Grace", "John Newton", "[G]Amazing [C]grace");
        song.declared_key = Some(Key::G);
        let parsed = parse_song(&song.to_source()).unwrap();
        assert_eq!(parsed, song);
    }

    #[test]
    fn test_to_source_without_metadata_is_bare_lyrics() {
        let song = Song::new("", "", "[G]x");
        assert_eq!(song.to_source(), "[G]x");
    }
}
