//! # Public API
//!
//! Entry points for the song editor and the song viewer, composed from the
//! lower-level modules.
//!
//! - [`apply_edit()`] - turn an edited chord sheet into stored lyrics and a key
//! - [`view()`] - transpose stored lyrics by a viewer shift and tokenize them
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordshift::api::{apply_edit, view};
//! use chordshift::Key;
//!
//! let edit = apply_edit("G       C\nAmazing grace");
//! assert_eq!(edit.lyrics, "[G]Amazing [C]grace");
//! assert_eq!(edit.key, Key::G);
//!
//! let shown = view(&edit.lyrics, 3);
//! assert_eq!(shown.current_key, Key::BFlat);
//! assert_eq!(shown.lyrics, "[Bb]Amazing [Eb]grace");
//! ```

use serde::Serialize;

use crate::key::{detect_key, Key};
use crate::lyrics::{parse_lyrics, ParsedLine};
use crate::note::flats_for_semitone;
use crate::sheet::to_inline;
use crate::transpose::transpose_lyrics;

/// Result of saving an edited sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    /// Canonical inline lyrics.
    pub lyrics: String,
    pub key: Key,
}

/// What the viewer renders for a song at a given shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub original_key: Key,
    pub current_key: Key,
    pub use_flats: bool,
    /// Lyrics after transposition.
    pub lyrics: String,
    pub lines: Vec<ParsedLine>,
}

/// Convert an edited chord sheet (or inline text) to stored lyrics and detect its key.
pub fn apply_edit(sheet: &str) -> Edit {
    let lyrics = to_inline(sheet);
    let key = detect_key(&lyrics);
    Edit { lyrics, key }
}

/// Transpose stored lyrics by `shift` semitones for display.
///
/// Spelling follows the key the song lands in: pitch classes conventionally
/// written with flats (Db, Eb, F, Ab, Bb) use the flat table. A shift of 0 shows
/// the lyrics as stored.
///
/// # Example
/// ```rust
/// use chordshift::api::view;
/// use chordshift::Key;
///
/// let shown = view("[D]Lord I [G]lift your [A]name on [D]high", -2);
/// assert_eq!(shown.original_key, Key::D);
/// assert_eq!(shown.current_key, Key::C);
/// assert!(!shown.use_flats);
/// assert_eq!(shown.lines[0].tokens[0].chord, "C");
/// ```
pub fn view(lyrics: &str, shift: i32) -> View {
    let original_key = detect_key(lyrics);
    let target = original_key.tonic() as i32 + shift;
    let current_key = Key::from_semitone(target);
    let use_flats = flats_for_semitone(target);

    let transposed = transpose_lyrics(lyrics, shift, Some(use_flats));
    log::debug!(
        "viewing in {} (shift {}, flats {})",
        current_key,
        shift,
        use_flats
    );

    View {
        original_key,
        current_key,
        use_flats,
        lines: parse_lyrics(&transposed),
        lyrics: transposed,
    }
}
