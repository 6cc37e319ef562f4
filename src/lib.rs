//! Chord transposition, key detection and chord-sheet conversion for song lyrics.
//!
//! Lyrics are stored inline, with chords in brackets before the syllable they
//! are played on:
//! ```text
//! [Verse 1]
//! [G]Amazing [C]grace how [D]sweet the [G]sound
//! ```
//! and edited as a chord sheet, chords on their own line above the words.

pub mod api;
pub mod chord;
pub mod error;
pub mod key;
pub mod lyrics;
pub mod note;
pub mod sheet;
pub mod song;
pub mod transpose;

pub use chord::{is_chord, is_section_marker, Chord};
pub use error::*;
pub use key::{detect_key, extract_chords, key_to_semitone, Key};
pub use lyrics::{parse_lyrics, parse_lyrics_line, ChordToken, ParsedLine};
pub use sheet::{is_chord_line, to_chord_sheet, to_inline};
pub use song::{parse_song, Song};
pub use transpose::{transpose_chord, transpose_lyrics, transpose_text, transpose_to_key};
