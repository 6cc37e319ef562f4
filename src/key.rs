//! # Key Detection
//!
//! Infers the major key of a song from the chords it uses.
//!
//! ## Key Table
//! Twelve major keys in a fixed order, each with its six diatonic chords
//! (I, ii, iii, IV, V, vi):
//! ```text
//! C   C   Dm   Em   F   G   Am
//! G   G   Am   Bm   C   D   Em
//! ...
//! Db  Db  Ebm  Fm   Gb  Ab  Bbm
//! ```
//! The order `C G D A E B F# F Bb Eb Ab Db` is part of the contract: ties go to
//! the key that reached the best score first.
//!
//! ## Scoring
//! For every candidate key:
//! 1. +1 for each found chord that matches one of the key's six chords. A match is
//!    the same pitch class with the same triad quality (`Am7` matches `Am`,
//!    `G7` matches `G`, but `G` does not match `Gm`). Each found chord counts once.
//! 2. +[`FIRST_CHORD_BONUS`] when the first found chord's root is the tonic.
//! 3. +[`LAST_CHORD_BONUS`] when the last found chord's root is the tonic.
//!
//! Songs of praise almost always open and close on the tonic, so the bonuses
//! outweigh raw chord counts. The weights are empirical and not derived from
//! theory; changing them changes detected keys for ambiguous songs.
//!
//! ## Chord Extraction
//! Lines are read top to bottom. Bracketed labels that match the chord grammar
//! are collected (`[Chorus]` is not), followed by every chord token of a line
//! classified as a chord line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::{quality_of, Chord};
use crate::error::ChordError;
use crate::lyrics::{segments, Segment};
use crate::note::{note_index, parse_root, semitone_diff};
use crate::sheet::{is_chord_line, words};

/// Bonus when the song opens on the tonic.
pub const FIRST_CHORD_BONUS: u32 = 3;

/// Bonus when the song closes on the tonic.
pub const LAST_CHORD_BONUS: u32 = 1;

/// One of the twelve major keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Key {
    #[default]
    #[serde(rename = "C")]
    C,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "Bb")]
    BFlat,
    #[serde(rename = "Eb")]
    EFlat,
    #[serde(rename = "Ab")]
    AFlat,
    #[serde(rename = "Db")]
    DFlat,
}

impl Key {
    /// All keys in detection order.
    pub const ALL: [Key; 12] = [
        Key::C,
        Key::G,
        Key::D,
        Key::A,
        Key::E,
        Key::B,
        Key::FSharp,
        Key::F,
        Key::BFlat,
        Key::EFlat,
        Key::AFlat,
        Key::DFlat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::G => "G",
            Key::D => "D",
            Key::A => "A",
            Key::E => "E",
            Key::B => "B",
            Key::FSharp => "F#",
            Key::F => "F",
            Key::BFlat => "Bb",
            Key::EFlat => "Eb",
            Key::AFlat => "Ab",
            Key::DFlat => "Db",
        }
    }

    /// Semitone of the tonic, C = 0.
    pub fn tonic(self) -> usize {
        match self {
            Key::C => 0,
            Key::DFlat => 1,
            Key::D => 2,
            Key::EFlat => 3,
            Key::E => 4,
            Key::F => 5,
            Key::FSharp => 6,
            Key::G => 7,
            Key::AFlat => 8,
            Key::A => 9,
            Key::BFlat => 10,
            Key::B => 11,
        }
    }

    /// The six diatonic chords: I, ii, iii, IV, V, vi.
    pub fn vocabulary(self) -> [&'static str; 6] {
        match self {
            Key::C => ["C", "Dm", "Em", "F", "G", "Am"],
            Key::G => ["G", "Am", "Bm", "C", "D", "Em"],
            Key::D => ["D", "Em", "F#m", "G", "A", "Bm"],
            Key::A => ["A", "Bm", "C#m", "D", "E", "F#m"],
            Key::E => ["E", "F#m", "G#m", "A", "B", "C#m"],
            Key::B => ["B", "C#m", "D#m", "E", "F#", "G#m"],
            Key::FSharp => ["F#", "G#m", "A#m", "B", "C#", "D#m"],
            Key::F => ["F", "Gm", "Am", "Bb", "C", "Dm"],
            Key::BFlat => ["Bb", "Cm", "Dm", "Eb", "F", "Gm"],
            Key::EFlat => ["Eb", "Fm", "Gm", "Ab", "Bb", "Cm"],
            Key::AFlat => ["Ab", "Bbm", "Cm", "Db", "Eb", "Fm"],
            Key::DFlat => ["Db", "Ebm", "Fm", "Gb", "Ab", "Bbm"],
        }
    }

    /// Flat keys are spelled with flats when transposing into them.
    pub fn prefers_flats(self) -> bool {
        matches!(
            self,
            Key::F | Key::BFlat | Key::EFlat | Key::AFlat | Key::DFlat
        )
    }

    /// Key whose tonic is `semitone` (wrapped into 0..11).
    pub fn from_semitone(semitone: i32) -> Key {
        let pc = semitone.rem_euclid(12) as usize;
        Key::ALL
            .into_iter()
            .find(|k| k.tonic() == pc)
            .unwrap_or(Key::C)
    }

    /// Semitones going up from `self` to `target`, always 0..11.
    pub fn semitones_to(self, target: Key) -> i32 {
        semitone_diff(self.label(), target.label())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Key {
    type Err = ChordError;

    /// Accepts any spelling of the tonic: `"A#"` is `Bb`, `"Gb"` is `F#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        note_index(s.trim())
            .map(|idx| Key::from_semitone(idx as i32))
            .ok_or_else(|| ChordError::UnknownKey(s.to_string()))
    }
}

/// Tonic semitone of a key name in any spelling, `None` for unknown names.
pub fn key_to_semitone(name: &str) -> Option<usize> {
    note_index(name.trim())
}

/// Every chord in `text`, in reading order.
///
/// Bracket labels must match the strict chord grammar. Bare tokens count only on
/// chord lines.
///
/// # Examples
/// ```
/// use chordshift::extract_chords;
///
/// let text = "[Verse 1]\n[G]Amazing [C]grace\nD    G\nhow sweet";
/// assert_eq!(extract_chords(text), vec!["G", "C", "D", "G"]);
/// ```
pub fn extract_chords(text: &str) -> Vec<&str> {
    let mut found = Vec::new();
    for line in text.split('\n') {
        for segment in segments(line) {
            if let Segment::Marker(label) = segment {
                if Chord::parse(label).is_some() {
                    found.push(label);
                }
            }
        }
        if is_chord_line(line) {
            found.extend(
                words(line)
                    .into_iter()
                    .map(|(_, word)| word)
                    .filter(|word| Chord::parse(word).is_some()),
            );
        }
    }
    found
}

/// Detect the key of a song. Returns C when the text has no chords.
///
/// # Examples
/// ```
/// use chordshift::{detect_key, Key};
///
/// assert_eq!(detect_key(""), Key::C);
/// assert_eq!(detect_key("[D]Lord I [G]lift your [A]name on [D]high"), Key::D);
/// assert_eq!(
///     detect_key("[Am]Yesterday [G]all my [C]troubles seemed so [F]far away"),
///     Key::C
/// );
/// ```
pub fn detect_key(text: &str) -> Key {
    let chords: Vec<Chord<'_>> = extract_chords(text)
        .into_iter()
        .filter_map(Chord::parse)
        .collect();

    let (Some(first), Some(last)) = (chords.first(), chords.last()) else {
        return Key::default();
    };
    let first_root = note_index(first.root);
    let last_root = note_index(last.root);

    let mut best = Key::default();
    let mut best_score = 0;

    for key in Key::ALL {
        let mut score = chords
            .iter()
            .filter(|chord| fits_key(chord, key))
            .count() as u32;

        if first_root == Some(key.tonic()) {
            score += FIRST_CHORD_BONUS;
        }
        if chords.len() > 1 && last_root == Some(key.tonic()) {
            score += LAST_CHORD_BONUS;
        }

        log::trace!("key {} scored {}", key, score);
        if score > best_score {
            best_score = score;
            best = key;
        }
    }

    log::debug!(
        "detected key {} (score {}) from {} chords",
        best,
        best_score,
        chords.len()
    );
    best
}

/// True when the chord is one of the key's six chords, ignoring extensions.
fn fits_key(chord: &Chord<'_>, key: Key) -> bool {
    let root = note_index(chord.root);
    let quality = chord.quality();

    key.vocabulary().iter().any(|vocab| {
        let Some(split) = parse_root(vocab) else {
            return false;
        };
        note_index(split.root) == root
            && (split.rest == chord.suffix || quality_of(split.rest) == quality)
    })
}
