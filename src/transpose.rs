//! # Transposer
//!
//! Shifts chords by a number of semitones and re-spells them from the sharp or
//! flat table.
//!
//! ## Spelling
//! When no spelling is requested, each chord keeps the spelling family of its own
//! root: `Bb` moves to flats, `F#` and naturals move to sharps. A slash bass
//! always follows the spelling chosen for the main root.
//!
//! ## Laws
//! - A shift of 0 returns the input untouched, byte for byte.
//! - Shifting by `a` then `b` lands on the same pitch classes as shifting by `a + b`.
//! - Tokens without a recognizable root pass through unchanged.
//!
//! ## Entry Points
//! - [`transpose_chord`] - one chord token
//! - [`transpose_lyrics`] - every `[Chord]` marker in inline lyrics
//! - [`transpose_text`] - inline markers plus bare chord lines of a chord sheet
//! - [`transpose_to_key`] - from the detected key to a target key

use crate::chord::is_section_marker;
use crate::key::{detect_key, Key};
use crate::lyrics::{segments, Segment};
use crate::note::{is_flat_spelling, parse_root, transpose_note};
use crate::sheet::{is_chord_line, words};

/// Transpose a single chord token.
///
/// `use_flats` forces the spelling; `None` keeps the spelling family of the root.
///
/// # Examples
/// ```
/// use chordshift::transpose_chord;
///
/// assert_eq!(transpose_chord("Am", 3, None), "Cm");
/// assert_eq!(transpose_chord("C#", 1, None), "D");
/// assert_eq!(transpose_chord("G/B", 2, None), "A/C#");
/// assert_eq!(transpose_chord("Bb7", 2, None), "C7");
/// assert_eq!(transpose_chord("C", 1, Some(true)), "Db");
/// assert_eq!(transpose_chord("N.C.", 5, None), "N.C.");
/// ```
pub fn transpose_chord(chord: &str, semitones: i32, use_flats: Option<bool>) -> String {
    if semitones == 0 {
        return chord.to_string();
    }
    let Some(split) = parse_root(chord) else {
        return chord.to_string();
    };

    let flats = use_flats.unwrap_or_else(|| is_flat_spelling(split.root));
    let Some(root) = transpose_note(split.root, semitones, flats) else {
        return chord.to_string();
    };

    if let Some(slash) = split.rest.find('/') {
        let (suffix, after) = (&split.rest[..slash], &split.rest[slash + 1..]);
        if let Some(bass) = parse_root(after) {
            if let Some(new_bass) = transpose_note(bass.root, semitones, flats) {
                return format!("{}{}/{}{}", root, suffix, new_bass, bass.rest);
            }
        }
    }

    format!("{}{}", root, split.rest)
}

/// Transpose every `[Chord]` marker in inline lyrics.
///
/// Section markers such as `[Verse 1]` or `[Chorus]` are left alone, as is all
/// text outside the markers.
///
/// # Examples
/// ```
/// use chordshift::transpose_lyrics;
///
/// let lyrics = "[Verse 1]\n[G]Amazing [C]grace";
/// assert_eq!(transpose_lyrics(lyrics, 2, None), "[Verse 1]\n[A]Amazing [D]grace");
/// assert_eq!(transpose_lyrics(lyrics, 0, None), lyrics);
/// ```
pub fn transpose_lyrics(text: &str, semitones: i32, use_flats: Option<bool>) -> String {
    if semitones == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for segment in segments(text) {
        match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Marker(label) if is_section_marker(label) => {
                out.push('[');
                out.push_str(label);
                out.push(']');
            }
            Segment::Marker(chord) => {
                out.push('[');
                out.push_str(&transpose_chord(chord, semitones, use_flats));
                out.push(']');
            }
        }
    }
    out
}

/// Transpose inline markers and bare chord lines alike.
///
/// This is the editor's variant: the text may be canonical inline lyrics, a
/// chord-over-lyrics sheet, or a mix. Chords on a chord line keep their column
/// when they still fit; a chord that grew is pushed right so one space always
/// separates it from the previous token.
///
/// # Examples
/// ```
/// use chordshift::transpose_text;
///
/// let sheet = "G       C\nAmazing grace";
/// assert_eq!(transpose_text(sheet, 1, Some(true)), "Ab      Db\nAmazing grace");
/// ```
pub fn transpose_text(text: &str, semitones: i32, use_flats: Option<bool>) -> String {
    if semitones == 0 {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| {
            if is_chord_line(line) {
                transpose_chord_line(line, semitones, use_flats)
            } else {
                transpose_lyrics(line, semitones, use_flats)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite a chord line token by token, keeping columns where possible.
fn transpose_chord_line(line: &str, semitones: i32, use_flats: Option<bool>) -> String {
    let mut out = String::new();
    let mut width = 0;

    for (column, word) in words(line) {
        let replacement = if crate::chord::is_chord(word) {
            transpose_chord(word, semitones, use_flats)
        } else {
            word.to_string()
        };

        let target = if width == 0 { column } else { column.max(width + 1) };
        out.extend(std::iter::repeat(' ').take(target - width));
        out.push_str(&replacement);
        width = target + replacement.chars().count();
    }
    out
}

/// Transpose from the detected key of `text` to `target`.
///
/// Spelling follows the target key (`F`, `Bb`, `Eb`, `Ab`, `Db` use flats).
///
/// # Examples
/// ```
/// use chordshift::{transpose_to_key, Key};
///
/// let lyrics = "[G]Amazing [C]grace how [D]sweet the [G]sound";
/// assert_eq!(
///     transpose_to_key(lyrics, Key::BFlat),
///     "[Bb]Amazing [Eb]grace how [F]sweet the [Bb]sound"
/// );
/// ```
pub fn transpose_to_key(text: &str, target: Key) -> String {
    let from = detect_key(text);
    let semitones = from.semitones_to(target);
    log::debug!("transposing from {} to {} ({} semitones)", from, target, semitones);
    transpose_text(text, semitones, Some(target.prefers_flats()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_shift_is_identity() {
        assert_eq!(transpose_chord("Bb", 0, Some(false)), "Bb");
        assert_eq!(transpose_chord("weird", 0, None), "weird");
        let text = "[Bb]odd [  spacing ]  \n\n[H]x";
        assert_eq!(transpose_lyrics(text, 0, Some(false)), text);
    }

    #[test]
    fn test_negative_shift() {
        assert_eq!(transpose_chord("C", -1, None), "B");
        assert_eq!(transpose_chord("D", -14, None), "C");
        assert_eq!(transpose_chord("Eb", -3, None), "C");
    }

    #[test]
    fn test_spelling_follows_root() {
        assert_eq!(transpose_chord("Bb", 1, None), "B");
        assert_eq!(transpose_chord("Eb", 1, None), "E");
        assert_eq!(transpose_chord("Ab", 1, None), "A");
        assert_eq!(transpose_chord("Bb", 3, None), "Db");
        assert_eq!(transpose_chord("A", 1, None), "A#");
        assert_eq!(transpose_chord("A", 1, Some(true)), "Bb");
        assert_eq!(transpose_chord("Bb", 3, Some(false)), "C#");
    }

    #[test]
    fn test_suffix_preserved() {
        assert_eq!(transpose_chord("Cmaj7", 2, None), "Dmaj7");
        assert_eq!(transpose_chord("F#m7b5", 1, None), "Gm7b5");
        assert_eq!(transpose_chord("Dsus4", 5, None), "Gsus4");
    }

    #[test]
    fn test_slash_chords() {
        assert_eq!(transpose_chord("C/G", 2, None), "D/A");
        assert_eq!(transpose_chord("D/F#", 1, None), "D#/G");
        assert_eq!(transpose_chord("Am7/G", 2, None), "Bm7/A");
        assert_eq!(transpose_chord("Bb/D", 2, None), "C/E");
        // the bass follows the spelling chosen for the root
        assert_eq!(transpose_chord("Eb/G", 1, None), "E/Ab");
    }

    #[test]
    fn test_unparseable_bass_passes_through() {
        assert_eq!(transpose_chord("C/X", 2, None), "D/X");
        assert_eq!(transpose_chord("C/", 2, None), "D/");
    }

    #[test]
    fn test_round_trip() {
        for chord in ["C", "C#m", "Dbmaj7", "G/B", "F#m7/C#", "Bbsus4", "Eadd9"] {
            for s in -13..=13 {
                let there = transpose_chord(chord, s, None);
                let back = transpose_chord(&there, -s, None);
                let back_split = parse_root(&back).unwrap();
                let orig_split = parse_root(chord).unwrap();
                assert_eq!(
                    crate::note::note_index(back_split.root),
                    crate::note::note_index(orig_split.root),
                    "{} by {} gave {} then {}",
                    chord,
                    s,
                    there,
                    back
                );
            }
        }
    }

    #[test]
    fn test_shifts_compose() {
        let lyrics = "[Am]Hello [G/B]world [F#m7]again";
        for a in -5..5 {
            for b in -5..5 {
                let stepwise = transpose_lyrics(&transpose_lyrics(lyrics, a, Some(false)), b, Some(false));
                let at_once = transpose_lyrics(lyrics, a + b, Some(false));
                if a + b != 0 {
                    assert_eq!(stepwise, at_once, "shift {} then {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_lyrics_leave_text_alone() {
        assert_eq!(
            transpose_lyrics("[Am]A capital [C]Bee", 2, None),
            "[Bm]A capital [D]Bee"
        );
    }

    #[test]
    fn test_section_markers_untouched() {
        let text = "[Intro]\n[Chorus]\n[Bridge] [G]x";
        assert_eq!(transpose_lyrics(text, 3, None), "[Intro]\n[Chorus]\n[Bridge] [A#]x");
    }

    #[test]
    fn test_transpose_text_chord_line_keeps_columns() {
        let sheet = "C     G     Am\nHello there friend";
        assert_eq!(
            transpose_text(sheet, 2, None),
            "D     A     Bm\nHello there friend"
        );
    }

    #[test]
    fn test_transpose_text_pushes_grown_chords() {
        // `C G` becomes `C# G#`, which no longer fits in one column gap
        assert_eq!(transpose_text("  C G", 1, Some(false)), "  C# G#");
    }

    #[test]
    fn test_transpose_text_keeps_stray_words_on_chord_line() {
        assert_eq!(transpose_text("G C D (x2)", 2, None), "A D E (x2)");
    }

    #[test]
    fn test_transpose_to_key_same_key_is_identity() {
        let lyrics = "[C]one [F]two [G]three [C]four";
        assert_eq!(transpose_to_key(lyrics, Key::C), lyrics);
    }
}
