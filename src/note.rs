//! # Note Model
//!
//! Chromatic scale tables and root-note parsing shared by every other module.
//!
//! ## Spelling Tables
//! Two parallel tables index the twelve pitch classes by semitone (C = 0):
//! ```text
//! index:  0  1   2  3   4  5  6   7  8   9  10  11
//! sharp:  C  C#  D  D#  E  F  F#  G  G#  A  A#  B
//! flat:   C  Db  D  Eb  E  F  Gb  G  Ab  A  Bb  B
//! ```
//! `SHARP_NOTES[i]` and `FLAT_NOTES[i]` always name the same pitch class, so
//! enharmonic pairs (C#/Db, D#/Eb, F#/Gb, G#/Ab, A#/Bb) compare equal once
//! looked up through [`note_index`].
//!
//! ## Root Parsing
//! [`parse_root`] tries a two-character spelling first (`C#`, `Db`) and only then
//! a natural note (`C`). The order matters: matching `C` first would split
//! `C#m` into root `C` and rest `#m`.
//!
//! Matching is exact and case-sensitive. `c`, `H` or `3` are not roots.

/// Sharp spellings indexed by semitone.
pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings indexed by semitone.
pub const FLAT_NOTES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Pitch classes whose conventional spelling is flat (Db, Eb, F, Ab, Bb).
const FLAT_SEMITONES: [usize; 5] = [1, 3, 5, 8, 10];

/// A chord token split into its root spelling and everything after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootSplit<'a> {
    pub root: &'a str,
    pub rest: &'a str,
}

/// Semitone (0..11) of a spelled note, looked up in the sharp table then the flat table.
///
/// Returns `None` for anything that is not an exact spelling from either table.
///
/// # Examples
/// ```
/// use chordshift::note::note_index;
///
/// assert_eq!(note_index("C#"), Some(1));
/// assert_eq!(note_index("Db"), Some(1));
/// assert_eq!(note_index("B"), Some(11));
/// assert_eq!(note_index("c"), None);
/// ```
pub fn note_index(note: &str) -> Option<usize> {
    SHARP_NOTES
        .iter()
        .position(|&n| n == note)
        .or_else(|| FLAT_NOTES.iter().position(|&n| n == note))
}

/// Split a chord token into root and rest.
///
/// # Examples
/// ```
/// use chordshift::note::parse_root;
///
/// let split = parse_root("C#m7").unwrap();
/// assert_eq!(split.root, "C#");
/// assert_eq!(split.rest, "m7");
///
/// assert!(parse_root("Verse 1").is_none());
/// assert!(parse_root("").is_none());
/// ```
pub fn parse_root(token: &str) -> Option<RootSplit<'_>> {
    if let Some(two) = token.get(..2) {
        if note_index(two).is_some() {
            return Some(RootSplit {
                root: two,
                rest: &token[2..],
            });
        }
    }

    let one = token.get(..1)?;
    if SHARP_NOTES.contains(&one) {
        return Some(RootSplit {
            root: one,
            rest: &token[1..],
        });
    }
    None
}

/// True when the note is spelled with a flat (`Bb`, `Eb`), false for `B` itself.
pub fn is_flat_spelling(note: &str) -> bool {
    note.as_bytes().get(1) == Some(&b'b')
}

/// Spelling of a semitone from the sharp or flat table. The index wraps modulo 12.
pub fn spell(semitone: usize, use_flats: bool) -> &'static str {
    let idx = semitone % 12;
    if use_flats {
        FLAT_NOTES[idx]
    } else {
        SHARP_NOTES[idx]
    }
}

/// Collapse any spelling to its sharp-table equivalent (`Db` -> `C#`).
pub fn normalize_note(note: &str) -> Option<&'static str> {
    note_index(note).map(|idx| SHARP_NOTES[idx])
}

/// Shift a spelled note by `semitones`, wrapping into 0..11.
///
/// Unknown spellings yield `None`.
pub fn transpose_note(note: &str, semitones: i32, use_flats: bool) -> Option<&'static str> {
    let idx = note_index(note)? as i32;
    let shifted = (idx + semitones).rem_euclid(12) as usize;
    Some(spell(shifted, use_flats))
}

/// Semitone distance going up from `from` to `to`, always 0..11.
///
/// Unknown spellings give 0, so a bad key name never moves any chord.
pub fn semitone_diff(from: &str, to: &str) -> i32 {
    match (note_index(from), note_index(to)) {
        (Some(a), Some(b)) => (b as i32 - a as i32).rem_euclid(12),
        _ => 0,
    }
}

/// Whether the pitch class `semitone` is conventionally written with flats.
pub fn flats_for_semitone(semitone: i32) -> bool {
    FLAT_SEMITONES.contains(&(semitone.rem_euclid(12) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_enharmonic() {
        for i in 0..12 {
            assert_eq!(note_index(SHARP_NOTES[i]), note_index(FLAT_NOTES[i]));
            assert_eq!(normalize_note(FLAT_NOTES[i]), Some(SHARP_NOTES[i]));
        }
    }

    #[test]
    fn test_note_index_is_exact() {
        assert_eq!(note_index("A"), Some(9));
        assert_eq!(note_index("Bb"), Some(10));
        assert_eq!(note_index("bb"), None);
        assert_eq!(note_index("Cb"), None);
        assert_eq!(note_index("C# "), None);
    }

    #[test]
    fn test_parse_root_prefers_two_chars() {
        assert_eq!(
            parse_root("C#"),
            Some(RootSplit { root: "C#", rest: "" })
        );
        assert_eq!(
            parse_root("Bbm7"),
            Some(RootSplit { root: "Bb", rest: "m7" })
        );
        // `Bm` is not a spelling, so fall back to the natural B
        assert_eq!(
            parse_root("Bm"),
            Some(RootSplit { root: "B", rest: "m" })
        );
        assert_eq!(
            parse_root("G/B"),
            Some(RootSplit { root: "G", rest: "/B" })
        );
    }

    #[test]
    fn test_parse_root_rejects_non_notes() {
        assert_eq!(parse_root(""), None);
        assert_eq!(parse_root("H"), None);
        assert_eq!(parse_root("7"), None);
        assert_eq!(parse_root("am"), None);
        assert_eq!(parse_root("Intro"), None);
    }

    #[test]
    fn test_parse_root_handles_multibyte_input() {
        assert_eq!(parse_root("é"), None);
        assert_eq!(
            parse_root("Cé"),
            Some(RootSplit { root: "C", rest: "é" })
        );
    }

    #[test]
    fn test_is_flat_spelling() {
        assert!(is_flat_spelling("Bb"));
        assert!(is_flat_spelling("Eb"));
        assert!(!is_flat_spelling("B"));
        assert!(!is_flat_spelling("F#"));
        assert!(!is_flat_spelling(""));
    }

    #[test]
    fn test_transpose_note_wraps() {
        assert_eq!(transpose_note("B", 1, false), Some("C"));
        assert_eq!(transpose_note("C", -1, false), Some("B"));
        assert_eq!(transpose_note("A", 1, true), Some("Bb"));
        assert_eq!(transpose_note("A", 13, false), Some("A#"));
        assert_eq!(transpose_note("X", 1, false), None);
    }

    #[test]
    fn test_semitone_diff() {
        assert_eq!(semitone_diff("C", "G"), 7);
        assert_eq!(semitone_diff("G", "C"), 5);
        assert_eq!(semitone_diff("Db", "C#"), 0);
        assert_eq!(semitone_diff("C", "H"), 0);
    }

    #[test]
    fn test_flats_for_semitone() {
        assert!(flats_for_semitone(10)); // Bb
        assert!(flats_for_semitone(-2)); // Bb again
        assert!(!flats_for_semitone(6)); // F#
        assert!(!flats_for_semitone(0));
    }
}
