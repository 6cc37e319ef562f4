//! # Chord Grammar
//!
//! Recognizes chord tokens and splits them into root, suffix and slash bass.
//!
//! ## Grammar
//! ```text
//! chord  := root suffix* ("/" root)?
//! root   := "A".."G" ("#" | "b")?
//! suffix := "maj" | "min" | "dim" | "aug" | "sus" | "add"
//!         | "11" | "13" | "m" | "6" | "7" | "9" | "2" | "4"
//! ```
//! Suffix atoms may repeat in any order (`Cmaj7`, `Dsus4`, `Am7add9`). They carry
//! no meaning here beyond the minor/diminished/augmented quality used by key
//! detection, and are always preserved verbatim.
//!
//! The grammar is strict: `[Chorus]` starts with a note letter but is
//! not a chord. Transposition uses the looser [`crate::note::parse_root`] so that
//! unusual chords like `C(add9)` still move, and skips bracket labels that
//! [`is_section_marker`] recognizes.

use crate::note::{normalize_note, parse_root};

/// Suffix atoms, longest first so `maj` is tried before `m`.
const SUFFIX_ATOMS: [&str; 14] = [
    "maj", "min", "dim", "aug", "sus", "add", "11", "13", "m", "6", "7", "9", "2", "4",
];

/// Suffix atoms that start with a lowercase letter; a root followed by any
/// other lowercase word is a section label such as `Chorus` or `Bridge`.
const WORD_ATOMS: [&str; 7] = ["maj", "min", "dim", "aug", "sus", "add", "m"];

/// Triad quality implied by a chord suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

/// A chord token that matches the strict grammar, borrowed from its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chord<'a> {
    pub root: &'a str,
    pub suffix: &'a str,
    pub bass: Option<&'a str>,
}

impl<'a> Chord<'a> {
    /// Parse a token against the strict chord grammar.
    ///
    /// # Examples
    /// ```
    /// use chordshift::Chord;
    ///
    /// let chord = Chord::parse("F#m7/C#").unwrap();
    /// assert_eq!(chord.root, "F#");
    /// assert_eq!(chord.suffix, "m7");
    /// assert_eq!(chord.bass, Some("C#"));
    ///
    /// assert!(Chord::parse("Chorus").is_none());
    /// ```
    pub fn parse(token: &'a str) -> Option<Chord<'a>> {
        let split = parse_root(token)?;
        let rest = split.rest;

        let mut pos = 0;
        while let Some(atom) = SUFFIX_ATOMS.iter().find(|a| rest[pos..].starts_with(*a)) {
            pos += atom.len();
        }
        let suffix = &rest[..pos];
        let tail = &rest[pos..];

        if tail.is_empty() {
            return Some(Chord {
                root: split.root,
                suffix,
                bass: None,
            });
        }

        let bass = parse_root(tail.strip_prefix('/')?)?;
        if !bass.rest.is_empty() {
            return None;
        }
        Some(Chord {
            root: split.root,
            suffix,
            bass: Some(bass.root),
        })
    }

    pub fn quality(&self) -> Quality {
        quality_of(self.suffix)
    }

    /// Root spelled from the sharp table, so `Db` and `C#` compare equal.
    pub fn normalized_root(&self) -> &'static str {
        // parse_root only yields spellings from the tables
        normalize_note(self.root).unwrap_or("C")
    }
}

/// True when `token` matches the strict chord grammar.
pub fn is_chord(token: &str) -> bool {
    Chord::parse(token).is_some()
}

/// Triad quality of a suffix: `m`/`min` are minor (but `maj` is not),
/// `dim` diminished, `aug` augmented, anything else major.
pub fn quality_of(suffix: &str) -> Quality {
    if suffix.starts_with("maj") {
        Quality::Major
    } else if suffix.starts_with('m') {
        Quality::Minor
    } else if suffix.starts_with("dim") {
        Quality::Diminished
    } else if suffix.starts_with("aug") {
        Quality::Augmented
    } else {
        Quality::Major
    }
}

/// True for bracket labels that mark song structure rather than a chord.
///
/// A label is a section marker when it has no root at all (`Verse 1`, `Intro`)
/// or when its root letter starts a lowercase word that no chord suffix begins
/// (`Chorus`, `Bridge`, `Ending`).
///
/// # Examples
/// ```
/// use chordshift::is_section_marker;
///
/// assert!(is_section_marker("Chorus"));
/// assert!(is_section_marker("Verse 1"));
/// assert!(!is_section_marker("Am7"));
/// assert!(!is_section_marker("C(add9)"));
/// ```
pub fn is_section_marker(label: &str) -> bool {
    let Some(split) = parse_root(label.trim()) else {
        return true;
    };
    match split.rest.chars().next() {
        Some(c) if c.is_ascii_lowercase() => {
            !WORD_ATOMS.iter().any(|atom| split.rest.starts_with(atom))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_chords() {
        for token in [
            "C", "Am", "G7", "Cmaj7", "Dsus4", "Esus2", "F#m", "Bbmaj9", "Ddim", "Caug",
            "Gadd9", "Am11", "C13", "D6", "Ebmin", "G/B", "D/F#", "Am7/G", "Dbm/Ab",
        ] {
            assert!(is_chord(token), "{} should be a chord", token);
        }
    }

    #[test]
    fn test_non_chords() {
        for token in [
            "", "Chorus", "Intro", "Verse", "H7", "am", "C#11#5", "C/", "C/H", "G/Bm",
            "hello", "[G]", "A.", "Cx",
        ] {
            assert!(!is_chord(token), "{} should not be a chord", token);
        }
    }

    #[test]
    fn test_parse_splits_parts() {
        let chord = Chord::parse("Bbmaj7").unwrap();
        assert_eq!(chord.root, "Bb");
        assert_eq!(chord.suffix, "maj7");
        assert_eq!(chord.bass, None);
        assert_eq!(chord.normalized_root(), "A#");

        let slash = Chord::parse("G/B").unwrap();
        assert_eq!(slash.root, "G");
        assert_eq!(slash.suffix, "");
        assert_eq!(slash.bass, Some("B"));
    }

    #[test]
    fn test_quality() {
        assert_eq!(quality_of(""), Quality::Major);
        assert_eq!(quality_of("7"), Quality::Major);
        assert_eq!(quality_of("maj7"), Quality::Major);
        assert_eq!(quality_of("sus4"), Quality::Major);
        assert_eq!(quality_of("m"), Quality::Minor);
        assert_eq!(quality_of("m7"), Quality::Minor);
        assert_eq!(quality_of("min"), Quality::Minor);
        assert_eq!(quality_of("dim"), Quality::Diminished);
        assert_eq!(quality_of("aug"), Quality::Augmented);
    }

    #[test]
    fn test_section_markers() {
        for label in ["Chorus", "Bridge", "Verse 1", "Intro", "Ending", "Coda", "Outro", "x2"] {
            assert!(is_section_marker(label), "{} should be a section marker", label);
        }
        for label in ["C", "Am", "Bbmaj7", "Dsus4", "Gadd9", "C(add9)", "CM7", "G/B", "Edim"] {
            assert!(!is_section_marker(label), "{} should not be a section marker", label);
        }
    }
}
