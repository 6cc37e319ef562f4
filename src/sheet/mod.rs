//! # Chord Sheet Conversion
//!
//! Converts between canonical inline lyrics and the chord-over-lyrics layout
//! people type and read:
//! ```text
//! inline:   [G]Amazing [C]grace how [D]sweet
//!
//! sheet:    G       C         D
//!           Amazing grace how sweet
//! ```
//!
//! ## Chord Lines
//! A line is a chord line when at least 60% of its whitespace-separated tokens are
//! chords. The slack lets a line like `G C D (x2)` count while `A long time ago`
//! does not.
//!
//! ## Sheet -> Inline ([`to_inline`])
//! Lines are walked top to bottom:
//! - a chord line followed by a non-blank, non-chord line is a pair: each chord
//!   is spliced into the lyric at its column (clamped to the lyric length), with a
//!   space between chords that land on the same column
//! - a chord line with nothing to sit on becomes `[G] [C] [D]`
//! - blank lines become empty lines; everything else is kept as is
//!
//! ## Inline -> Sheet ([`to_chord_sheet`])
//! Each line with chord markers is split into a chord line and a lyric line,
//! chords placed at the column of the text that follows them. Bracket labels
//! that are not chords (`[Chorus]`) stay in the lyric line as written.
//!
//! A line is only laid out over two lines when reading the result back gives the
//! same inline line; otherwise it is kept inline. Chord labels wider than their
//! syllable (`[Am]I [G]love`) and chord-only lines that would glue onto the
//! lyric below are the usual cases. This keeps
//! `to_inline(to_chord_sheet(x)) == x` for any `x` produced by [`to_inline`].
//!
//! Columns are counted in characters, not bytes.

use serde::Serialize;

use crate::chord::is_chord;
use crate::lyrics::{segments, Segment};


/// Share of chord tokens at which a line counts as a chord line.
pub const CHORD_LINE_RATIO: f64 = 0.6;

/// A chord label and the character column it starts at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordPosition {
    pub chord: String,
    pub column: usize,
}

/// How the editor preview shows a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Lyrics,
    Chords,
    Empty,
}

/// One rendered line of the editor preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLine {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub text: String,
    pub chords: Vec<ChordPosition>,
}

/// Whitespace-separated tokens with their character column.
pub fn words(line: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (column, (byte, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            if let Some((col, from)) = start.take() {
                out.push((col, &line[from..byte]));
            }
        } else if start.is_none() {
            start = Some((column, byte));
        }
    }
    if let Some((col, from)) = start {
        out.push((col, &line[from..]));
    }
    out
}

/// True when at least 60% of the line's tokens are chords.
///
/// # Examples
/// ```
/// use chordshift::is_chord_line;
///
/// assert!(is_chord_line("G   C   D"));
/// assert!(is_chord_line("G C D (x2)"));
/// assert!(!is_chord_line("Amazing grace"));
/// assert!(!is_chord_line("   "));
/// ```
pub fn is_chord_line(line: &str) -> bool {
    let tokens = words(line);
    if tokens.is_empty() {
        return false;
    }
    let chords = tokens.iter().filter(|(_, word)| is_chord(word)).count();
    chords as f64 / tokens.len() as f64 >= CHORD_LINE_RATIO
}

/// Chords of a chord line and their columns, left to right.
pub fn chord_positions(chord_line: &str) -> Vec<ChordPosition> {
    words(chord_line)
        .into_iter()
        .filter(|(_, word)| is_chord(word))
        .map(|(column, word)| ChordPosition {
            chord: word.to_string(),
            column,
        })
        .collect()
}

/// Splice chords into a lyric line at their columns.
///
/// Columns past the end of the lyric clamp to its end. Two chords on the same
/// column are separated by a space.
///
/// # Examples
/// ```
/// use chordshift::sheet::{chord_positions, merge_chords};
///
/// let chords = chord_positions("G       C");
/// assert_eq!(merge_chords(&chords, "Amazing grace"), "[G]Amazing [C]grace");
/// ```
pub fn merge_chords(positions: &[ChordPosition], lyric: &str) -> String {
    if positions.is_empty() {
        return lyric.to_string();
    }

    let mut sorted: Vec<&ChordPosition> = positions.iter().collect();
    sorted.sort_by_key(|p| p.column);

    let chars: Vec<char> = lyric.chars().collect();
    let mut out = String::with_capacity(lyric.len() + positions.len() * 4);
    let mut last = 0;

    for (idx, position) in sorted.into_iter().enumerate() {
        let column = position.column.min(chars.len());
        if column > last {
            out.extend(&chars[last..column]);
        } else if idx > 0 {
            out.push(' ');
        }
        out.push('[');
        out.push_str(&position.chord);
        out.push(']');
        last = column;
    }

    out.extend(&chars[last..]);
    out
}

/// A chord line with no lyric under it, as `[G] [C] [D]`.
fn standalone_chords(chord_line: &str) -> String {
    chord_positions(chord_line)
        .iter()
        .map(|p| format!("[{}]", p.chord))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert chord-over-lyrics text to canonical inline lyrics.
///
/// Lines that are already inline, and plain text, pass through unchanged.
///
/// # Examples
/// ```
/// use chordshift::to_inline;
///
/// let sheet = "G       C\nAmazing grace\n\nD  G";
/// assert_eq!(to_inline(sheet), "[G]Amazing [C]grace\n\n[D] [G]");
/// ```
pub fn to_inline(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            out.push(String::new());
            i += 1;
        } else if is_chord_line(line) {
            match lines.get(i + 1) {
                Some(next) if !next.trim().is_empty() && !is_chord_line(next) => {
                    out.push(merge_chords(&chord_positions(line), next));
                    i += 2;
                }
                _ => {
                    out.push(standalone_chords(line));
                    i += 1;
                }
            }
        } else {
            out.push(line.to_string());
            i += 1;
        }
    }

    out.join("\n")
}

/// Lyric text of an inline line, with its chords at the columns they attach to.
///
/// Markers that are not chords stay in the text as written.
pub fn inline_positions(line: &str) -> (String, Vec<ChordPosition>) {
    segments(line).into_iter().fold(
        (String::new(), Vec::new()),
        |(mut lyric, mut chords), segment| {
            match segment {
                Segment::Text(text) => lyric.push_str(text),
                Segment::Marker(label) if is_chord(label) => chords.push(ChordPosition {
                    chord: label.to_string(),
                    column: lyric.chars().count(),
                }),
                Segment::Marker(label) => {
                    lyric.push('[');
                    lyric.push_str(label);
                    lyric.push(']');
                }
            }
            (lyric, chords)
        },
    )
}

/// Lay chords out on one line, each at its column or one space after the
/// previous chord, whichever is further right.
fn render_chord_line(positions: &[ChordPosition]) -> String {
    let mut out = String::new();
    let mut width = 0;

    for (idx, position) in positions.iter().enumerate() {
        let column = if idx == 0 {
            position.column
        } else {
            position.column.max(width + 1)
        };
        out.extend(std::iter::repeat(' ').take(column - width));
        out.push_str(&position.chord);
        width = column + position.chord.chars().count();
    }
    out
}

/// True when `to_inline` would read `line` as the lyric under a chord line.
fn would_pair(line: Option<&String>) -> bool {
    line.is_some_and(|l| !l.trim().is_empty() && !is_chord_line(l))
}

/// Convert inline lyrics to chord-over-lyrics layout for display and editing.
///
/// # Examples
/// ```
/// use chordshift::to_chord_sheet;
///
/// assert_eq!(
///     to_chord_sheet("[G]Amazing [C]grace\n[Chorus]"),
///     "G       C\nAmazing grace\n[Chorus]"
/// );
/// ```
pub fn to_chord_sheet(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // Built bottom-up so each line knows what is emitted right below it.
    let mut reversed: Vec<String> = Vec::new();

    for line in text.split('\n').rev() {
        let (lyric, positions) = inline_positions(line);
        if positions.is_empty() {
            reversed.push(line.to_string());
            continue;
        }

        let chord_line = render_chord_line(&positions);
        if lyric.trim().is_empty() {
            let reads_back = standalone_chords(&chord_line) == line;
            if reads_back && !would_pair(reversed.last()) {
                reversed.push(chord_line);
            } else {
                log::debug!("keeping chord-only line inline: {:?}", line);
                reversed.push(line.to_string());
            }
        } else if !is_chord_line(&lyric)
            && merge_chords(&chord_positions(&chord_line), &lyric) == line
        {
            reversed.push(lyric);
            reversed.push(chord_line);
        } else {
            log::debug!("keeping line inline: {:?}", line);
            reversed.push(line.to_string());
        }
    }

    reversed.reverse();
    reversed.join("\n")
}

/// Classify each line of an editor sheet for the preview pane.
///
/// Chord lines with a lyric below are folded into that lyric line; inline
/// markers are lifted out of the text into chord positions.
///
/// # Examples
/// ```
/// use chordshift::sheet::{preview, LineKind};
///
/// let lines = preview("G       C\nAmazing grace\n\nD  G");
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[0].kind, LineKind::Lyrics);
/// assert_eq!(lines[0].text, "Amazing grace");
/// assert_eq!(lines[0].chords[1].column, 8);
/// assert_eq!(lines[1].kind, LineKind::Empty);
/// assert_eq!(lines[2].kind, LineKind::Chords);
/// ```
pub fn preview(text: &str) -> Vec<SheetLine> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            out.push(SheetLine {
                kind: LineKind::Empty,
                text: String::new(),
                chords: Vec::new(),
            });
            i += 1;
            continue;
        }

        if is_chord_line(line) {
            match lines.get(i + 1) {
                Some(next) if !next.trim().is_empty() && !is_chord_line(next) => {
                    out.push(SheetLine {
                        kind: LineKind::Lyrics,
                        text: next.to_string(),
                        chords: chord_positions(line),
                    });
                    i += 2;
                }
                _ => {
                    out.push(SheetLine {
                        kind: LineKind::Chords,
                        text: line.to_string(),
                        chords: chord_positions(line),
                    });
                    i += 1;
                }
            }
            continue;
        }

        let (text, chords) = inline_positions(line);
        out.push(SheetLine {
            kind: LineKind::Lyrics,
            text,
            chords,
        });
        i += 1;
    }

    out
}
