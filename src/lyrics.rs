//! # Lyrics Tokenizer
//!
//! Splits canonical inline lyrics into (chord, text) pairs for rendering.
//!
//! ## Markers
//! A marker is `[` followed by at least one character and the nearest `]`.
//! Anything else (a lone `[`, an empty `[]`) is ordinary text. The same scanner
//! drives transposition and the chord-sheet converter, so every module agrees on
//! where the markers are.
//!
//! ## Tokens
//! ```text
//! "[Am]Hello [G]world"  ->  ("Am", "Hello ") ("G", "world")
//! "Intro [C][G]"        ->  ("", "Intro ") ("C", "") ("G", "")
//! ```
//! A chord with no text before the next marker or the line end still produces a
//! token with empty text, so it can float above a line break. Concatenating the
//! `text` fields always gives back the plain lyric.

use serde::Serialize;

/// A piece of an inline lyrics line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Contents of a `[...]` marker, without the brackets.
    Marker(&'a str),
}

/// One chord and the text it sits above. `chord` is empty for text with no chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordToken {
    pub chord: String,
    pub text: String,
}

/// A tokenized line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLine {
    pub tokens: Vec<ChordToken>,
    pub has_chords: bool,
}

impl ParsedLine {
    /// The line with all markers removed.
    pub fn plain_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Split a line into text and marker segments, left to right.
///
/// Empty text segments are not produced.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut search = 0;

    while let Some(open) = line[search..].find('[').map(|i| search + i) {
        let Some(close) = line[open + 1..].find(']').map(|i| open + 1 + i) else {
            break;
        };
        if close == open + 1 {
            // `[]` is text; keep scanning after it
            search = close + 1;
            continue;
        }
        if open > text_start {
            out.push(Segment::Text(&line[text_start..open]));
        }
        out.push(Segment::Marker(&line[open + 1..close]));
        text_start = close + 1;
        search = close + 1;
    }

    if text_start < line.len() {
        out.push(Segment::Text(&line[text_start..]));
    }
    out
}

/// Tokenize one line of inline lyrics.
///
/// # Examples
/// ```
/// use chordshift::parse_lyrics_line;
///
/// let line = parse_lyrics_line("[Am]Hello [G]world");
/// assert!(line.has_chords);
/// assert_eq!(line.tokens.len(), 2);
/// assert_eq!(line.tokens[0].chord, "Am");
/// assert_eq!(line.tokens[0].text, "Hello ");
/// assert_eq!(line.plain_text(), "Hello world");
/// ```
pub fn parse_lyrics_line(line: &str) -> ParsedLine {
    let mut tokens = Vec::new();
    let mut pending: Option<&str> = None;
    let mut has_chords = false;

    for segment in segments(line) {
        match segment {
            Segment::Marker(chord) => {
                if let Some(prev) = pending.replace(chord) {
                    tokens.push(ChordToken {
                        chord: prev.to_string(),
                        text: String::new(),
                    });
                }
                has_chords = true;
            }
            Segment::Text(text) => tokens.push(ChordToken {
                chord: pending.take().unwrap_or_default().to_string(),
                text: text.to_string(),
            }),
        }
    }
    if let Some(chord) = pending {
        tokens.push(ChordToken {
            chord: chord.to_string(),
            text: String::new(),
        });
    }

    ParsedLine { tokens, has_chords }
}

/// Tokenize every line of a lyrics blob.
pub fn parse_lyrics(text: &str) -> Vec<ParsedLine> {
    text.split('\n').map(parse_lyrics_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(line: &ParsedLine) -> Vec<(&str, &str)> {
        line.tokens
            .iter()
            .map(|t| (t.chord.as_str(), t.text.as_str()))
            .collect()
    }

    #[test]
    fn test_segments_basic() {
        assert_eq!(
            segments("a [G]b"),
            vec![Segment::Text("a "), Segment::Marker("G"), Segment::Text("b")]
        );
    }

    #[test]
    fn test_segments_malformed_brackets_are_text() {
        assert_eq!(segments("a [] b"), vec![Segment::Text("a [] b")]);
        assert_eq!(segments("open [G"), vec![Segment::Text("open [G")]);
        assert_eq!(
            segments("[] [C]x"),
            vec![Segment::Text("[] "), Segment::Marker("C"), Segment::Text("x")]
        );
        // the nearest `]` closes the marker
        assert_eq!(
            segments("[[G]]"),
            vec![Segment::Marker("[G"), Segment::Text("]")]
        );
    }

    #[test]
    fn test_tokens_with_leading_text() {
        let line = parse_lyrics_line("Oh [D]happy day");
        assert_eq!(pairs(&line), vec![("", "Oh "), ("D", "happy day")]);
        assert!(line.has_chords);
    }

    #[test]
    fn test_floating_chords() {
        let line = parse_lyrics_line("end [C][G]");
        assert_eq!(pairs(&line), vec![("", "end "), ("C", ""), ("G", "")]);
        assert_eq!(line.plain_text(), "end ");
    }

    #[test]
    fn test_adjacent_chords_before_text() {
        let line = parse_lyrics_line("[Am][G]hello");
        assert_eq!(pairs(&line), vec![("Am", ""), ("G", "hello")]);
    }

    #[test]
    fn test_plain_and_empty_lines() {
        let plain = parse_lyrics_line("no chords here");
        assert_eq!(pairs(&plain), vec![("", "no chords here")]);
        assert!(!plain.has_chords);

        let empty = parse_lyrics_line("");
        assert!(empty.tokens.is_empty());
        assert!(!empty.has_chords);
    }

    #[test]
    fn test_chord_only_line_has_chords() {
        let line = parse_lyrics_line("[G]");
        assert_eq!(pairs(&line), vec![("G", "")]);
        assert!(line.has_chords);
        assert_eq!(line.plain_text(), "");
    }

    #[test]
    fn test_parse_lyrics_keeps_line_count() {
        let lines = parse_lyrics("[C]one\n\n[G]two");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].tokens.is_empty());
        assert_eq!(lines[2].plain_text(), "two");
    }
}
