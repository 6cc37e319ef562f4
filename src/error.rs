//! # Error Types
//!
//! This module defines the error type for chordshift.
//!
//! The lyric operations themselves (transposition, key detection, conversion,
//! tokenizing) never fail: malformed chords pass through unchanged. Errors only
//! come from the edges of the library:
//! - `UnknownKey` - a key name that does not name any pitch class
//! - `MetadataError` - invalid YAML frontmatter in a song document
//! - `Io` - reading a song file from the command line
//!
//! ## Usage
//! ```rust
//! use chordshift::{ChordError, Key};
//!
//! match "H".parse::<Key>() {
//!     Ok(key) => println!("Key of {}", key),
//!     Err(ChordError::UnknownKey(name)) => eprintln!("No such key: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    /// A key name that is not a spelling of any of the twelve pitch classes.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::UnknownKey("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown key: H");
    /// ```
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// Invalid metadata error.
    ///
    /// Occurs when the YAML frontmatter of a song is malformed.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::MetadataError("title must be a string".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: title must be a string");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    #[error("Error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
