use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use chordshift::{
    parse_lyrics, parse_song, to_chord_sheet, to_inline, transpose_text, ChordError, Key,
};

#[derive(Parser)]
#[command(name = "chordshift", about = "Transpose and reformat chord lyrics")]
#[command(version)]
struct Cli {
    /// Log conversion and key detection details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the key of a song (declared in its frontmatter, else detected)
    Key {
        /// Song file, stdin when absent
        file: Option<PathBuf>,
    },

    /// Transpose every chord of a song
    Transpose {
        /// Song file, stdin when absent
        file: Option<PathBuf>,

        /// Shift by this many semitones (may be negative)
        #[arg(
            short,
            long,
            allow_negative_numbers = true,
            conflicts_with = "to",
            required_unless_present = "to"
        )]
        semitones: Option<i32>,

        /// Transpose from the song's key into this key
        #[arg(short, long)]
        to: Option<Key>,

        /// Spell with flats
        #[arg(long, conflicts_with = "sharps")]
        flats: bool,

        /// Spell with sharps
        #[arg(long)]
        sharps: bool,
    },

    /// Lay inline lyrics out as chords over lyrics
    Sheet {
        /// Song file, stdin when absent
        file: Option<PathBuf>,
    },

    /// Convert a chord sheet to inline lyrics
    Inline {
        /// Song file, stdin when absent
        file: Option<PathBuf>,
    },

    /// Print the tokenized lines as JSON
    Tokens {
        /// Song file, stdin when absent
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), ChordError> {
    match command {
        Command::Key { file } => {
            let song = parse_song(&read_source(file.as_deref())?)?;
            println!("{}", song.key());
        }
        Command::Transpose {
            file,
            semitones,
            to,
            flats,
            sharps,
        } => {
            let mut song = parse_song(&read_source(file.as_deref())?)?;
            let spelling = match (flats, sharps) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };

            let (shift, use_flats) = match to {
                Some(target) => {
                    let shift = song.key().semitones_to(target);
                    (shift, Some(spelling.unwrap_or(target.prefers_flats())))
                }
                None => (semitones.unwrap_or(0), spelling),
            };

            if let Some(declared) = song.declared_key {
                song.declared_key = Some(Key::from_semitone(declared.tonic() as i32 + shift));
            }
            song.lyrics = transpose_text(&song.lyrics, shift, use_flats);
            print!("{}", song.to_source());
        }
        Command::Sheet { file } => {
            let song = parse_song(&read_source(file.as_deref())?)?;
            print!("{}", to_chord_sheet(&song.lyrics));
        }
        Command::Inline { file } => {
            let song = parse_song(&read_source(file.as_deref())?)?;
            print!("{}", to_inline(&song.lyrics));
        }
        Command::Tokens { file } => {
            let song = parse_song(&read_source(file.as_deref())?)?;
            let lines = parse_lyrics(&song.lyrics);
            // Vec of plain structs with string keys
            let json = serde_json::to_string_pretty(&lines).unwrap_or_default();
            println!("{}", json);
        }
    }
    Ok(())
}

fn read_source(file: Option<&Path>) -> Result<String, ChordError> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|source| ChordError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| ChordError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(buf)
        }
    }
}
