//! Roster loaders.
//!
//! Two file formats are supported:
//!
//! - **JSON**: `{"participants": [{"name": ..., "email": ...}], "exclusions": [["a", "b"]]}`
//! - **TSV/CSV**: one participant per line, columns `name`, `email`, and an
//!   optional `partner` who is excluded from being matched with them
//!
//! ## Example
//!
//! ```rust
//! use secret_santa::parsing::tsv::parse_roster_text;
//!
//! let text = "name\temail\tpartner\njohan\tjohan@example.org\tlouise\nlouise\tlouise@example.org\n";
//! let roster = parse_roster_text(text, '\t').unwrap();
//! assert_eq!(roster.len(), 2);
//! assert_eq!(roster.exclusions.len(), 1);
//! ```

use std::path::Path;
use thiserror::Error;

use crate::core::roster::Roster;

pub mod json;
pub mod tsv;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid roster format: {0}")]
    InvalidFormat(String),

    #[error("Invalid JSON roster: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported roster format: {0}")]
    UnsupportedFormat(String),

    #[error("Too many participants: more than {0} entries")]
    TooManyParticipants(usize),
}

/// Load a roster, choosing the parser from the file extension
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` for unknown extensions, or the
/// underlying parser's error.
pub fn parse_roster_file(path: &Path) -> Result<Roster, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("json") => json::parse_roster_file(path),
        Some("tsv" | "txt") => tsv::parse_roster_file(path, '\t'),
        Some("csv") => tsv::parse_roster_file(path, ','),
        Some(other) => Err(ParseError::UnsupportedFormat(other.to_string())),
        None => Err(ParseError::UnsupportedFormat(path.display().to_string())),
    }
}
