//! Reader for serialized token artifacts.
//!
//! The artifact is JSON Lines: one object per token, in stream order, e.g.
//!
//! ```text
//! {"kind":"Keyword","text":"if","line":1,"column":1,"endLine":1,"endColumn":3}
//! ```
//!
//! A malformed artifact fails the whole file; callers log and skip it rather
//! than aborting the run.

use std::fs;
use std::path::Path;

use crate::{Token, Tokens};

/// Structural failure while parsing a token artifact. `record` is the 1-based
/// line number within the artifact, for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum MalformedTokenStream {
    #[error("failed to read token artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("record {record}: {source}")]
    Record {
        record: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {record}: token on line {line} precedes earlier line {previous}")]
    OutOfOrder {
        record: usize,
        line: usize,
        previous: usize,
    },

    #[error("record {record}: invalid token position (positions are 1-based, end >= start)")]
    Position { record: usize },
}

/// Upper bound on line numbers accepted from an artifact. The line index in
/// [`Tokens`] allocates per line, so an absurd `endLine` in a corrupt record
/// must be rejected here rather than turned into a giant allocation.
const MAX_LINE: usize = 10_000_000;

/// Read and validate a token artifact file.
pub fn read_tokens(path: &Path) -> Result<Tokens, MalformedTokenStream> {
    let raw = fs::read_to_string(path)?;
    parse_tokens(&raw)
}

/// Parse a token artifact from memory.
///
/// Validates that every record deserializes, that token line numbers are
/// monotonic non-decreasing, and that positions are 1-based with end not
/// before start. Blank artifact lines are tolerated; an empty artifact yields
/// an empty, valid [`Tokens`].
pub fn parse_tokens(raw: &str) -> Result<Tokens, MalformedTokenStream> {
    let mut tokens = Vec::new();
    let mut previous = 0usize;
    // str::lines handles both LF and CRLF artifacts.
    for (idx, raw_line) in raw.lines().enumerate() {
        let record = idx + 1;
        if raw_line.trim().is_empty() {
            continue;
        }
        let token: Token = serde_json::from_str(raw_line)
            .map_err(|source| MalformedTokenStream::Record { record, source })?;
        if token.line == 0
            || token.column == 0
            || token.end_column == 0
            || token.end_line < token.line
            || token.end_line > MAX_LINE
            || (token.end_line == token.line && token.end_column < token.column)
        {
            return Err(MalformedTokenStream::Position { record });
        }
        if token.line < previous {
            return Err(MalformedTokenStream::OutOfOrder {
                record,
                line: token.line,
                previous,
            });
        }
        previous = token.line;
        tokens.push(token);
    }
    Ok(Tokens::new(tokens))
}
