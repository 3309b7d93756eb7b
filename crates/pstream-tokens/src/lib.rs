//! Token model and artifact reader for PowerShell token streams.
//!
//! The tokenizer runs out of process (a PowerShell script wrapping
//! `PSParser::Tokenize`) and writes one JSON record per token. This crate
//! defines the vocabulary for those records - [`TokenKind`], [`Token`],
//! [`Tokens`] - and the reader that turns an artifact file into a validated
//! [`Tokens`] collection. These types are used by:
//! - `pstream-metrics` for metric computation
//! - `pstream` for the CLI surface

mod reader;
mod token;

pub use reader::{MalformedTokenStream, parse_tokens, read_tokens};
pub use token::{Token, TokenKind, Tokens};
