//! Normalized token sequence for copy/paste detection.
//!
//! Two blocks that differ only in variable names or literal values should
//! normalize to identical unit sequences, so the duplication engine can match
//! them across files. Comments and layout tokens never take part in matching.

use serde::Serialize;

use crate::{Filler, FillerError, Metric};
use pstream_tokens::{Token, TokenKind, Tokens};

/// One normalized token with its original source anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct CpdUnit {
    /// Normalized text: placeholder for names and literals, verbatim otherwise.
    pub image: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

/// Normalization table. Fixed per kind so the output is deterministic:
/// variables and literals collapse to a placeholder, structural tokens
/// (keywords, operators, commands, delimiters) keep their text.
fn image(token: &Token) -> String {
    match token.kind {
        TokenKind::Variable => "$ID".to_string(),
        TokenKind::String => "$STR".to_string(),
        TokenKind::Number => "$NUM".to_string(),
        _ => token.text.clone(),
    }
}

/// CPD filler.
pub struct CpdFiller;

impl CpdFiller {
    pub fn units(&self, tokens: &Tokens) -> Vec<CpdUnit> {
        tokens
            .iter()
            .filter(|t| !t.kind.is_layout() && t.kind != TokenKind::Comment)
            .map(|t| CpdUnit {
                image: image(t),
                line: t.line,
                column: t.column,
                end_line: t.end_line,
                end_column: t.end_column,
            })
            .collect()
    }
}

impl Filler for CpdFiller {
    fn name(&self) -> &'static str {
        "cpd"
    }

    fn fill(&self, tokens: &Tokens) -> Result<Metric, FillerError> {
        Ok(Metric::Cpd(self.units(tokens)))
    }
}
