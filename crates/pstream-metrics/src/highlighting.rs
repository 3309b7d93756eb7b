//! Token-kind-to-highlight-category spans for syntax coloring.

use serde::Serialize;

use crate::{Filler, FillerError, Metric};
use pstream_tokens::{TokenKind, Tokens};

/// Highlight category for a source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    Keyword,
    /// Secondary keywords: command parameters like `-Recurse`.
    KeywordLight,
    Comment,
    String,
    Constant,
    Variable,
    /// Attributes and type literals: `[Parameter()]`, `[int]`.
    Annotation,
    /// Catch-all; never emitted as a span.
    Plain,
}

/// A source range tagged with a highlight category. Positions are 1-based;
/// multi-line tokens produce one span with correct start/end so the renderer
/// can slice per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct HighlightSpan {
    pub category: HighlightCategory,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

/// Total mapping from token kind to highlight category. Every kind maps to
/// something; kinds with no coloring map to `Plain`.
pub fn category_for(kind: TokenKind) -> HighlightCategory {
    match kind {
        TokenKind::Keyword => HighlightCategory::Keyword,
        TokenKind::CommandParameter => HighlightCategory::KeywordLight,
        TokenKind::Comment => HighlightCategory::Comment,
        TokenKind::String => HighlightCategory::String,
        TokenKind::Number => HighlightCategory::Constant,
        TokenKind::Variable => HighlightCategory::Variable,
        TokenKind::Attribute | TokenKind::Type => HighlightCategory::Annotation,
        TokenKind::Unknown
        | TokenKind::Command
        | TokenKind::CommandArgument
        | TokenKind::Member
        | TokenKind::LoopLabel
        | TokenKind::Operator
        | TokenKind::GroupStart
        | TokenKind::GroupEnd
        | TokenKind::StatementSeparator
        | TokenKind::NewLine
        | TokenKind::LineContinuation
        | TokenKind::Position => HighlightCategory::Plain,
    }
}

/// Highlighting filler.
pub struct HighlightingFiller;

impl HighlightingFiller {
    /// One span per colored token, in stream order. Stream order plus the
    /// tokenizer's non-overlapping tokens guarantee non-overlapping spans.
    pub fn spans(&self, tokens: &Tokens) -> Vec<HighlightSpan> {
        tokens
            .iter()
            .filter_map(|t| {
                let category = category_for(t.kind);
                if category == HighlightCategory::Plain {
                    return None;
                }
                Some(HighlightSpan {
                    category,
                    line: t.line,
                    column: t.column,
                    end_line: t.end_line,
                    end_column: t.end_column,
                })
            })
            .collect()
    }
}

impl Filler for HighlightingFiller {
    fn name(&self) -> &'static str {
        "highlighting"
    }

    fn fill(&self, tokens: &Tokens) -> Result<Metric, FillerError> {
        Ok(Metric::Highlighting(self.spans(tokens)))
    }
}
