//! Token types for the PowerShell token stream.

use serde::{Deserialize, Serialize};

/// Token classification, mirroring PowerShell's `PSTokenType`.
///
/// The set is closed: the tokenizer script emits exactly these names, and the
/// reader rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum TokenKind {
    Unknown,
    Command,
    CommandParameter,
    CommandArgument,
    Number,
    String,
    Variable,
    Member,
    LoopLabel,
    Attribute,
    Type,
    Operator,
    GroupStart,
    GroupEnd,
    Keyword,
    Comment,
    StatementSeparator,
    NewLine,
    LineContinuation,
    Position,
}

impl TokenKind {
    /// Layout-only kinds: they separate tokens but carry no source text worth
    /// classifying (newlines, backtick continuations, position markers).
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            TokenKind::NewLine | TokenKind::LineContinuation | TokenKind::Position
        )
    }
}

/// One token from the artifact. Positions are 1-based; `end_line` can exceed
/// `line` for multi-line tokens such as `<# #>` block comments and here-strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Token {
    /// Does this token cover the given source line?
    pub fn covers_line(&self, line: usize) -> bool {
        self.line <= line && line <= self.end_line
    }
}

/// An ordered token sequence with a per-line index.
///
/// The index maps each source line to the tokens covering it (a multi-line
/// token appears under every line it spans). Built once at construction,
/// read-only after; fillers share one `&Tokens` with no synchronization.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    tokens: Vec<Token>,
    by_line: Vec<Vec<usize>>,
}

impl Tokens {
    /// Build the collection and its line index. Callers (the reader) are
    /// responsible for having validated line-order monotonicity.
    pub fn new(tokens: Vec<Token>) -> Self {
        let last_line = tokens.iter().map(|t| t.end_line).max().unwrap_or(0);
        let mut by_line = vec![Vec::new(); last_line + 1];
        for (idx, token) in tokens.iter().enumerate() {
            for line in token.line..=token.end_line {
                by_line[line].push(idx);
            }
        }
        Self { tokens, by_line }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Last source line any token touches (0 for an empty stream).
    pub fn last_line(&self) -> usize {
        self.by_line.len().saturating_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Tokens covering the given 1-based line, in stream order.
    pub fn on_line(&self, line: usize) -> impl Iterator<Item = &Token> {
        self.by_line
            .get(line)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.tokens[idx])
    }
}
