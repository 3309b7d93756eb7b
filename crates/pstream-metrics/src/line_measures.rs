//! Per-line code/comment/blank classification and aggregate counts.

use serde::Serialize;

use crate::{Filler, FillerError, Metric};
use pstream_tokens::{Token, TokenKind, Tokens};

/// Classification of one source line. Every line falls into exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// No tokens, or only layout tokens (newline, line continuation).
    Blank,
    /// Has tokens, and every non-layout token covering the line is a comment.
    Comment,
    /// Anything else.
    Code,
}

/// Aggregate line measures for one file.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct LineMeasures {
    /// Count of non-blank lines (code + comment).
    pub lines_of_code: usize,
    /// Count of comment-only lines.
    pub comment_lines: usize,
    /// Count of executable lines.
    pub executable_lines: usize,
    /// 1-based line numbers classified as executable, ascending.
    pub executable: Vec<usize>,
}

/// Structural kinds that make a line code but not executable.
///
/// Fixed policy: a line whose only non-comment content is block or group
/// delimiters and statement separators (a lone `}`, a `);` pair) counts
/// toward lines of code but not toward executable lines.
const STRUCTURAL: &[TokenKind] = &[
    TokenKind::GroupStart,
    TokenKind::GroupEnd,
    TokenKind::StatementSeparator,
];

/// Classify one line from the tokens covering it.
pub fn classify_line<'a>(tokens: impl Iterator<Item = &'a Token>) -> LineClass {
    let mut saw_any = false;
    let mut all_comment = true;
    for token in tokens.filter(|t| !t.kind.is_layout()) {
        saw_any = true;
        if token.kind != TokenKind::Comment {
            all_comment = false;
        }
    }
    match (saw_any, all_comment) {
        (false, _) => LineClass::Blank,
        (true, true) => LineClass::Comment,
        (true, false) => LineClass::Code,
    }
}

fn is_executable<'a>(tokens: impl Iterator<Item = &'a Token>) -> bool {
    tokens
        .filter(|t| !t.kind.is_layout() && t.kind != TokenKind::Comment)
        .any(|t| !STRUCTURAL.contains(&t.kind))
}

/// Line measures filler.
pub struct LineMeasuresFiller;

impl LineMeasuresFiller {
    pub fn measure(&self, tokens: &Tokens) -> LineMeasures {
        let mut lines_of_code = 0;
        let mut comment_lines = 0;
        let mut executable = Vec::new();
        for line in 1..=tokens.last_line() {
            match classify_line(tokens.on_line(line)) {
                LineClass::Blank => {}
                LineClass::Comment => {
                    lines_of_code += 1;
                    comment_lines += 1;
                }
                LineClass::Code => {
                    lines_of_code += 1;
                    if is_executable(tokens.on_line(line)) {
                        executable.push(line);
                    }
                }
            }
        }
        LineMeasures {
            lines_of_code,
            comment_lines,
            executable_lines: executable.len(),
            executable,
        }
    }
}

impl Filler for LineMeasuresFiller {
    fn name(&self) -> &'static str {
        "line-measures"
    }

    fn fill(&self, tokens: &Tokens) -> Result<Metric, FillerError> {
        Ok(Metric::LineMeasures(self.measure(tokens)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::tok;
    use pstream_tokens::{Token, TokenKind, Tokens};

    #[test]
    fn classifies_every_line_into_exactly_one_class() {
        // line 1: code, line 2: blank (newline only), line 3: comment
        let tokens = Tokens::new(vec![
            tok(TokenKind::Variable, "$x", 1, 1),
            tok(TokenKind::NewLine, "\n", 1, 3),
            tok(TokenKind::NewLine, "\n", 2, 1),
            tok(TokenKind::Comment, "# note", 3, 1),
        ]);
        assert_eq!(classify_line(tokens.on_line(1)), LineClass::Code);
        assert_eq!(classify_line(tokens.on_line(2)), LineClass::Blank);
        assert_eq!(classify_line(tokens.on_line(3)), LineClass::Comment);

        let measures = LineMeasuresFiller.measure(&tokens);
        assert_eq!(measures.lines_of_code, 2);
        assert_eq!(measures.comment_lines, 1);
        assert_eq!(measures.executable, vec![1]);
    }

    #[test]
    fn lone_closing_brace_is_code_but_not_executable() {
        let tokens = Tokens::new(vec![
            tok(TokenKind::Keyword, "if", 1, 1),
            tok(TokenKind::GroupStart, "(", 1, 4),
            tok(TokenKind::Variable, "$x", 1, 5),
            tok(TokenKind::GroupEnd, ")", 1, 7),
            tok(TokenKind::GroupStart, "{", 1, 9),
            tok(TokenKind::NewLine, "\n", 1, 10),
            tok(TokenKind::Command, "Write-Output", 2, 5),
            tok(TokenKind::String, "\"hi\"", 2, 18),
            tok(TokenKind::NewLine, "\n", 2, 22),
            tok(TokenKind::GroupEnd, "}", 3, 1),
        ]);
        let measures = LineMeasuresFiller.measure(&tokens);
        assert_eq!(measures.lines_of_code, 3);
        assert_eq!(measures.executable, vec![1, 2]);
        assert!(measures.lines_of_code >= measures.executable_lines);
    }

    #[test]
    fn block_comment_marks_every_spanned_line_as_comment() {
        let block = Token {
            kind: TokenKind::Comment,
            text: "<#\n.SYNOPSIS\n#>".to_string(),
            line: 1,
            column: 1,
            end_line: 3,
            end_column: 3,
        };
        let tokens = Tokens::new(vec![block, tok(TokenKind::Variable, "$x", 4, 1)]);
        let measures = LineMeasuresFiller.measure(&tokens);
        assert_eq!(measures.comment_lines, 3);
        assert_eq!(measures.lines_of_code, 4);
        assert_eq!(measures.executable, vec![4]);
    }

    #[test]
    fn empty_stream_yields_zero_measures() {
        let measures = LineMeasuresFiller.measure(&Tokens::new(Vec::new()));
        assert_eq!(measures.lines_of_code, 0);
        assert_eq!(measures.comment_lines, 0);
        assert!(measures.executable.is_empty());
    }

    #[test]
    fn loc_always_at_least_executable() {
        let tokens = crate::testutil::if_else_stream();
        let measures = LineMeasuresFiller.measure(&tokens);
        assert!(measures.lines_of_code >= measures.executable_lines);
        assert_eq!(measures.lines_of_code, 1);
        assert_eq!(measures.executable, vec![1]);
    }
}
