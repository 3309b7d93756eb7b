//! Cyclomatic complexity from decision-point counting.
//!
//! The filler scans the token stream once, tracking `{`/`}` nesting and
//! function boundaries (`function Name { ... }` patterns). Every decision
//! point adds 1 to the file score (base 1) and to the innermost enclosing
//! function's score (base 1 each). When function boundaries cannot be
//! detected the file score alone is reported; that is the documented
//! fallback, not an error.

use serde::Serialize;

use crate::{Filler, FillerError, Metric};
use pstream_tokens::{Token, TokenKind, Tokens};

/// Decision-point keywords (case-insensitive, as PowerShell keywords are).
///
/// `else` adds no path of its own and is excluded. `do` is excluded because
/// its loop condition always carries a counted `while` or `until`.
const DECISION_KEYWORDS: &[&str] = &[
    "if", "elseif", "while", "for", "foreach", "until", "switch", "catch", "trap",
];

/// Short-circuit operators counted as decision points.
const SHORT_CIRCUIT: &[&str] = &["-and", "-or"];

/// Keywords that introduce a named callable with a `{ ... }` body.
const FUNCTION_KEYWORDS: &[&str] = &["function", "filter", "workflow"];

/// Complexity of one detected function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct FunctionComplexity {
    pub name: String,
    /// 1-based line of the function name.
    pub line: usize,
    pub complexity: usize,
}

/// Documented fallback conditions a filler can complete under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Block delimiters did not balance; trailing open blocks were treated
    /// as closed at end of stream.
    UnbalancedBlocks,
}

/// Cyclomatic complexity for one file, optionally per function.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct ComplexityScore {
    /// Whole-file score: 1 + count of decision points.
    pub complexity: usize,
    /// Per-function scores, ascending by line. Empty when no function
    /// boundaries were detected (whole-file fallback).
    pub functions: Vec<FunctionComplexity>,
    /// Set when the result was computed under a documented fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<Degradation>,
}

fn is_decision(token: &Token) -> bool {
    match token.kind {
        TokenKind::Keyword => DECISION_KEYWORDS
            .iter()
            .any(|k| token.text.eq_ignore_ascii_case(k)),
        TokenKind::Operator => SHORT_CIRCUIT
            .iter()
            .any(|o| token.text.eq_ignore_ascii_case(o)),
        _ => false,
    }
}

/// Function-boundary detection state.
enum Pending {
    /// Saw `function`; the next significant token should be the name.
    Name,
    /// Saw the name; waiting for the body `{` (a `(param)` list may intervene).
    Brace { name: String, line: usize },
}

struct OpenFunction {
    name: String,
    line: usize,
    score: usize,
    /// Brace depth inside the body; the function closes when depth drops below it.
    body_depth: usize,
}

/// Cyclomatic complexity filler.
pub struct ComplexityFiller;

impl ComplexityFiller {
    pub fn score(&self, tokens: &Tokens) -> ComplexityScore {
        let mut complexity = 1usize;
        let mut depth = 0usize;
        let mut unbalanced = false;
        let mut pending: Option<Pending> = None;
        let mut open: Vec<OpenFunction> = Vec::new();
        let mut done: Vec<FunctionComplexity> = Vec::new();

        for token in tokens
            .iter()
            .filter(|t| !t.kind.is_layout() && t.kind != TokenKind::Comment)
        {
            if token.kind == TokenKind::Keyword
                && FUNCTION_KEYWORDS
                    .iter()
                    .any(|k| token.text.eq_ignore_ascii_case(k))
            {
                pending = Some(Pending::Name);
                continue;
            }

            match pending.take() {
                Some(Pending::Name) => match token.kind {
                    TokenKind::Command
                    | TokenKind::CommandArgument
                    | TokenKind::Member
                    | TokenKind::Unknown => {
                        pending = Some(Pending::Brace {
                            name: token.text.clone(),
                            line: token.line,
                        });
                        continue;
                    }
                    // Not a name; the boundary heuristic gives up on this one.
                    _ => {}
                },
                Some(Pending::Brace { name, line }) => {
                    if token.kind == TokenKind::GroupStart && token.text.ends_with('{') {
                        depth += 1;
                        open.push(OpenFunction {
                            name,
                            line,
                            score: 1,
                            body_depth: depth,
                        });
                        continue;
                    }
                    // A parameter list `( ... )` may sit between name and body;
                    // a keyword, `}`, or `;` means the body never came.
                    let abandoned = token.kind == TokenKind::Keyword
                        || token.kind == TokenKind::StatementSeparator
                        || (token.kind == TokenKind::GroupEnd && token.text == "}");
                    if !abandoned {
                        pending = Some(Pending::Brace { name, line });
                    }
                }
                None => {}
            }

            match token.kind {
                TokenKind::GroupStart if token.text.ends_with('{') => depth += 1,
                TokenKind::GroupEnd if token.text == "}" => {
                    if depth == 0 {
                        unbalanced = true;
                    } else {
                        depth -= 1;
                        while open.last().is_some_and(|f| f.body_depth > depth) {
                            if let Some(f) = open.pop() {
                                done.push(FunctionComplexity {
                                    name: f.name,
                                    line: f.line,
                                    complexity: f.score,
                                });
                            }
                        }
                    }
                }
                _ => {
                    if is_decision(token) {
                        complexity += 1;
                        if let Some(f) = open.last_mut() {
                            f.score += 1;
                        }
                    }
                }
            }
        }

        if depth != 0 {
            unbalanced = true;
        }
        // Implicitly close anything still open at end of stream.
        while let Some(f) = open.pop() {
            done.push(FunctionComplexity {
                name: f.name,
                line: f.line,
                complexity: f.score,
            });
        }
        done.sort_by_key(|f| f.line);

        if unbalanced {
            tracing::warn!("unbalanced block delimiters; complexity reported best-effort");
        }
        ComplexityScore {
            complexity,
            functions: done,
            degraded: unbalanced.then_some(Degradation::UnbalancedBlocks),
        }
    }
}

impl Filler for ComplexityFiller {
    fn name(&self) -> &'static str {
        "complexity"
    }

    fn fill(&self, tokens: &Tokens) -> Result<Metric, FillerError> {
        Ok(Metric::Complexity(self.score(tokens)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::tok;

    fn kw(text: &str, line: usize) -> pstream_tokens::Token {
        tok(TokenKind::Keyword, text, line, 1)
    }

    #[test]
    fn no_decisions_yields_base_score() {
        let tokens = Tokens::new(vec![
            tok(TokenKind::Variable, "$x", 1, 1),
            tok(TokenKind::Operator, "=", 1, 4),
            tok(TokenKind::Number, "1", 1, 6),
        ]);
        let score = ComplexityFiller.score(&tokens);
        assert_eq!(score.complexity, 1);
        assert!(score.functions.is_empty());
        assert!(score.degraded.is_none());
    }

    #[test]
    fn if_else_scores_two() {
        let score = ComplexityFiller.score(&crate::testutil::if_else_stream());
        // else is an alternative branch, not its own decision point
        assert_eq!(score.complexity, 2);
        assert!(score.degraded.is_none());
    }

    #[test]
    fn each_decision_keyword_adds_one() {
        let tokens = Tokens::new(vec![kw("if", 1), kw("elseif", 2), kw("while", 3)]);
        assert_eq!(ComplexityFiller.score(&tokens).complexity, 4);
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let tokens = Tokens::new(vec![kw("If", 1), kw("ForEach", 2)]);
        assert_eq!(ComplexityFiller.score(&tokens).complexity, 3);
    }

    #[test]
    fn short_circuit_operators_count() {
        let tokens = Tokens::new(vec![
            kw("if", 1),
            tok(TokenKind::GroupStart, "(", 1, 4),
            tok(TokenKind::Variable, "$a", 1, 5),
            tok(TokenKind::Operator, "-and", 1, 8),
            tok(TokenKind::Variable, "$b", 1, 13),
            tok(TokenKind::GroupEnd, ")", 1, 15),
        ]);
        assert_eq!(ComplexityFiller.score(&tokens).complexity, 3);
    }

    #[test]
    fn do_loops_count_once_via_their_condition() {
        // do { } until ($x)
        let tokens = Tokens::new(vec![
            kw("do", 1),
            tok(TokenKind::GroupStart, "{", 1, 4),
            tok(TokenKind::GroupEnd, "}", 1, 6),
            kw("until", 1),
            tok(TokenKind::GroupStart, "(", 1, 14),
            tok(TokenKind::Variable, "$x", 1, 15),
            tok(TokenKind::GroupEnd, ")", 1, 17),
        ]);
        assert_eq!(ComplexityFiller.score(&tokens).complexity, 2);
    }

    #[test]
    fn functions_get_their_own_scores() {
        // function Get-A { if ($x) { } }
        // function Get-B ($p) { while ($y) { } }
        let tokens = Tokens::new(vec![
            kw("function", 1),
            tok(TokenKind::CommandArgument, "Get-A", 1, 10),
            tok(TokenKind::GroupStart, "{", 1, 16),
            kw("if", 2),
            tok(TokenKind::GroupStart, "(", 2, 4),
            tok(TokenKind::Variable, "$x", 2, 5),
            tok(TokenKind::GroupEnd, ")", 2, 7),
            tok(TokenKind::GroupStart, "{", 2, 9),
            tok(TokenKind::GroupEnd, "}", 2, 11),
            tok(TokenKind::GroupEnd, "}", 3, 1),
            kw("function", 5),
            tok(TokenKind::CommandArgument, "Get-B", 5, 10),
            tok(TokenKind::GroupStart, "(", 5, 16),
            tok(TokenKind::Variable, "$p", 5, 17),
            tok(TokenKind::GroupEnd, ")", 5, 19),
            tok(TokenKind::GroupStart, "{", 5, 21),
            kw("while", 6),
            tok(TokenKind::GroupStart, "(", 6, 7),
            tok(TokenKind::Variable, "$y", 6, 8),
            tok(TokenKind::GroupEnd, ")", 6, 10),
            tok(TokenKind::GroupStart, "{", 6, 12),
            tok(TokenKind::GroupEnd, "}", 6, 14),
            tok(TokenKind::GroupEnd, "}", 7, 1),
        ]);
        let score = ComplexityFiller.score(&tokens);
        assert_eq!(score.complexity, 3);
        assert_eq!(
            score.functions,
            vec![
                FunctionComplexity {
                    name: "Get-A".to_string(),
                    line: 1,
                    complexity: 2
                },
                FunctionComplexity {
                    name: "Get-B".to_string(),
                    line: 5,
                    complexity: 2
                },
            ]
        );
        assert!(score.degraded.is_none());
    }

    #[test]
    fn nested_function_decisions_go_to_innermost() {
        // function Outer { function Inner { if ($x) { } } }
        let tokens = Tokens::new(vec![
            kw("function", 1),
            tok(TokenKind::CommandArgument, "Outer", 1, 10),
            tok(TokenKind::GroupStart, "{", 1, 16),
            kw("function", 2),
            tok(TokenKind::CommandArgument, "Inner", 2, 12),
            tok(TokenKind::GroupStart, "{", 2, 18),
            kw("if", 3),
            tok(TokenKind::GroupStart, "{", 3, 9),
            tok(TokenKind::GroupEnd, "}", 3, 11),
            tok(TokenKind::GroupEnd, "}", 4, 1),
            tok(TokenKind::GroupEnd, "}", 5, 1),
        ]);
        let score = ComplexityFiller.score(&tokens);
        let by_name: Vec<(&str, usize)> = score
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.complexity))
            .collect();
        assert_eq!(by_name, vec![("Outer", 1), ("Inner", 2)]);
    }

    #[test]
    fn unclosed_block_degrades_instead_of_crashing() {
        let tokens = Tokens::new(vec![
            kw("if", 1),
            tok(TokenKind::GroupStart, "{", 1, 4),
            tok(TokenKind::Variable, "$x", 2, 1),
        ]);
        let score = ComplexityFiller.score(&tokens);
        assert_eq!(score.complexity, 2);
        assert_eq!(score.degraded, Some(Degradation::UnbalancedBlocks));
    }

    #[test]
    fn stray_closing_brace_degrades() {
        let tokens = Tokens::new(vec![tok(TokenKind::GroupEnd, "}", 1, 1)]);
        let score = ComplexityFiller.score(&tokens);
        assert_eq!(score.complexity, 1);
        assert_eq!(score.degraded, Some(Degradation::UnbalancedBlocks));
    }

    #[test]
    fn unclosed_function_is_implicitly_closed_at_eof() {
        let tokens = Tokens::new(vec![
            kw("function", 1),
            tok(TokenKind::CommandArgument, "Get-A", 1, 10),
            tok(TokenKind::GroupStart, "{", 1, 16),
            kw("if", 2),
        ]);
        let score = ComplexityFiller.score(&tokens);
        assert_eq!(score.degraded, Some(Degradation::UnbalancedBlocks));
        assert_eq!(score.functions.len(), 1);
        assert_eq!(score.functions[0].complexity, 2);
    }

    #[test]
    fn function_keyword_without_body_is_discarded() {
        // `function` used in a sentence-like context: no name/brace follows
        let tokens = Tokens::new(vec![
            kw("function", 1),
            tok(TokenKind::Operator, "=", 1, 10),
            kw("if", 2),
        ]);
        let score = ComplexityFiller.score(&tokens);
        assert_eq!(score.complexity, 2);
        assert!(score.functions.is_empty());
    }
}
