//! Halstead complexity: operator/operand counting and derived metrics.

use std::collections::HashMap;

use serde::Serialize;

use crate::{Filler, FillerError, Metric};
use pstream_tokens::{TokenKind, Tokens};

/// Halstead base counts and derived metrics for one file.
///
/// Derived values follow the standard formulas. Streams with zero operators
/// or zero operands report 0.0 for the derived metrics instead of failing.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct HalsteadMetrics {
    /// n1: distinct operators.
    pub distinct_operators: usize,
    /// n2: distinct operands.
    pub distinct_operands: usize,
    /// N1: total operator occurrences.
    pub total_operators: usize,
    /// N2: total operand occurrences.
    pub total_operands: usize,
    /// n = n1 + n2
    pub vocabulary: usize,
    /// N = N1 + N2
    pub length: usize,
    /// V = N * log2(n)
    pub volume: f64,
    /// D = n1/2 * N2/n2
    pub difficulty: f64,
    /// E = D * V
    pub effort: f64,
}

impl HalsteadMetrics {
    fn derive(n1: usize, n2: usize, big_n1: usize, big_n2: usize) -> Self {
        let vocabulary = n1 + n2;
        let length = big_n1 + big_n2;
        let volume = if vocabulary > 0 {
            length as f64 * (vocabulary as f64).log2()
        } else {
            0.0
        };
        let difficulty = if n2 > 0 {
            (n1 as f64 / 2.0) * (big_n2 as f64 / n2 as f64)
        } else {
            0.0
        };
        HalsteadMetrics {
            distinct_operators: n1,
            distinct_operands: n2,
            total_operators: big_n1,
            total_operands: big_n2,
            vocabulary,
            length,
            volume,
            difficulty,
            effort: difficulty * volume,
        }
    }
}

/// Kinds counted as operators: the tokens that combine or delimit values.
fn is_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Operator
            | TokenKind::Keyword
            | TokenKind::GroupStart
            | TokenKind::GroupEnd
            | TokenKind::StatementSeparator
    )
}

/// Kinds counted as operands: names, literals, and command words.
fn is_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Variable
            | TokenKind::Number
            | TokenKind::String
            | TokenKind::Command
            | TokenKind::CommandParameter
            | TokenKind::CommandArgument
            | TokenKind::Member
            | TokenKind::Type
            | TokenKind::Attribute
            | TokenKind::LoopLabel
            | TokenKind::Unknown
    )
}

/// Halstead filler.
pub struct HalsteadFiller;

impl HalsteadFiller {
    pub fn metrics(&self, tokens: &Tokens) -> HalsteadMetrics {
        let mut operators: HashMap<String, usize> = HashMap::new();
        let mut operands: HashMap<String, usize> = HashMap::new();
        for token in tokens
            .iter()
            .filter(|t| !t.kind.is_layout() && t.kind != TokenKind::Comment)
        {
            if is_operator(token.kind) {
                // PowerShell operators and keywords are case-insensitive.
                *operators.entry(token.text.to_lowercase()).or_default() += 1;
            } else if is_operand(token.kind) {
                *operands.entry(token.text.clone()).or_default() += 1;
            }
        }
        HalsteadMetrics::derive(
            operators.len(),
            operands.len(),
            operators.values().sum(),
            operands.values().sum(),
        )
    }
}

impl Filler for HalsteadFiller {
    fn name(&self) -> &'static str {
        "halstead"
    }

    fn fill(&self, tokens: &Tokens) -> Result<Metric, FillerError> {
        Ok(Metric::Halstead(self.metrics(tokens)))
    }
}
