//! Metric fillers for PowerShell token streams.
//!
//! Each filler consumes one read-only [`Tokens`] and produces one category of
//! measurement: per-line measures, CPD units, highlighting spans, Halstead
//! metrics, or cyclomatic complexity. Fillers have no interdependency and no
//! shared mutable state, so the pipeline can run them in any order (or in
//! parallel) over the same `&Tokens`. A failure in one filler never blocks
//! the others.
//!
//! All classification tables (operator/operand sets, highlight categories,
//! decision keywords) are fixed process-wide constants: they encode
//! PowerShell's lexical grammar, not runtime configuration.

pub mod complexity;
pub mod cpd;
pub mod halstead;
pub mod highlighting;
pub mod line_measures;
pub mod pipeline;

use serde::Serialize;

pub use complexity::{ComplexityFiller, ComplexityScore, Degradation, FunctionComplexity};
pub use cpd::{CpdFiller, CpdUnit};
pub use halstead::{HalsteadFiller, HalsteadMetrics};
pub use highlighting::{HighlightCategory, HighlightSpan, HighlightingFiller};
pub use line_measures::{LineClass, LineMeasures, LineMeasuresFiller};
pub use pipeline::{FileAnalysis, analyze};
use pstream_tokens::Tokens;

/// One filler result, tagged by metric category.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    LineMeasures(LineMeasures),
    Cpd(Vec<CpdUnit>),
    Highlighting(Vec<HighlightSpan>),
    Halstead(HalsteadMetrics),
    Complexity(ComplexityScore),
}

/// A filler could not complete for this token stream. The failure is scoped
/// to one filler for one file; sibling fillers proceed unaffected.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema, thiserror::Error)]
#[error("{filler}: {detail}")]
pub struct FillerError {
    pub filler: String,
    pub detail: String,
}

/// A metric computation over one token stream.
///
/// Implementations must not mutate the stream (they only get `&Tokens`) and
/// must be deterministic: the same stream always yields the same result.
pub trait Filler: Send + Sync {
    /// Stable name, used in diagnostics and error reports.
    fn name(&self) -> &'static str;

    /// Compute this filler's metric for one file's tokens.
    fn fill(&self, tokens: &Tokens) -> Result<Metric, FillerError>;
}
