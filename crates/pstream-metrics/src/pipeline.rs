//! Fan-out of all fillers over one file's tokens.
//!
//! Fillers are read-only consumers with no interdependency: each result is
//! collected on its own, and one filler failing only leaves its slot empty
//! in the report. Nothing here holds shared mutable state, so callers can run
//! `analyze` for many files in parallel without locks.

use serde::Serialize;

use crate::{
    ComplexityFiller, ComplexityScore, CpdFiller, CpdUnit, Filler, FillerError, HalsteadFiller,
    HalsteadMetrics, HighlightSpan, HighlightingFiller, LineMeasures, LineMeasuresFiller, Metric,
};
use pstream_output::OutputFormatter;
use pstream_tokens::Tokens;

/// The fixed filler set, run in declaration order.
static FILLERS: &[&(dyn Filler)] = &[
    &LineMeasuresFiller,
    &CpdFiller,
    &HighlightingFiller,
    &HalsteadFiller,
    &ComplexityFiller,
];

/// All metrics for one analyzed file. A `None` slot means that filler failed;
/// the matching entry in `errors` says why.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct FileAnalysis {
    pub file: String,
    pub line_measures: Option<LineMeasures>,
    pub cpd: Option<Vec<CpdUnit>>,
    pub highlighting: Option<Vec<HighlightSpan>>,
    pub halstead: Option<HalsteadMetrics>,
    pub complexity: Option<ComplexityScore>,
    pub errors: Vec<FillerError>,
}

impl FileAnalysis {
    fn empty(file: &str) -> Self {
        FileAnalysis {
            file: file.to_string(),
            line_measures: None,
            cpd: None,
            highlighting: None,
            halstead: None,
            complexity: None,
            errors: Vec::new(),
        }
    }
}

/// Run every filler over one file's tokens.
pub fn analyze(file: &str, tokens: &Tokens) -> FileAnalysis {
    run_fillers(file, tokens, FILLERS)
}

fn run_fillers(file: &str, tokens: &Tokens, fillers: &[&dyn Filler]) -> FileAnalysis {
    let mut analysis = FileAnalysis::empty(file);
    for filler in fillers {
        match filler.fill(tokens) {
            Ok(Metric::LineMeasures(m)) => analysis.line_measures = Some(m),
            Ok(Metric::Cpd(units)) => analysis.cpd = Some(units),
            Ok(Metric::Highlighting(spans)) => analysis.highlighting = Some(spans),
            Ok(Metric::Halstead(m)) => analysis.halstead = Some(m),
            Ok(Metric::Complexity(score)) => analysis.complexity = Some(score),
            Err(err) => {
                tracing::warn!(file, filler = filler.name(), %err, "filler failed");
                analysis.errors.push(err);
            }
        }
    }
    analysis
}

impl OutputFormatter for FileAnalysis {
    fn format_text(&self) -> String {
        let mut lines = vec![self.file.clone()];
        if let Some(m) = &self.line_measures {
            lines.push(format!(
                "  lines of code: {} (comment: {}, executable: {})",
                m.lines_of_code, m.comment_lines, m.executable_lines
            ));
        }
        if let Some(score) = &self.complexity {
            let mut line = format!("  complexity: {}", score.complexity);
            if !score.functions.is_empty() {
                line.push_str(&format!(" across {} function(s)", score.functions.len()));
            }
            if score.degraded.is_some() {
                line.push_str(" [degraded: unbalanced blocks]");
            }
            lines.push(line);
            for f in &score.functions {
                lines.push(format!("    {} (line {}): {}", f.name, f.line, f.complexity));
            }
        }
        if let Some(h) = &self.halstead {
            lines.push(format!(
                "  halstead: volume {:.1}, difficulty {:.1} (n1={}, n2={}, N1={}, N2={})",
                h.volume,
                h.difficulty,
                h.distinct_operators,
                h.distinct_operands,
                h.total_operators,
                h.total_operands
            ));
        }
        if let Some(spans) = &self.highlighting {
            lines.push(format!("  highlight spans: {}", spans.len()));
        }
        if let Some(units) = &self.cpd {
            lines.push(format!("  cpd units: {}", units.len()));
        }
        for err in &self.errors {
            lines.push(format!("  error: {err}"));
        }
        lines.join("\n")
    }
}
