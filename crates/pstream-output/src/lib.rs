//! Output formatting utilities.
//!
//! Provides consistent JSON/text output across commands via the
//! `OutputFormatter` trait.

use serde::Serialize;

/// Output format and display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact text output (default).
    #[default]
    Text,
    /// JSON output.
    Json,
    /// JSON Lines output (one JSON object per line, arrays emit each element).
    JsonLines,
}

impl OutputFormat {
    /// Create from CLI flags. JSON Lines takes precedence over JSON.
    pub fn from_cli(json: bool, jsonl: bool) -> Self {
        if jsonl {
            OutputFormat::JsonLines
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Is this a JSON-based format?
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonLines)
    }
}

/// Trait for types that can format output in multiple formats.
///
/// JSON serialization uses serde, text formatting is custom. Schema
/// generation uses schemars for `schema` subcommand support.
pub trait OutputFormatter: Serialize + schemars::JsonSchema {
    /// Format as minimal text.
    fn format_text(&self) -> String;

    /// Print to stdout in the specified format.
    fn print(&self, format: &OutputFormat) {
        match format {
            OutputFormat::Text => println!("{}", self.format_text()),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(self).unwrap_or_default())
            }
            OutputFormat::JsonLines => {
                let json = serde_json::to_value(self).unwrap_or_default();
                print_jsonl(&json);
            }
        }
    }
}

/// Print a JSON value as JSON Lines (one object per line).
/// Arrays emit each element as a separate line, other values as a single line.
fn print_jsonl(value: &serde_json::Value) {
    if let serde_json::Value::Array(arr) = value {
        for item in arr {
            println!("{}", serde_json::to_string(item).unwrap_or_default());
        }
    } else {
        println!("{}", serde_json::to_string(value).unwrap_or_default());
    }
}

/// Print the JSON schema for a type implementing OutputFormatter.
/// Use this for `schema` subcommand handling.
pub fn print_output_schema<T: OutputFormatter>() {
    let schema = schemars::schema_for!(T);
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    );
}
