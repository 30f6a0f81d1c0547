//! Output formatting for check results.
//!
//! Supports two output formats:
//! - Pretty: one colored status line per check
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::registry::Named;
use crate::runner::CheckReport;

const PASS_GLYPH: &str = "✓";
const FAIL_GLYPH: &str = "✗";

// =============================================================================
// Pretty Format
// =============================================================================

/// Render one line per check: glyph, name, description when `verbose`, and
/// the failure detail if the check failed.
pub fn render_pretty(report: &CheckReport<'_>, verbose: bool) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let status = if outcome.passed() {
            PASS_GLYPH.green()
        } else {
            FAIL_GLYPH.red()
        };

        out.push_str(&format!("{}  {}\t", status, outcome.check.name()));
        if verbose {
            out.push_str(&format!("{}\t", outcome.check.description()));
        }
        if let Some(text) = outcome.error_text() {
            out.push_str(&text);
        }
        out.push('\n');
    }

    out
}

pub fn write_pretty(report: &CheckReport<'_>, verbose: bool) {
    print!("{}", render_pretty(report, verbose));
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    /// Release version the checks ran for.
    pub version: String,
    pub passed: bool,
    pub failed: usize,
    pub checks: Vec<JsonCheck>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCheck {
    pub name: String,
    pub description: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn to_json_report(version: &str, report: &CheckReport<'_>) -> JsonReport {
    let checks = report
        .outcomes
        .iter()
        .map(|o| JsonCheck {
            name: o.check.name().to_string(),
            description: o.check.description().to_string(),
            passed: o.passed(),
            error: o.error_text(),
        })
        .collect();

    JsonReport {
        version: version.to_string(),
        passed: report.passed(),
        failed: report.failed_count(),
        checks,
    }
}

pub fn write_json(version: &str, report: &CheckReport<'_>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json_report(version, report))?;
    println!("{}", json);
    Ok(())
}
