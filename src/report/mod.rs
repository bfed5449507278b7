// SPDX-License-Identifier: PMPL-1.0-or-later
//! Violation reporting.
//!
//! [`report`] turns a rule or category run into a pass/fail outcome: silent
//! on success, one aggregated [`Report`] on failure. [`generate_report`]
//! renders scan results for the CLI:
//! - Text: human-readable violations grouped by severity
//! - JSON: structured violations for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::error::{Error, Result};
use crate::violation::{Category, Severity, Violation, ViolationSet};
use serde::Serialize;
use std::fmt;

/// Aggregated failure: every violation of one run, reported in one shot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Category the run covered, `None` for mixed or single-rule runs
    pub category: Option<Category>,
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { category: None, violations }
    }

    pub fn for_category(category: Category, violations: Vec<Violation>) -> Self {
        Self { category: Some(category), violations }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// First line of the failure message
    pub fn header(&self) -> String {
        let noun = self.category.map_or("violation", |c| c.noun());
        format!("{} accessibility {}(s) found:", self.len(), noun)
    }

    /// `Ok(())` when clean, otherwise the report as an assertion failure
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::ViolationFound(self))
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl From<Report> for ViolationSet {
    fn from(report: Report) -> Self {
        ViolationSet { violations: report.violations }
    }
}

/// Fail with every violation at once, or pass silently
pub fn report(violations: Vec<Violation>) -> Result<()> {
    Report::new(violations).into_result()
}

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report from violations
pub fn generate_report(violations: &ViolationSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(violations),
        OutputFormat::Json => generate_json_report(violations),
        OutputFormat::Sarif => generate_sarif_report(violations),
    }
}

/// Generate human-readable text report
fn generate_text_report(violations: &ViolationSet) -> String {
    let mut output = String::new();

    output.push_str("=== Markupcheck Report ===\n\n");

    if violations.is_empty() {
        output.push_str("No markup issues found. All checks passed.\n");
        return output;
    }

    let errors = violations.errors().len();
    let warnings = violations.warnings().len();
    let total = violations.len();

    output.push_str(&format!(
        "Found {} issue(s): {} error(s), {} warning(s), {} suggestion(s)\n\n",
        total,
        errors,
        warnings,
        total - errors - warnings
    ));

    for severity in &[Severity::Error, Severity::Warning, Severity::Suggestion] {
        let sev_violations = violations.by_severity(*severity);
        if sev_violations.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, sev_violations.len()));

        for violation in sev_violations {
            output.push_str(&format!("[{}] {}\n", violation.rule_id, violation.message));
            output.push_str(&format!("  Location: {}\n", violation.location_string()));
            output.push_str(&format!("  Element: {}\n", violation.element));
            output.push('\n');
        }
    }

    if violations.has_errors() {
        output.push_str("RESULT: FAILED (errors found)\n");
    } else if warnings > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(violations: &ViolationSet) -> String {
    serde_json::to_string_pretty(violations).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize violations: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

/// Generate SARIF report
fn generate_sarif_report(violations: &ViolationSet) -> String {
    let results: Vec<SarifResult> = violations
        .violations
        .iter()
        .map(|v| {
            let level = match v.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Suggestion => "note",
            };

            let locations = v
                .file
                .iter()
                .map(|file| SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: file.display().to_string(),
                        },
                    },
                })
                .collect();

            SarifResult {
                rule_id: v.rule_id.clone(),
                level: level.to_string(),
                message: SarifMessage {
                    text: format!("{}: {}", v.fragment(), v.message),
                },
                locations,
            }
        })
        .collect();

    let rules = crate::rules::all()
        .map(|rule| SarifRule {
            id: rule.id.to_string(),
            short_description: SarifMessage {
                text: rule.description.to_string(),
            },
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "markupcheck".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::Identifier;
    use std::path::PathBuf;

    fn sample_violation() -> Violation {
        Violation {
            rule_id: "img-alt".to_string(),
            category: Category::Errors,
            severity: Severity::Error,
            tag: "img".to_string(),
            identifier: Identifier::Id("hero".to_string()),
            element: r#"<img id="hero" src="hero.png">"#.to_string(),
            message: "image is missing an alt attribute".to_string(),
            file: Some(PathBuf::from("index.html")),
        }
    }

    #[test]
    fn test_report_empty_is_silent() {
        assert!(report(Vec::new()).is_ok());
    }

    #[test]
    fn test_report_aggregates_all_violations() {
        let mut second = sample_violation();
        second.identifier = Identifier::None;
        let err = report(vec![sample_violation(), second]).unwrap_err();
        let message = err.to_string();
        assert_eq!(
            message,
            "2 accessibility violation(s) found:\n  [img-alt] <img id=\"hero\">: image is missing an alt attribute\n  [img-alt] <img>: image is missing an alt attribute"
        );
        assert_eq!(err.report().map(Report::len), Some(2));
    }

    #[test]
    fn test_category_header() {
        let report = Report::for_category(Category::Errors, vec![sample_violation()]);
        assert_eq!(report.header(), "1 accessibility error(s) found:");
    }

    #[test]
    fn test_text_report_empty() {
        let violations = ViolationSet::new();
        let report = generate_report(&violations, OutputFormat::Text);
        assert!(report.contains("No markup issues found"));
    }

    #[test]
    fn test_text_report_with_violations() {
        let mut violations = ViolationSet::new();
        violations.add(sample_violation());
        let report = generate_report(&violations, OutputFormat::Text);
        assert!(report.contains("[img-alt]"));
        assert!(report.contains("index.html <img id=\"hero\">"));
        assert!(report.contains("RESULT: FAILED"));
    }

    #[test]
    fn test_json_report() {
        let mut violations = ViolationSet::new();
        violations.add(sample_violation());
        let report = generate_report(&violations, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert!(parsed["violations"].is_array());
        assert_eq!(parsed["violations"][0]["rule_id"], "img-alt");
        assert_eq!(parsed["violations"][0]["severity"], "error");
    }

    #[test]
    fn test_sarif_report() {
        let mut violations = ViolationSet::new();
        violations.add(sample_violation());
        let report = generate_report(&violations, OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        assert_eq!(parsed["runs"][0]["results"][0]["level"], "error");
        assert_eq!(
            parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "index.html"
        );
        assert!(parsed["runs"][0]["tool"]["driver"]["rules"].is_array());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
