//! Lint module for definition documents
//!
//! Validates a [`Document`] without constructing any service:
//! - Definition shape errors (missing `class`, bad `arguments` or `calls`)
//! - Reference integrity (`@id` services, `{{ name }}` parameters)
//! - Circular references between services or between parameters
//!
//! Given a [`Registry`], classes and call methods are checked as well.

use crate::document::Document;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: the container would fail on this
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

impl std::fmt::Display for LintLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintLevel::Error => write!(f, "error"),
            LintLevel::Warning => write!(f, "warning"),
            LintLevel::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Service id or parameter name the issue is about
    pub subject: String,
    /// Category of the issue
    pub category: String,
}

impl LintIssue {
    pub fn new(
        level: LintLevel,
        category: &str,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            subject: subject.into(),
            category: category.to_string(),
        }
    }
}

/// Result of linting a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self {
            issues: Vec::new(),
            error_count: 0,
            warning_count: 0,
            info_count: 0,
        }
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Default for LintResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Lint a document with its own configuration, or the default one
pub fn lint(document: &Document) -> LintResult {
    let config = document.lint.clone().unwrap_or_default();
    lint_with_config(document, &config)
}

/// Lint a document with custom configuration
pub fn lint_with_config(document: &Document, config: &config::LintConfig) -> LintResult {
    run(document, config, None)
}

/// Lint a document, also checking classes and methods against `registry`
pub fn lint_with_registry(
    document: &Document,
    config: &config::LintConfig,
    registry: &Registry,
) -> LintResult {
    run(document, config, Some(registry))
}

fn run(document: &Document, config: &config::LintConfig, registry: Option<&Registry>) -> LintResult {
    let mut result = LintResult::new();

    if config.shape.enabled {
        checks::shape::check(document, &mut result, config, registry);
    }

    if config.references.enabled {
        checks::references::check(document, &mut result, config);
    }

    if config.cycles.enabled {
        checks::cycles::check(document, &mut result, config);
    }

    log::debug!(
        "Lint finished: {} errors, {} warnings, {} info",
        result.error_count,
        result.warning_count,
        result.info_count
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_empty_document() {
        let document: Document = "{}".parse().unwrap();
        let result = lint(&document);

        assert!(result.is_clean());
        assert_eq!(result.error_count, 0);
        assert_eq!(result.warning_count, 0);
    }

    #[test]
    fn lint_simple_valid_document() {
        let document: Document = r#"{
            "parameters": {"driver_name": "Felix"},
            "services": {
                "driver": {"class": "app.Driver", "arguments": ["{{ driver_name }}"]},
                "car": {"class": "app.Car", "arguments": ["@driver"]},
                "vehicle": "@car"
            }
        }"#
        .parse()
        .unwrap();

        let result = lint(&document);
        assert!(result.is_clean(), "{:?}", result.issues);
    }

    #[test]
    fn document_config_disables_checks() {
        let document: Document = r#"{
            "services": {"broken": {"xxx": 1}},
            "lint": {"shape": {"enabled": false}}
        }"#
        .parse()
        .unwrap();

        assert!(lint(&document).is_clean());
        assert!(lint_with_config(&document, &config::LintConfig::default()).has_errors());
    }
}
