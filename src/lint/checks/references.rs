//! Reference integrity checking implementation

use super::{parameter_dependencies, service_dependencies, well_formed};
use crate::document::Document;
use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::template;
use std::collections::BTreeSet;

const CATEGORY: &str = "references";

/// Check `@id` and `{{ name }}` references resolve
pub fn check(document: &Document, result: &mut LintResult, config: &LintConfig) {
    if config.references.check_services {
        check_services(document, result);
    }

    if config.references.check_parameters {
        check_parameters(document, result);
    }

    if config.references.report_unused_parameters {
        check_unused_parameters(document, result);
    }
}

fn check_services(document: &Document, result: &mut LintResult) {
    for service in well_formed(document) {
        for target in service_dependencies(&service.shape) {
            if !document.services.contains_key(target) {
                result.add_issue(LintIssue::new(
                    LintLevel::Error,
                    CATEGORY,
                    service.id,
                    format!("Reference to undefined service '{}'", target),
                ));
            }
        }
    }
}

fn check_parameters(document: &Document, result: &mut LintResult) {
    for service in well_formed(document) {
        for name in parameter_dependencies(&service.shape) {
            if !document.parameters.contains_key(&name) {
                result.add_issue(LintIssue::new(
                    LintLevel::Error,
                    CATEGORY,
                    service.id,
                    format!("Reference to undefined parameter '{}'", name),
                ));
            }
        }
    }

    for (name, value) in &document.parameters {
        let Some(text) = value.as_str() else {
            continue;
        };
        for reference in template::placeholders(text) {
            if !document.parameters.contains_key(&reference) {
                result.add_issue(LintIssue::new(
                    LintLevel::Error,
                    CATEGORY,
                    name,
                    format!("Reference to undefined parameter '{}'", reference),
                ));
            }
        }
    }
}

fn check_unused_parameters(document: &Document, result: &mut LintResult) {
    let mut used: BTreeSet<String> = well_formed(document)
        .iter()
        .flat_map(|service| parameter_dependencies(&service.shape))
        .collect();
    used.extend(
        document
            .parameters
            .values()
            .filter_map(|value| value.as_str())
            .flat_map(template::placeholders),
    );

    for name in document.parameters.keys() {
        if !used.contains(name) {
            result.add_issue(LintIssue::new(
                LintLevel::Info,
                CATEGORY,
                name,
                format!("Parameter '{}' is never referenced", name),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> Document {
        text.parse().unwrap()
    }

    #[test]
    fn references_check_undefined_service() {
        let document = document(
            r#"{"services": {
                "car": {"class": "app.Car", "arguments": ["@driver", "@@literal"]},
                "alias": "@nowhere"
            }}"#,
        );
        let mut result = LintResult::new();

        check(&document, &mut result, &LintConfig::default());

        assert_eq!(result.error_count, 2);
        assert!(result.issues.iter().any(|i| i.message.contains("'driver'")));
        assert!(result.issues.iter().any(|i| i.message.contains("'nowhere'")));
    }

    #[test]
    fn references_check_undefined_parameter() {
        let document = document(
            r#"{
                "parameters": {"greeting": "Hi {{ name }}", "escaped": "\\{\\{ x \\}\\}"},
                "services": {"greeter": {
                    "class": "app.Greeter",
                    "calls": [["set_name", {"name": "@@{{ user }}"}]]
                }}
            }"#,
        );
        let mut result = LintResult::new();

        check(&document, &mut result, &LintConfig::default());

        assert_eq!(result.error_count, 2);
        let subjects: Vec<&str> = result.issues.iter().map(|i| i.subject.as_str()).collect();
        assert_eq!(subjects, vec!["greeter", "greeting"]);
    }

    #[test]
    fn references_check_unused_parameter() {
        let document = document(
            r#"{
                "parameters": {"used": "x", "unused": 1, "composite": "{{ used }}"},
                "services": {"a": {"class": "app.A", "arguments": ["{{ composite }}"]}}
            }"#,
        );
        let mut config = LintConfig::default();
        config.references.report_unused_parameters = true;
        let mut result = LintResult::new();

        check(&document, &mut result, &config);

        assert_eq!(result.info_count, 1);
        assert_eq!(result.issues[0].subject, "unused");
        assert!(result.issues[0].message.contains("never referenced"));
    }
}
