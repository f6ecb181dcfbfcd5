//! Definition shape checking implementation

use crate::definition::{Shape, classify};
use crate::document::Document;
use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::registry::Registry;

const CATEGORY: &str = "shape";

/// Check that every definition classifies the way the container needs
pub fn check(
    document: &Document,
    result: &mut LintResult,
    config: &LintConfig,
    registry: Option<&Registry>,
) {
    for (id, value) in &document.services {
        let shape = match classify(id, value) {
            Ok(shape) => shape,
            Err(error) => {
                result.add_issue(LintIssue::new(
                    LintLevel::Error,
                    CATEGORY,
                    id,
                    error.to_string(),
                ));
                continue;
            }
        };

        let (Shape::Class(definition), Some(registry)) = (shape, registry) else {
            continue;
        };

        let class = match registry.resolve(definition.class) {
            Ok(class) => class,
            Err(error) => {
                result.add_issue(LintIssue::new(
                    LintLevel::Error,
                    CATEGORY,
                    id,
                    error.to_string(),
                ));
                continue;
            }
        };

        if !config.shape.check_methods {
            continue;
        }

        for call in &definition.calls {
            if !class.has_method(call.method) {
                result.add_issue(LintIssue::new(
                    LintLevel::Error,
                    CATEGORY,
                    id,
                    format!(
                        "Class '{}' has no method '{}'",
                        definition.class, call.method
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(services: serde_json::Value) -> Document {
        Document {
            services: services.as_object().cloned().unwrap_or_default(),
            ..Document::default()
        }
    }

    #[test]
    fn shape_check_reports_malformed_definitions() {
        let document = document(serde_json::json!({
            "no_class": {"xxx": "aaa"},
            "bad_arguments": {"class": "app.A", "arguments": "Felix"},
            "bad_call": {"class": "app.A", "calls": [["set", 1]]},
            "fine": {"class": "app.A"},
            "literal": 3
        }));
        let mut result = LintResult::new();

        check(&document, &mut result, &LintConfig::default(), None);

        assert_eq!(result.error_count, 3);
        let subjects: Vec<&str> = result.issues.iter().map(|i| i.subject.as_str()).collect();
        assert_eq!(subjects, vec!["bad_arguments", "bad_call", "no_class"]);
    }

    #[test]
    fn shape_check_uses_registry() {
        struct Mailer;

        let mut registry = Registry::new();
        registry
            .class("app.Mailer", |_| Ok(Mailer))
            .method("connect", |_: &mut Mailer, _| Ok(()));

        let document = document(serde_json::json!({
            "mailer": {"class": "app.Mailer", "calls": ["connect", "disconnect"]},
            "unknown": {"class": "app.Unknown"}
        }));

        let mut result = LintResult::new();
        check(&document, &mut result, &LintConfig::default(), Some(&registry));
        assert_eq!(result.error_count, 2);
        assert!(result.issues[0].message.contains("disconnect"));
        assert!(result.issues[1].message.contains("app.Unknown"));

        let mut config = LintConfig::default();
        config.shape.check_methods = false;
        let mut result = LintResult::new();
        check(&document, &mut result, &config, Some(&registry));
        assert_eq!(result.error_count, 1);
    }
}
