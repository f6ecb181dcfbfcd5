//! Circular reference detection
//!
//! The container and the parameter store both fail at runtime on cycles;
//! this check finds them up front.

use super::{service_dependencies, well_formed};
use crate::document::Document;
use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::template;
use std::collections::{BTreeMap, BTreeSet};

const CATEGORY: &str = "cycles";

type Graph = BTreeMap<String, Vec<String>>;

/// Check for circular service and parameter references
pub fn check(document: &Document, result: &mut LintResult, config: &LintConfig) {
    if config.cycles.check_services {
        for cycle in find_cycles(&service_graph(document)) {
            result.add_issue(LintIssue::new(
                LintLevel::Error,
                CATEGORY,
                cycle[0].clone(),
                format!("Circular service reference: {}", cycle.join(" -> ")),
            ));
        }
    }

    if config.cycles.check_parameters {
        for cycle in find_cycles(&parameter_graph(document)) {
            result.add_issue(LintIssue::new(
                LintLevel::Error,
                CATEGORY,
                cycle[0].clone(),
                format!("Circular parameter reference: {}", cycle.join(" -> ")),
            ));
        }
    }
}

fn service_graph(document: &Document) -> Graph {
    well_formed(document)
        .iter()
        .map(|service| {
            let edges = service_dependencies(&service.shape)
                .into_iter()
                .filter(|target| document.services.contains_key(*target))
                .map(str::to_string)
                .collect();
            (service.id.to_string(), edges)
        })
        .collect()
}

fn parameter_graph(document: &Document) -> Graph {
    document
        .parameters
        .iter()
        .map(|(name, value)| {
            let edges = value
                .as_str()
                .map(template::placeholders)
                .unwrap_or_default()
                .into_iter()
                .filter(|reference| document.parameters.contains_key(reference))
                .collect();
            (name.clone(), edges)
        })
        .collect()
}

/// Cycles found by depth-first search, each reported once.
///
/// A cycle is returned closed (`a -> b -> a`) and rotated to start at its
/// smallest node so the same cycle found from different entry points dedupes.
fn find_cycles(graph: &Graph) -> Vec<Vec<String>> {
    let mut found = BTreeSet::new();
    let mut finished = BTreeSet::new();

    for start in graph.keys() {
        let mut path = Vec::new();
        visit(graph, start, &mut path, &mut finished, &mut found);
    }

    found.into_iter().collect()
}

fn visit<'g>(
    graph: &'g Graph,
    node: &'g str,
    path: &mut Vec<&'g str>,
    finished: &mut BTreeSet<&'g str>,
    found: &mut BTreeSet<Vec<String>>,
) {
    if let Some(position) = path.iter().position(|open| *open == node) {
        found.insert(canonical(&path[position..]));
        return;
    }
    if finished.contains(node) {
        return;
    }

    path.push(node);
    for next in graph.get(node).into_iter().flatten() {
        visit(graph, next, path, finished, found);
    }
    path.pop();
    finished.insert(node);
}

fn canonical(cycle: &[&str]) -> Vec<String> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, node)| **node)
        .map_or(0, |(index, _)| index);

    let mut closed: Vec<String> = cycle[start..]
        .iter()
        .chain(&cycle[..start])
        .map(|node| node.to_string())
        .collect();
    closed.push(closed[0].clone());
    closed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(text: &str) -> Document {
        text.parse().unwrap()
    }

    #[test]
    fn cycles_check_finds_service_cycle_once() {
        let document = document(
            r#"{"services": {
                "a": {"class": "app.A", "arguments": ["@b"]},
                "b": {"class": "app.B", "calls": [["set", ["@c"]]]},
                "c": "@a",
                "d": {"class": "app.D", "arguments": ["@a"]}
            }}"#,
        );
        let mut result = LintResult::new();

        check(&document, &mut result, &LintConfig::default());

        assert_eq!(result.error_count, 1);
        assert_eq!(result.issues[0].subject, "a");
        assert!(result.issues[0].message.ends_with("a -> b -> c -> a"));
    }

    #[test]
    fn cycles_check_finds_parameter_cycle() {
        let document = document(
            r#"{"parameters": {"x": "{{ y }}", "y": "{{ x }}!", "z": "{{ x }}"}}"#,
        );
        let mut result = LintResult::new();

        check(&document, &mut result, &LintConfig::default());

        assert_eq!(result.error_count, 1);
        assert!(result.issues[0].message.contains("x -> y -> x"));
    }

    #[test]
    fn cycles_check_accepts_diamonds() {
        let document = document(
            r#"{"services": {
                "top": {"class": "app.T", "arguments": ["@left", "@right"]},
                "left": {"class": "app.L", "arguments": ["@bottom"]},
                "right": {"class": "app.R", "arguments": ["@bottom"]},
                "bottom": {"class": "app.B"}
            }}"#,
        );
        let mut result = LintResult::new();

        check(&document, &mut result, &LintConfig::default());

        assert!(result.is_clean());
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let mut graph = Graph::new();
        graph.insert("me".to_string(), vec!["me".to_string()]);
        assert_eq!(find_cycles(&graph), vec![vec!["me".to_string(), "me".to_string()]]);
    }
}
