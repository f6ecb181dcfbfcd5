//! Tests for the parameter store

use super::*;
use crate::errors::ErrorKind;
use serde_json::json;

fn sample() -> Parameters {
    Parameters::from_iter([("foo", "bar"), ("hello", "world")])
}

#[test]
fn get_returns_stored_values() {
    let parameters = sample();
    assert_eq!(parameters.get("foo").unwrap(), json!("bar"));
    assert_eq!(parameters.get("hello").unwrap(), json!("world"));
}

#[test]
fn get_or_falls_back_to_default() {
    let parameters = Parameters::from_iter([("foo", "bar")]);
    assert_eq!(parameters.get_or("aaa", json!("bbb")).unwrap(), json!("bbb"));
    assert_eq!(parameters.get_or("foo", json!("bbb")).unwrap(), json!("bar"));
}

#[test]
fn default_is_not_rendered() {
    let parameters = Parameters::from_iter([("name", "Felix")]);
    let value = parameters.get_or("missing", json!("{{ name }}")).unwrap();
    assert_eq!(value, json!("{{ name }}"));
}

#[test]
fn missing_key_without_default_fails() {
    let error = sample().get("aaa").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::KeyNotFound);
}

#[test]
fn get_resolves_references_to_other_parameters() {
    let parameters = Parameters::from_iter([("name", "Felix"), ("hello_message", "Hi {{ name }}!")]);
    assert_eq!(parameters.get("hello_message").unwrap(), json!("Hi Felix!"));
}

#[test]
fn references_resolve_transitively() {
    let mut parameters = Parameters::from_iter([
        ("host", "localhost"),
        ("origin", "http://{{ host }}:{{ port }}"),
        ("endpoint", "{{ origin }}/api"),
    ]);
    parameters.set("port", 8080);
    assert_eq!(
        parameters.get("endpoint").unwrap(),
        json!("http://localhost:8080/api")
    );
}

#[test]
fn unknown_reference_fails_with_parameter_not_found() {
    let parameters = Parameters::from_iter([("greeting", "Hi {{ nobody }}")]);
    let error = parameters.get("greeting").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ParameterNotFound);
}

#[test]
fn circular_reference_is_detected() {
    let parameters = Parameters::from_iter([("a", "{{ b }}"), ("b", "x{{ a }}")]);
    match parameters.get("a").unwrap_err() {
        WireError::CyclicParameter { chain } => assert_eq!(chain, vec!["a", "b", "a"]),
        other => panic!("Expected CyclicParameter, got {other:?}"),
    }
}

#[test]
fn same_parameter_twice_is_not_a_cycle() {
    let parameters = Parameters::from_iter([("x", "1"), ("pair", "{{ x }},{{ x }}")]);
    assert_eq!(parameters.get("pair").unwrap(), json!("1,1"));
}

#[test]
fn non_string_values_are_returned_unchanged() {
    let mut parameters = Parameters::new();
    parameters.set("ports", json!([80, 443]));
    parameters.set("debug", true);
    assert_eq!(parameters.get("ports").unwrap(), json!([80, 443]));
    assert_eq!(parameters.get("debug").unwrap(), json!(true));
}

#[test]
fn set_overwrites() {
    let mut parameters = sample();
    parameters.set("foo", "abc");
    assert_eq!(parameters.get("foo").unwrap(), json!("abc"));
}

#[test]
fn has_reports_presence() {
    let parameters = sample();
    assert!(parameters.has("foo"));
    assert!(parameters.has("hello"));
    assert!(!parameters.has("another"));
}

#[test]
fn all_returns_raw_values() {
    let parameters = Parameters::from_iter([("name", "Felix"), ("greeting", "Hi {{ name }}")]);
    let all = parameters.all();
    assert_eq!(all.len(), 2);
    assert_eq!(all["greeting"], json!("Hi {{ name }}"));
}

#[test]
fn add_merges_entries() {
    let mut parameters = Parameters::from_iter([("foo", "bar")]);
    parameters.add([("hello", json!("world")), ("bbb", json!(222))]);
    assert_eq!(parameters.get("foo").unwrap(), json!("bar"));
    assert_eq!(parameters.get("hello").unwrap(), json!("world"));
    assert_eq!(parameters.get("bbb").unwrap(), json!(222));
}

#[test]
fn remove_deletes_and_ignores_missing() {
    let mut parameters = Parameters::from_iter([
        ("foo", json!("bar")),
        ("hello", json!("world")),
        ("aaa", json!(111)),
    ]);
    parameters.remove("hello");
    parameters.remove("never-there");
    let expected: BTreeMap<String, Value> =
        [("foo".to_string(), json!("bar")), ("aaa".to_string(), json!(111))]
            .into_iter()
            .collect();
    assert_eq!(parameters.all(), expected);
}

#[test]
fn keys_and_count() {
    let mut parameters = sample();
    parameters.set("aaa", 111);
    let keys = parameters.keys();
    assert!(keys.contains(&"foo".to_string()));
    assert!(keys.contains(&"hello".to_string()));
    assert_eq!(parameters.count(), 3);
}

#[test]
fn render_uses_the_store() {
    let parameters = Parameters::from_iter([("surname", "Carmona")]);
    assert_eq!(
        parameters.render(r"\{\{ foo \}\} {{ surname }}").unwrap(),
        "{{ foo }} Carmona"
    );
}

#[test]
fn from_value_requires_an_object() {
    let parameters = Parameters::from_value(json!({"a": 1})).unwrap();
    assert_eq!(parameters.count(), 1);

    let error = Parameters::from_value(json!([1, 2])).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MalformedDocument);
}
