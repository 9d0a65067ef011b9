//! Placeholder substitution for adapter templates.
//!
//! Templates reference server attributes with `{{key}}` tokens. A string that
//! is exactly one token is replaced by the attribute's raw value, keeping its
//! type. Any other string has each token replaced by the value's text form.
//! Tokens naming unknown attributes are left untouched.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::server::AttributeStore;
use crate::value::Value;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Regex pattern matching a placeholder token.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([^{}\s]+)\}\}";

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("Invalid regex pattern"));

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Format the placeholder token for an attribute key.
pub fn placeholder(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}

/// Resolve every placeholder in a template tree against a server's attributes.
///
/// The template is not modified; a fresh tree is returned.
pub fn resolve(node: &Value, store: &AttributeStore) -> Value {
    match node {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve(v, store)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|item| resolve(item, store)).collect())
        }
        Value::String(s) => resolve_str(s, store),
        Value::Null
        | Value::Bool(_)
        | Value::Integer(_)
        | Value::Unsigned(_)
        | Value::Float(_) => node.clone(),
    }
}

/// Resolve placeholders in a single string leaf.
///
/// Attributes are visited in ascending key order. An exact match on the
/// current text returns the attribute value itself; otherwise occurrences are
/// interpolated and the next attribute is tried.
fn resolve_str(s: &str, store: &AttributeStore) -> Value {
    if !s.contains("{{") {
        return Value::String(s.to_string());
    }

    let mut text = s.to_string();
    for (key, value) in store.attributes() {
        let token = placeholder(key);
        if !text.contains(&token) {
            continue;
        }
        if text == token {
            return value.clone();
        }
        text = text.replace(&token, &value.render());
    }

    Value::String(text)
}

/// Collect placeholder tokens that remain anywhere in a tree.
///
/// Returned sorted and without duplicates, e.g. `["{{token}}"]`.
pub fn unresolved_placeholders(node: &Value) -> Vec<String> {
    let mut found = BTreeSet::new();
    collect_placeholders(node, &mut found);
    found.into_iter().collect()
}

fn collect_placeholders(node: &Value, found: &mut BTreeSet<String>) {
    match node {
        Value::Mapping(map) => map.values().for_each(|v| collect_placeholders(v, found)),
        Value::Sequence(items) => items.iter().for_each(|v| collect_placeholders(v, found)),
        Value::String(s) => {
            for cap in PLACEHOLDER_REGEX.captures_iter(s) {
                found.insert(cap[0].to_string());
            }
        }
        Value::Null
        | Value::Bool(_)
        | Value::Integer(_)
        | Value::Unsigned(_)
        | Value::Float(_) => {}
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
