//! Label and property clause construction.
//!
//! Cypher cannot bind identifiers (labels, relationship types, property
//! keys) as parameters, so everything embedded in statement text passes
//! through [`ident`] first. Property values never appear in statement text
//! at all — [`PropertySet`] binds them as `$p0`, `$p1`, … parameters and
//! keeps the literal rendering for logs and tests.

use trellis_core::{PropertyMap, Value};

use crate::client::GraphError;
use crate::encode;

/// Join a label set into a Cypher label expression: `Person:Employee`.
///
/// An empty set yields an empty string. Label order is preserved; matching
/// semantics do not depend on it.
pub fn labels_clause(labels: &[&str]) -> Result<String, GraphError> {
    let mut checked = Vec::with_capacity(labels.len());
    for label in labels {
        checked.push(ident(label)?);
    }
    Ok(checked.join(":"))
}

/// A node pattern for the given variable: `(n:Person:Employee)`, or `(n)`
/// when the label set is empty.
pub fn node_pattern(var: &str, labels: &[&str]) -> Result<String, GraphError> {
    let joined = labels_clause(labels)?;
    if joined.is_empty() {
        Ok(format!("({var})"))
    } else {
        Ok(format!("({var}:{joined})"))
    }
}

/// Validate a name used as a label, relationship type, or property key.
///
/// Anything outside `[A-Za-z_][A-Za-z0-9_]*` is rejected: these names are
/// embedded in statement text, so the charset is the injection boundary.
pub fn ident(name: &str) -> Result<&str, GraphError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(name)
    } else {
        Err(GraphError::InvalidArgument(format!(
            "unsafe identifier {name:?}"
        )))
    }
}

/// A validated set of property assignments for one entity variable.
///
/// Keys are checked against the safe identifier charset and backtick-quoted
/// (reserved words are legal keys); `Null` values are normalized to the
/// empty string; values with no Cypher form are dropped with a warning.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: Value,
    literal: String,
}

impl PropertySet {
    /// Validate and normalize a property map.
    ///
    /// An unsafe key is fatal; an unsupported value only drops that key.
    pub fn build(properties: &PropertyMap) -> Result<Self, GraphError> {
        let mut entries = Vec::with_capacity(properties.len());
        for (key, value) in properties {
            ident(key)?;
            let value = normalize(value);
            match encode::literal(&value) {
                Ok(literal) => entries.push(Entry {
                    key: key.clone(),
                    value,
                    literal,
                }),
                Err(reason) => {
                    tracing::warn!(key = key.as_str(), %reason, "dropping property");
                }
            }
        }
        Ok(Self { entries })
    }

    /// `SET v.`key` = $p0 …` fragments, space-joined, parameter-bound.
    /// An empty set yields an empty string.
    pub fn fragments(&self, var: &str) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("SET {var}.`{}` = $p{i}", entry.key))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parameter bindings matching [`fragments`](Self::fragments).
    pub fn params(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (format!("p{i}"), entry.value.clone()))
            .collect()
    }

    /// The same fragments with values inlined as literals:
    /// `SET v.`age` = 30 SET v.`active` = true`.
    pub fn to_literal(&self, var: &str) -> String {
        self.entries
            .iter()
            .map(|entry| format!("SET {var}.`{}` = {}", entry.key, entry.literal))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// `Null` becomes the empty string, recursively through lists, so the
/// parameter path and the literal path agree.
fn normalize(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::List(items) => Value::List(items.iter().map(normalize).collect()),
        other => other.clone(),
    }
}
