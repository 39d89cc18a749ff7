//! Core domain types for the trellis graph client.
//!
//! These types cross the client boundary in both directions: property maps
//! travel into queries, records and outcomes travel back out. The database
//! is the sole source of truth — everything here is a value object.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::error::TrellisError;

// ── Property Values ───────────────────────────────────────────────

/// A property value as stored on a node or relationship.
///
/// Only scalars and homogeneous lists of scalars are storable; `Map` and
/// nested lists exist so that unsupported shapes are representable and can
/// be reported (then dropped) instead of silently mangled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Name of the value's kind, used in warnings and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Value::from(f),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A node's or relationship's property map.
///
/// Keys are unique; the canonical (sorted) iteration order keeps clause
/// construction deterministic.
pub type PropertyMap = BTreeMap<String, Value>;

/// Parse a JSON object into a [`PropertyMap`].
pub fn properties_from_json(json: &str) -> Result<PropertyMap, TrellisError> {
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Object(entries) => Ok(entries
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()),
        _ => Err(TrellisError::Serialization(serde_json::Error::custom(
            "expected a JSON object",
        ))),
    }
}

// ── Records ───────────────────────────────────────────────────────

/// A graph node as returned to callers.
///
/// The id is database-assigned and immutable for the node's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

/// A typed, directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub head_id: i64,
    pub tail_id: i64,
    pub properties: PropertyMap,
}

// ── Outcomes ──────────────────────────────────────────────────────

/// The result shape of every client operation: `{status, message, entity?}`.
///
/// Not-found and already-exists conditions are reported here with
/// `status: false`, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<T>,
}

impl<T> Outcome<T> {
    /// Success carrying an entity.
    pub fn ok(message: impl Into<String>, entity: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            entity: Some(entity),
        }
    }

    /// Success with no entity to return.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
            entity: None,
        }
    }

    /// Structured failure, e.g. `exists` or `not exists`.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            entity: None,
        }
    }
}
