//! The statement/row contract between the client and its query executor.
//!
//! The client never manages connections: it hands a [`Statement`] to an
//! injected [`Executor`] and gets back an ordered sequence of decoded
//! [`Row`]s. [`crate::BoltExecutor`] is the live implementation; tests
//! substitute their own.

use std::future::Future;

use trellis_core::{PropertyMap, Value};

use crate::clause::PropertySet;

/// What a statement's RETURN clause projects, and under which alias.
///
/// The client writes its RETURN clauses against fixed aliases so executors
/// know how to decode rows: `id(..) AS id`, nodes bound as `n`,
/// relationships bound as `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// No RETURN clause; result rows are not inspected.
    #[default]
    None,
    /// `RETURN id(..) AS id` — presence checks.
    Id,
    /// `RETURN n` — a node entity.
    Node,
    /// `RETURN r` — a relationship entity.
    Relation,
}

/// A single query: text, bound parameters, and the expected row shape.
#[derive(Debug, Clone)]
pub struct Statement {
    text: String,
    params: Vec<(String, Value)>,
    projection: Projection,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
            projection: Projection::None,
        }
    }

    /// Bind a named parameter.
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    /// Bind every parameter of a property set (`p0`, `p1`, …).
    pub fn params_from(mut self, set: &PropertySet) -> Self {
        self.params.extend(set.params());
        self
    }

    /// Declare the row shape the statement returns.
    pub fn returning(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn params(&self) -> &[(String, Value)] {
        &self.params
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }
}

/// A decoded result row, matching the statement's [`Projection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Id(i64),
    Node(RawNode),
    Relation(RawRelation),
}

impl Row {
    pub fn into_node(self) -> Option<RawNode> {
        match self {
            Row::Node(raw) => Some(raw),
            _ => None,
        }
    }

    pub fn into_relation(self) -> Option<RawRelation> {
        match self {
            Row::Relation(raw) => Some(raw),
            _ => None,
        }
    }
}

/// A node as delivered on the wire, before validation.
///
/// Fields a driver could fail to supply are optional here; the serializer
/// turns this into a [`trellis_core::NodeRecord`] or reports what is
/// missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    pub id: Option<i64>,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

/// A relationship as delivered on the wire, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRelation {
    pub id: Option<i64>,
    pub rel_type: Option<String>,
    pub head_id: Option<i64>,
    pub tail_id: Option<i64>,
    pub properties: PropertyMap,
}

/// Structured failure reasons the client inspects.
///
/// Executors classify their driver's errors into these kinds; the client
/// maps `ConstraintViolation` and `ConstraintExists` to structured
/// outcomes where an operation expects them.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// A schema constraint blocked the statement (e.g. deleting a node
    /// that still has relationships, or a unique-property collision).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The statement tried to create a constraint that already exists.
    #[error("constraint already exists: {0}")]
    ConstraintExists(String),

    /// Anything else the executor could not classify.
    #[error("execution failure: {0}")]
    Failure(#[from] anyhow::Error),
}

/// A capability that runs one statement and returns its decoded rows.
///
/// Implementations are stateless per call and safe to share across
/// concurrent callers; cancellation and timeouts are theirs to provide.
pub trait Executor: Send + Sync {
    fn execute(
        &self,
        statement: Statement,
    ) -> impl Future<Output = Result<Vec<Row>, ExecuteError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_builder() {
        let stmt = Statement::new("MATCH (n) WHERE id(n) = $id RETURN n")
            .param("id", 7)
            .returning(Projection::Node);
        assert_eq!(stmt.text(), "MATCH (n) WHERE id(n) = $id RETURN n");
        assert_eq!(stmt.params(), &[("id".to_string(), Value::Int(7))]);
        assert_eq!(stmt.projection(), Projection::Node);
    }

    #[test]
    fn test_row_accessors() {
        let node = Row::Node(RawNode {
            id: Some(3),
            ..Default::default()
        });
        assert_eq!(node.clone().into_node().unwrap().id, Some(3));
        assert!(node.into_relation().is_none());
        assert!(Row::Id(1).into_node().is_none());
    }
}
