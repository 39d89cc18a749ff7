//! Read operations: existence checks and lookups by id.

use trellis_core::{NodeRecord, Outcome, RelationRecord};

use crate::clause::{ident, node_pattern};
use crate::client::{check_id, GraphClient, GraphError};
use crate::executor::{Executor, Projection, Statement};
use crate::serialize::{node_record, relation_record};

impl<E: Executor> GraphClient<E> {
    // ── Node Lookups ─────────────────────────────────────────────

    /// True if at least one node with the given labels carries a `name`
    /// property equal to `name`.
    ///
    /// Every node this client creates carries `name`; the check leans on
    /// that convention.
    pub async fn node_exists(&self, labels: &[&str], name: &str) -> Result<bool, GraphError> {
        let pattern = node_pattern("n", labels)?;
        let stmt = Statement::new(format!(
            "MATCH {pattern} WHERE n.name = $name RETURN id(n) AS id"
        ))
        .param("name", name)
        .returning(Projection::Id);

        Ok(!self.run(stmt).await?.is_empty())
    }

    /// Get a node by id.
    pub async fn get_node(&self, id: i64) -> Result<Outcome<NodeRecord>, GraphError> {
        check_id(id, "node")?;
        let stmt = Statement::new("MATCH (n) WHERE id(n) = $id RETURN n")
            .param("id", id)
            .returning(Projection::Node);

        match self.run(stmt).await?.into_iter().next() {
            Some(row) => {
                let raw = row
                    .into_node()
                    .ok_or_else(|| GraphError::Execution("expected a node row".to_string()))?;
                Ok(Outcome::ok("succeed", node_record(raw)?))
            }
            None => Ok(Outcome::fail("not exists")),
        }
    }

    // ── Relationship Lookups ─────────────────────────────────────

    /// True if a relationship of `rel_type` connects the two nodes.
    ///
    /// With `strict` only head→tail edges match; otherwise either
    /// direction does.
    pub async fn relation_exists(
        &self,
        head_id: i64,
        tail_id: i64,
        rel_type: &str,
        strict: bool,
    ) -> Result<bool, GraphError> {
        check_id(head_id, "head")?;
        check_id(tail_id, "tail")?;
        ident(rel_type)?;

        let pattern = if strict { "(n)-[r]->(m)" } else { "(n)-[r]-(m)" };
        let stmt = Statement::new(format!(
            "MATCH {pattern} WHERE id(n) = $head AND id(m) = $tail \
             AND type(r) = $rel_type RETURN id(r) AS id"
        ))
        .param("head", head_id)
        .param("tail", tail_id)
        .param("rel_type", rel_type)
        .returning(Projection::Id);

        Ok(!self.run(stmt).await?.is_empty())
    }

    /// Get a relationship by id.
    pub async fn get_relation(&self, id: i64) -> Result<Outcome<RelationRecord>, GraphError> {
        check_id(id, "relation")?;
        let stmt = Statement::new("MATCH ()-[r]->() WHERE id(r) = $id RETURN r")
            .param("id", id)
            .returning(Projection::Relation);

        match self.run(stmt).await?.into_iter().next() {
            Some(row) => {
                let raw = row.into_relation().ok_or_else(|| {
                    GraphError::Execution("expected a relationship row".to_string())
                })?;
                Ok(Outcome::ok("succeed", relation_record(raw)?))
            }
            None => Ok(Outcome::fail("not exists")),
        }
    }
}
