//! Write operations: constraint setup and CRUD for nodes and relationships.
//!
//! Create operations are exists-check-then-create in two round-trips, so
//! concurrent callers can race the window between them. The uniqueness
//! constraint from [`GraphClient::ensure_unique_constraint`] is the
//! backstop: a race loser whose CREATE trips it gets the same `exists`
//! outcome as the fast path.

use trellis_core::{NodeRecord, Outcome, PropertyMap, RelationRecord};

use crate::clause::{ident, labels_clause, node_pattern, PropertySet};
use crate::client::{check_id, GraphClient, GraphError};
use crate::executor::{ExecuteError, Executor, Projection, Statement};
use crate::serialize::{node_record, relation_record};

impl<E: Executor> GraphClient<E> {
    // ── Constraints ──────────────────────────────────────────────

    /// Register a uniqueness constraint for `property` on the label set.
    ///
    /// Idempotent: an already-registered constraint reports
    /// `{true, "exists"}`. Any other failure propagates as an error.
    pub async fn ensure_unique_constraint(
        &self,
        labels: &[&str],
        property: &str,
    ) -> Result<Outcome<()>, GraphError> {
        let labels = labels_clause(labels)?;
        if labels.is_empty() {
            return Err(GraphError::InvalidArgument(
                "a uniqueness constraint requires at least one label".to_string(),
            ));
        }
        ident(property)?;

        let stmt = Statement::new(format!(
            "CREATE CONSTRAINT FOR (n:{labels}) REQUIRE n.`{property}` IS UNIQUE"
        ));

        match self.run(stmt).await {
            Ok(_) => Ok(Outcome::done("succeed")),
            Err(ExecuteError::ConstraintExists(_)) => Ok(Outcome::done("exists")),
            Err(e) => Err(e.into()),
        }
    }

    // ── Node CRUD ────────────────────────────────────────────────

    /// Create a node with the given labels, name, and properties.
    ///
    /// `name` is forced into the property set. A node with these labels
    /// and name already existing reports `{false, "exists"}` — so does a
    /// CREATE that trips the uniqueness constraint when two callers race
    /// the existence check.
    pub async fn create_node(
        &self,
        labels: &[&str],
        name: &str,
        properties: &PropertyMap,
    ) -> Result<Outcome<NodeRecord>, GraphError> {
        if self.node_exists(labels, name).await? {
            tracing::info!(?labels, name, "node already exists");
            return Ok(Outcome::fail("exists"));
        }

        let pattern = node_pattern("n", labels)?;
        let props = PropertySet::build(properties)?;
        let mut text = format!("CREATE {pattern} SET n.name = $name");
        if !props.is_empty() {
            text.push(' ');
            text.push_str(&props.fragments("n"));
        }
        text.push_str(" RETURN n");

        let stmt = Statement::new(text)
            .param("name", name)
            .params_from(&props)
            .returning(Projection::Node);

        let rows = match self.run(stmt).await {
            Ok(rows) => rows,
            Err(ExecuteError::ConstraintViolation(_)) => return Ok(Outcome::fail("exists")),
            Err(e) => return Err(e.into()),
        };
        let raw = rows
            .into_iter()
            .next()
            .and_then(|row| row.into_node())
            .ok_or_else(|| GraphError::Execution("CREATE returned no node".to_string()))?;
        Ok(Outcome::ok("succeed", node_record(raw)?))
    }

    /// Apply a property map to the node with the given id.
    pub async fn update_node(
        &self,
        id: i64,
        properties: &PropertyMap,
    ) -> Result<Outcome<NodeRecord>, GraphError> {
        check_id(id, "node")?;
        let props = PropertySet::build(properties)?;
        let mut text = "MATCH (n) WHERE id(n) = $id".to_string();
        if !props.is_empty() {
            text.push(' ');
            text.push_str(&props.fragments("n"));
        }
        text.push_str(" RETURN n");

        let stmt = Statement::new(text)
            .param("id", id)
            .params_from(&props)
            .returning(Projection::Node);

        match self.run(stmt).await?.into_iter().next() {
            Some(row) => {
                let raw = row
                    .into_node()
                    .ok_or_else(|| GraphError::Execution("expected a node row".to_string()))?;
                Ok(Outcome::ok("updated", node_record(raw)?))
            }
            None => Ok(Outcome::fail("not exists")),
        }
    }

    /// Delete a node by id.
    ///
    /// A node that still has relationships reports
    /// `{false, "still has relations"}`. Deleting an id that matches
    /// nothing still reports `{true, "deleted"}`.
    pub async fn delete_node(&self, id: i64) -> Result<Outcome<()>, GraphError> {
        check_id(id, "node")?;
        let stmt = Statement::new("MATCH (n) WHERE id(n) = $id DELETE n").param("id", id);

        match self.run(stmt).await {
            Ok(_) => Ok(Outcome::done("deleted")),
            Err(ExecuteError::ConstraintViolation(_)) => {
                Ok(Outcome::fail("still has relations"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a single property key from a node.
    ///
    /// No existence check: an id that matches nothing still reports
    /// success.
    pub async fn delete_property(&self, id: i64, key: &str) -> Result<Outcome<()>, GraphError> {
        check_id(id, "node")?;
        ident(key)?;
        let stmt =
            Statement::new(format!("MATCH (n) WHERE id(n) = $id REMOVE n.`{key}`")).param("id", id);

        self.run(stmt).await?;
        Ok(Outcome::done("succeed"))
    }

    // ── Relationship CRUD ────────────────────────────────────────

    /// Create a `rel_type` relationship from `head_id` to `tail_id`.
    ///
    /// A relationship of this type already connecting the pair — in
    /// either direction — reports `{false, "exists"}`. A missing endpoint
    /// reports `{false, "not exists"}`.
    pub async fn create_relation(
        &self,
        head_id: i64,
        tail_id: i64,
        properties: &PropertyMap,
        rel_type: &str,
    ) -> Result<Outcome<RelationRecord>, GraphError> {
        check_id(head_id, "head")?;
        check_id(tail_id, "tail")?;
        ident(rel_type)?;

        if self.relation_exists(head_id, tail_id, rel_type, false).await? {
            tracing::info!(head_id, tail_id, rel_type, "relationship already exists");
            return Ok(Outcome::fail("exists"));
        }

        let props = PropertySet::build(properties)?;
        let mut text = format!(
            "MATCH (a), (b) WHERE id(a) = $head AND id(b) = $tail \
             CREATE (a)-[r:`{rel_type}`]->(b)"
        );
        if !props.is_empty() {
            text.push(' ');
            text.push_str(&props.fragments("r"));
        }
        text.push_str(" RETURN r");

        let stmt = Statement::new(text)
            .param("head", head_id)
            .param("tail", tail_id)
            .params_from(&props)
            .returning(Projection::Relation);

        match self.run(stmt).await?.into_iter().next() {
            Some(row) => {
                let raw = row.into_relation().ok_or_else(|| {
                    GraphError::Execution("expected a relationship row".to_string())
                })?;
                Ok(Outcome::ok("succeed", relation_record(raw)?))
            }
            // MATCH found no endpoint pair, so nothing was created.
            None => Ok(Outcome::fail("not exists")),
        }
    }

    /// Apply a property map to the relationship with the given id.
    pub async fn update_relation(
        &self,
        id: i64,
        properties: &PropertyMap,
    ) -> Result<Outcome<RelationRecord>, GraphError> {
        check_id(id, "relation")?;
        let props = PropertySet::build(properties)?;
        let mut text = "MATCH ()-[r]-() WHERE id(r) = $id".to_string();
        if !props.is_empty() {
            text.push(' ');
            text.push_str(&props.fragments("r"));
        }
        text.push_str(" RETURN r");

        let stmt = Statement::new(text)
            .param("id", id)
            .params_from(&props)
            .returning(Projection::Relation);

        match self.run(stmt).await?.into_iter().next() {
            Some(row) => {
                let raw = row.into_relation().ok_or_else(|| {
                    GraphError::Execution("expected a relationship row".to_string())
                })?;
                Ok(Outcome::ok("updated", relation_record(raw)?))
            }
            None => Ok(Outcome::fail("relation not exists")),
        }
    }

    /// Delete a relationship by id. An id that matches nothing still
    /// reports `{true, "deleted"}`.
    pub async fn delete_relation(&self, id: i64) -> Result<Outcome<()>, GraphError> {
        check_id(id, "relation")?;
        let stmt = Statement::new("MATCH ()-[r]-() WHERE id(r) = $id DELETE r").param("id", id);

        self.run(stmt).await?;
        Ok(Outcome::done("deleted"))
    }
}
