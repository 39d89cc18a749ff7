//! Bolt transport: the `neo4rs`-backed executor.
//!
//! Owns the connection pool, binds statement parameters as Bolt values,
//! decodes result rows per the statement's projection, and classifies
//! server failures into [`ExecuteError`] kinds by their Neo4j status code.

use neo4rs::{ConfigBuilder, Graph};

use trellis_core::{GraphConfig, PropertyMap, Value};

use crate::client::GraphError;
use crate::executor::{ExecuteError, Executor, Projection, RawNode, RawRelation, Row, Statement};

/// Thread-safe Bolt executor with connection pooling. Clone is cheap
/// (inner Arc).
#[derive(Clone)]
pub struct BoltExecutor {
    graph: Graph,
}

impl BoltExecutor {
    /// Connect to the database with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let uri = config.uri();
        let neo_config = ConfigBuilder::default()
            .uri(&uri)
            .user(&config.username)
            .password(&config.password)
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %uri, "connected to graph database");
        Ok(Self { graph })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

impl Executor for BoltExecutor {
    async fn execute(&self, statement: Statement) -> Result<Vec<Row>, ExecuteError> {
        let projection = statement.projection();
        let mut query = neo4rs::query(statement.text());
        for (name, value) in statement.params() {
            query = bind(query, name, value);
        }

        if projection == Projection::None {
            self.graph.run(query).await.map_err(classify)?;
            return Ok(Vec::new());
        }

        let mut stream = self.graph.execute(query).await.map_err(classify)?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(classify)? {
            rows.push(decode(&row, projection)?);
        }
        Ok(rows)
    }
}

/// Bind one parameter as its Bolt type.
///
/// Property sets arrive normalized (no nulls, lists homogeneous), so lists
/// bind as typed vectors; anything unexpected falls back to a string form
/// rather than failing the statement.
fn bind(query: neo4rs::Query, name: &str, value: &Value) -> neo4rs::Query {
    match value {
        Value::Null => query.param(name, ""),
        Value::Bool(b) => query.param(name, *b),
        Value::Int(i) => query.param(name, *i),
        Value::Float(f) => query.param(name, *f),
        Value::String(s) => query.param(name, s.as_str()),
        Value::List(items) => bind_list(query, name, items),
        Value::Map(_) => {
            tracing::warn!(param = name, "binding map parameter as empty string");
            query.param(name, "")
        }
    }
}

fn bind_list(query: neo4rs::Query, name: &str, items: &[Value]) -> neo4rs::Query {
    match items.first() {
        None => query.param(name, Vec::<String>::new()),
        Some(Value::Int(_)) => {
            let xs: Vec<i64> = items
                .iter()
                .filter_map(|v| match v {
                    Value::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            query.param(name, xs)
        }
        Some(Value::Float(_)) => {
            let xs: Vec<f64> = items
                .iter()
                .filter_map(|v| match v {
                    Value::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            query.param(name, xs)
        }
        Some(Value::Bool(_)) => {
            let xs: Vec<bool> = items
                .iter()
                .filter_map(|v| match v {
                    Value::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            query.param(name, xs)
        }
        _ => {
            let xs: Vec<String> = items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect();
            query.param(name, xs)
        }
    }
}

/// Decode one result row per the statement's projection.
fn decode(row: &neo4rs::Row, projection: Projection) -> Result<Row, ExecuteError> {
    match projection {
        Projection::None => Err(ExecuteError::Failure(anyhow::anyhow!(
            "row received for a statement with no projection"
        ))),
        Projection::Id => {
            let id: i64 = row
                .get("id")
                .map_err(|e| ExecuteError::Failure(anyhow::anyhow!("no `id` column: {e}")))?;
            Ok(Row::Id(id))
        }
        Projection::Node => {
            let node: neo4rs::Node = row
                .get("n")
                .map_err(|e| ExecuteError::Failure(anyhow::anyhow!("no `n` column: {e}")))?;
            Ok(Row::Node(raw_node(&node)))
        }
        Projection::Relation => {
            let rel: neo4rs::Relation = row
                .get("r")
                .map_err(|e| ExecuteError::Failure(anyhow::anyhow!("no `r` column: {e}")))?;
            Ok(Row::Relation(raw_relation(&rel)))
        }
    }
}

fn raw_node(node: &neo4rs::Node) -> RawNode {
    RawNode {
        id: Some(node.id()),
        labels: node.labels().iter().map(|s| s.to_string()).collect(),
        properties: read_properties(node.keys(), |key| node.get::<serde_json::Value>(key).ok()),
    }
}

fn raw_relation(rel: &neo4rs::Relation) -> RawRelation {
    RawRelation {
        id: Some(rel.id()),
        rel_type: Some(rel.typ().to_string()),
        head_id: Some(rel.start_node_id()),
        tail_id: Some(rel.end_node_id()),
        properties: read_properties(rel.keys(), |key| rel.get::<serde_json::Value>(key).ok()),
    }
}

/// Read every property the entity carries, skipping values the driver
/// cannot hand over as plain data (temporal and spatial Bolt types).
fn read_properties<'a>(
    keys: Vec<&'a str>,
    get: impl Fn(&str) -> Option<serde_json::Value>,
) -> PropertyMap {
    let mut properties = PropertyMap::new();
    for key in keys {
        match get(key) {
            Some(json) => {
                properties.insert(key.to_string(), Value::from(json));
            }
            None => tracing::warn!(key, "skipping property with unreadable bolt type"),
        }
    }
    properties
}

/// Classify a driver error by the Neo4j status code in its message.
///
/// Only the two schema signals the client inspects get their own kind;
/// everything else is an opaque failure.
fn classify(err: neo4rs::Error) -> ExecuteError {
    let text = err.to_string();
    if text.contains("ConstraintValidationFailed") {
        ExecuteError::ConstraintViolation(text)
    } else if text.contains("ConstraintAlreadyExists") || text.contains("EquivalentSchemaRule") {
        ExecuteError::ConstraintExists(text)
    } else {
        ExecuteError::Failure(err.into())
    }
}
