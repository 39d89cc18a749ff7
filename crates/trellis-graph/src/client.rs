//! The graph client and its error type.
//!
//! The client is stateless: each operation is a self-contained
//! request/response cycle through the injected executor, so one client can
//! be shared freely across concurrent callers.

use trellis_core::{GraphConfig, Value};

use crate::bolt::BoltExecutor;
use crate::encode;
use crate::executor::{ExecuteError, Executor, Row, Statement};

/// Errors from graph operations.
///
/// Not-found and already-exists conditions are never errors — they come
/// back as structured outcomes.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("connection error: {0}")]
    Connection(String),

    /// Bad input — an unsafe identifier or an invalid id. Fatal to the
    /// call; no statement is constructed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A wire entity was missing a required field.
    #[error("malformed entity: missing `{0}`")]
    MalformedEntity(&'static str),

    /// A schema constraint blocked a statement and the operation had no
    /// structured outcome for it.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("execution failure: {0}")]
    Execution(String),
}

impl From<ExecuteError> for GraphError {
    fn from(err: ExecuteError) -> Self {
        match err {
            ExecuteError::ConstraintViolation(msg) => GraphError::ConstraintViolation(msg),
            ExecuteError::ConstraintExists(msg) => GraphError::Execution(msg),
            ExecuteError::Failure(source) => GraphError::Execution(format!("{source:#}")),
        }
    }
}

/// Property-graph CRUD client over an injected [`Executor`].
///
/// Owns nothing but the executor; the database is the sole source of
/// truth. Construct one explicitly and pass it around by reference.
#[derive(Clone)]
pub struct GraphClient<E> {
    executor: E,
}

impl<E: Executor> GraphClient<E> {
    /// Wrap an executor. Use [`GraphClient::connect`] for the Bolt-backed
    /// client.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get a reference to the underlying executor for direct operations.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run one statement, logging its text and rendered parameters.
    pub(crate) async fn run(&self, statement: Statement) -> Result<Vec<Row>, ExecuteError> {
        tracing::debug!(
            query = statement.text(),
            params = %describe(statement.params()),
            "running statement"
        );
        self.executor.execute(statement).await
    }
}

impl GraphClient<BoltExecutor> {
    /// Connect to the database with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        Ok(Self::new(BoltExecutor::connect(config).await?))
    }
}

/// Reject ids the database could never have assigned.
///
/// The typed API already rules out null and non-integer ids; a negative id
/// is what remains expressible and invalid.
pub(crate) fn check_id(id: i64, what: &str) -> Result<(), GraphError> {
    if id < 0 {
        return Err(GraphError::InvalidArgument(format!(
            "{what} id must be a non-negative integer, got {id}"
        )));
    }
    Ok(())
}

/// Render bound parameters for the statement log: `name="Alice" p0=30`.
fn describe(params: &[(String, Value)]) -> String {
    params
        .iter()
        .map(|(name, value)| {
            let rendered = encode::literal(value).unwrap_or_else(|_| "?".to_string());
            format!("{name}={rendered}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
