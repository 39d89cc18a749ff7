//! trellis-graph — Cypher construction and CRUD client for a property graph.
//!
//! This crate is the single point through which graph reads and writes flow.
//! Typed intents (labels, names, property maps) become parameter-bound
//! Cypher statements; raw results map back into canonical records. The
//! statement transport is an injected [`Executor`] — [`BoltExecutor`] speaks
//! Bolt via `neo4rs`, test doubles can stand in anywhere else.

pub mod bolt;
pub mod clause;
pub mod client;
pub mod encode;
pub mod executor;
pub mod mutations;
pub mod queries;
pub mod serialize;

pub use bolt::BoltExecutor;
pub use client::{GraphClient, GraphError};
pub use executor::{ExecuteError, Executor, Projection, RawNode, RawRelation, Row, Statement};
