//! Diagnostic knowledge graph: typed nodes, typed attributed edges, and the
//! built-in breast imaging catalog.
//!
//! A [`GraphStore`] only comes out of a successful [`GraphBuilder::build`];
//! once built it is immutable and safe to share across threads behind an
//! `Arc`. [`KnowledgeBase`] wraps the one-time build or load.

pub mod catalog;
pub mod persist;
pub mod shared;
pub mod store;

pub use catalog::breast_imaging_graph;
pub use shared::{GraphSource, KnowledgeBase};
pub use store::{GraphBuilder, GraphStore};

use thiserror::Error;

use crate::models::{NodeKind, Relation};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Relation {relation} cannot connect {from} to {to}")]
    InvalidRelation {
        relation: Relation,
        from: NodeKind,
        to: NodeKind,
    },

    #[error("Duplicate edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("Invalid attribute {attribute} on {owner}: {value}")]
    InvalidAttribute {
        owner: String,
        attribute: &'static str,
        value: f64,
    },

    #[error("Graph serialization failed: {0}")]
    Serialization(String),

    #[error("Graph deserialization failed: {0}")]
    Deserialization(String),

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}
