//! Graph snapshot serialization.
//!
//! Blob layout: 8 magic bytes, then a JSON snapshot of nodes and edges in
//! insertion order. Loading replays the snapshot through [`GraphBuilder`], so
//! a tampered blob cannot produce a graph that violates the store's
//! invariants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Edge, Node};

use super::{GraphError, GraphStore};

/// Magic bytes for persisted graph blobs.
const GRAPH_MAGIC: &[u8; 8] = b"DXGRAPH\x01";

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    nodes: &'a [Node],
    edges: &'a [Edge],
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphStore {
    pub fn save(&self) -> Result<Vec<u8>, GraphError> {
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            nodes: self.nodes(),
            edges: self.edges(),
        };
        let mut out = GRAPH_MAGIC.to_vec();
        serde_json::to_writer(&mut out, &snapshot)
            .map_err(|e| GraphError::Serialization(e.to_string()))?;
        Ok(out)
    }

    pub fn load(bytes: &[u8]) -> Result<GraphStore, GraphError> {
        let body = bytes
            .strip_prefix(GRAPH_MAGIC.as_slice())
            .ok_or_else(|| GraphError::Deserialization("missing graph header".into()))?;

        let snapshot: Snapshot = serde_json::from_slice(body)
            .map_err(|e| GraphError::Deserialization(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(GraphError::Deserialization(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        GraphStore::from_parts(snapshot.nodes, snapshot.edges)
            .map_err(|e| GraphError::Deserialization(format!("invalid graph structure: {e}")))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), GraphError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
            }
        }
        std::fs::write(path, self.save()?).map_err(|e| io_error(path, e))?;
        tracing::info!(
            path = %path.display(),
            nodes = self.node_count(),
            "Knowledge graph saved"
        );
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<GraphStore, GraphError> {
        let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
        let graph = GraphStore::load(&bytes)?;
        tracing::info!(
            path = %path.display(),
            nodes = graph.node_count(),
            "Knowledge graph loaded"
        );
        Ok(graph)
    }
}

fn io_error(path: &Path, e: std::io::Error) -> GraphError {
    GraphError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
