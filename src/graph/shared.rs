use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use super::{breast_imaging_graph, GraphError, GraphStore};

/// Where the knowledge graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// The in-code breast imaging catalog.
    Builtin,
    /// A persisted snapshot; a missing or invalid file is an error.
    File(PathBuf),
    /// A persisted snapshot when the file exists, the catalog otherwise.
    FileOrBuiltin(PathBuf),
}

impl GraphSource {
    pub fn materialize(&self) -> Result<GraphStore, GraphError> {
        match self {
            Self::Builtin => breast_imaging_graph(),
            Self::File(path) => GraphStore::load_from_path(path),
            Self::FileOrBuiltin(path) if path.exists() => GraphStore::load_from_path(path),
            Self::FileOrBuiltin(path) => {
                tracing::debug!(path = %path.display(), "No saved graph, using built-in catalog");
                breast_imaging_graph()
            }
        }
    }
}

/// Owned handle that builds or loads the graph exactly once, on first use.
///
/// Later calls share the same `Arc<GraphStore>`; a failed build is cached
/// too, so a broken snapshot is not re-read on every request.
#[derive(Debug)]
pub struct KnowledgeBase {
    source: GraphSource,
    cell: OnceLock<Result<Arc<GraphStore>, GraphError>>,
}

impl KnowledgeBase {
    pub fn new(source: GraphSource) -> Self {
        Self {
            source,
            cell: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &GraphSource {
        &self.source
    }

    pub fn graph(&self) -> Result<Arc<GraphStore>, GraphError> {
        self.cell
            .get_or_init(|| self.source.materialize().map(Arc::new))
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(GraphSource::Builtin)
    }
}
