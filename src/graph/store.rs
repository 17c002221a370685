use std::collections::{HashMap, HashSet};

use crate::models::{Edge, EdgeAttrs, Node, NodeAttrs, NodeKind, Relation};

use super::GraphError;

/// Accumulates nodes and edges, validating each one as it is added.
///
/// The only way to obtain a [`GraphStore`] is [`GraphBuilder::build`], so a
/// failed `add_*` never leaks a half-built graph to queries.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    pairs: HashSet<(usize, usize)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateId(node.id));
        }
        validate_node(&node)?;
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let from = self.position(&edge.from)?;
        let to = self.position(&edge.to)?;

        let relation = edge.relation();
        let from_kind = self.nodes[from].kind();
        let to_kind = self.nodes[to].kind();
        if relation.endpoints() != (from_kind, to_kind) {
            return Err(GraphError::InvalidRelation {
                relation,
                from: from_kind,
                to: to_kind,
            });
        }

        validate_edge(&edge)?;

        if !self.pairs.insert((from, to)) {
            return Err(GraphError::DuplicateEdge {
                from: edge.from,
                to: edge.to,
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Freeze the accumulated nodes and edges into an immutable store.
    pub fn build(self) -> GraphStore {
        let mut outgoing = vec![Vec::new(); self.nodes.len()];
        let mut incoming = vec![Vec::new(); self.nodes.len()];
        for (i, edge) in self.edges.iter().enumerate() {
            // Endpoints were resolved in add_edge
            outgoing[self.index[&edge.from]].push(i);
            incoming[self.index[&edge.to]].push(i);
        }

        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Knowledge graph built"
        );

        GraphStore {
            nodes: self.nodes,
            index: self.index,
            edges: self.edges,
            outgoing,
            incoming,
        }
    }

    fn position(&self, id: &str) -> Result<usize, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }
}

/// Immutable diagnostic knowledge graph.
///
/// All lookups return nodes and edges in insertion order, which keeps query
/// results reproducible.
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl GraphStore {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Bulk-load nodes then edges. Stops at the first invalid item.
    pub fn from_parts<N, E>(nodes: N, edges: E) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = Edge>,
    {
        let mut builder = GraphBuilder::new();
        for node in nodes {
            builder.add_node(node)?;
        }
        for edge in edges {
            builder.add_edge(edge)?;
        }
        Ok(builder.build())
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Display name of a node, if present.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get_node(id).map(|n| n.name.as_str())
    }

    pub fn edges_from(&self, id: &str, relation: Option<Relation>) -> Vec<&Edge> {
        self.adjacent(&self.outgoing, id, relation)
    }

    pub fn edges_to(&self, id: &str, relation: Option<Relation>) -> Vec<&Edge> {
        self.adjacent(&self.incoming, id, relation)
    }

    /// The edge `from -> to` carrying `relation`, if any.
    pub fn edge_between(&self, from: &str, to: &str, relation: Relation) -> Option<&Edge> {
        let i = *self.index.get(from)?;
        self.outgoing[i]
            .iter()
            .map(|&e| &self.edges[e])
            .find(|e| e.to == to && e.relation() == relation)
    }

    pub fn nodes_by_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.kind() == kind).collect()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn adjacent(
        &self,
        table: &[Vec<usize>],
        id: &str,
        relation: Option<Relation>,
    ) -> Vec<&Edge> {
        let Some(&i) = self.index.get(id) else {
            return Vec::new();
        };
        table[i]
            .iter()
            .map(|&e| &self.edges[e])
            .filter(|e| relation.map_or(true, |r| e.relation() == r))
            .collect()
    }
}

fn validate_node(node: &Node) -> Result<(), GraphError> {
    match node.attrs {
        NodeAttrs::Disease { prevalence, .. } => check_unit(&node.id, "prevalence", prevalence),
        NodeAttrs::RiskFactor { risk_multiplier } => {
            check_positive(&node.id, "risk_multiplier", risk_multiplier)
        }
        NodeAttrs::Finding { .. } | NodeAttrs::Symptom => Ok(()),
    }
}

fn validate_edge(edge: &Edge) -> Result<(), GraphError> {
    let owner = format!("{} -> {}", edge.from, edge.to);
    match edge.attrs {
        EdgeAttrs::ShowsFinding {
            confidence,
            specificity,
        } => {
            check_unit(&owner, "confidence", confidence)?;
            check_unit(&owner, "specificity", specificity)
        }
        EdgeAttrs::HasSymptom { confidence } => check_unit(&owner, "confidence", confidence),
        EdgeAttrs::IncreasesRisk { relative_risk } => {
            check_positive(&owner, "relative_risk", relative_risk)
        }
    }
}

fn check_unit(owner: &str, attribute: &'static str, value: f64) -> Result<(), GraphError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GraphError::InvalidAttribute {
            owner: owner.to_string(),
            attribute,
            value,
        })
    }
}

// Multiplicative factors: zero would collapse every score it touches.
fn check_positive(owner: &str, attribute: &'static str, value: f64) -> Result<(), GraphError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidAttribute {
            owner: owner.to_string(),
            attribute,
            value,
        })
    }
}
