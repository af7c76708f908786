// src/simulation/topology.rs

use std::collections::{HashMap, HashSet};

use crate::model::graph::{Edge, Node, NodeKind};

/// Feeding relationships derived from supplier→factory edges.
///
/// Only those edges carry structural meaning. Every other edge is a plain
/// transport link and leaves this picture untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    /// factory id → suppliers feeding it, in edge order, deduplicated
    feeders: HashMap<String, Vec<String>>,
    finite_suppliers: HashSet<String>,
}

impl Topology {
    /// Suppliers feeding `factory_id`, ordered by the first edge that connects them.
    pub fn feeders_of(&self, factory_id: &str) -> &[String] {
        self.feeders.get(factory_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A supplier is finite when it feeds at least one factory.
    pub fn is_finite(&self, supplier_id: &str) -> bool {
        self.finite_suppliers.contains(supplier_id)
    }

    pub fn finite_suppliers(&self) -> &HashSet<String> {
        &self.finite_suppliers
    }

    fn record(&mut self, supplier_id: &str, factory_id: &str) {
        let feeders = self.feeders.entry(factory_id.to_string()).or_default();
        if !feeders.iter().any(|s| s == supplier_id) {
            feeders.push(supplier_id.to_string());
        }

        self.finite_suppliers.insert(supplier_id.to_string());
    }
}

/// Index of nodes by id. When ids repeat, the first node wins.
pub fn index_nodes(nodes: &[Node]) -> HashMap<&str, &Node> {
    let mut index = HashMap::with_capacity(nodes.len());
    for node in nodes {
        index.entry(node.id.as_str()).or_insert(node);
    }
    index
}

/// Scans every edge once and records supplier→factory relationships.
///
/// Edges whose source or target is not a known node are skipped.
pub fn analyze(nodes: &[Node], edges: &[Edge]) -> Topology {
    let index = index_nodes(nodes);
    let mut topology = Topology::default();

    for edge in edges {
        let (Some(source), Some(target)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            continue;
        };

        if source.kind() == NodeKind::Supplier && target.kind() == NodeKind::Factory {
            topology.record(&source.id, &target.id);
        }
    }

    topology
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::{EdgeData, NodeData};

    fn node(id: &str, kind: NodeKind) -> Node {
        Node {
            id: id.to_string(),
            data: NodeData::new(kind, id),
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            data: EdgeData { cost: 1.0, lead_time: 1.0 },
        }
    }

    #[test]
    fn supplier_feeding_factory_is_finite() {
        let nodes = vec![node("S1", NodeKind::Supplier), node("F1", NodeKind::Factory)];
        let topology = analyze(&nodes, &[edge("e1", "S1", "F1")]);

        assert!(topology.is_finite("S1"));
        assert_eq!(topology.feeders_of("F1"), ["S1".to_string()]);
    }

    #[test]
    fn non_factory_edges_leave_supplier_infinite() {
        let nodes = vec![
            node("S1", NodeKind::Supplier),
            node("D1", NodeKind::Distributor),
            node("F1", NodeKind::Factory),
            node("R1", NodeKind::Retailer),
        ];
        let edges = vec![
            edge("e1", "S1", "D1"),
            edge("e2", "F1", "D1"),
            edge("e3", "D1", "R1"),
        ];
        let topology = analyze(&nodes, &edges);

        assert!(!topology.is_finite("S1"));
        assert!(topology.finite_suppliers().is_empty());
        assert!(topology.feeders_of("F1").is_empty());
    }

    #[test]
    fn adding_distributor_edge_keeps_classification() {
        let nodes = vec![
            node("S1", NodeKind::Supplier),
            node("F1", NodeKind::Factory),
            node("D1", NodeKind::Distributor),
        ];
        let base = vec![edge("e1", "S1", "F1")];
        let mut extended = base.clone();
        extended.push(edge("e2", "S1", "D1"));

        assert_eq!(
            analyze(&nodes, &base).finite_suppliers(),
            analyze(&nodes, &extended).finite_suppliers()
        );
    }

    #[test]
    fn dangling_edges_are_ignored() {
        let nodes = vec![node("S1", NodeKind::Supplier)];
        let topology = analyze(&nodes, &[edge("e1", "S1", "ghost"), edge("e2", "ghost", "S1")]);
        assert_eq!(topology, Topology::default());
    }

    #[test]
    fn feeders_follow_edge_order_without_duplicates() {
        let nodes = vec![
            node("S1", NodeKind::Supplier),
            node("S2", NodeKind::Supplier),
            node("F1", NodeKind::Factory),
        ];
        let edges = vec![
            edge("e1", "S2", "F1"),
            edge("e2", "S1", "F1"),
            edge("e3", "S2", "F1"),
        ];
        let topology = analyze(&nodes, &edges);

        assert_eq!(topology.feeders_of("F1"), ["S2".to_string(), "S1".to_string()]);
    }

    #[test]
    fn duplicate_node_ids_resolve_to_first() {
        let nodes = vec![node("X", NodeKind::Supplier), node("X", NodeKind::Retailer), node("F1", NodeKind::Factory)];
        let topology = analyze(&nodes, &[edge("e1", "X", "F1")]);
        assert!(topology.is_finite("X"));
    }
}
