use super::node_id::NodeId;

use std::collections::HashSet;

/// A connection between two nodes
/// Invariant: always stored in canonical form with a < b
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    /// Phase of the bow animation, in radians
    pub pulse_phase: f32,
}

impl Edge {
    /// Create a new edge, automatically ordering nodes
    pub fn new(a: NodeId, b: NodeId, pulse_phase: f32) -> Self {
        if a <= b {
            Edge { a, b, pulse_phase }
        } else {
            Edge {
                a: b,
                b: a,
                pulse_phase,
            }
        }
    }

    /// The unordered pair this edge connects
    pub fn key(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }
}

#[cfg(test)]
impl Edge {
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

/// The fixed edge list of a network, in generation order
///
/// Only accepts edges whose endpoints both address a node of the set,
/// so consumers can index node arrays without bounds checks failing.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// Set for O(1) pair existence checks
    pairs: HashSet<(NodeId, NodeId)>,
    /// Edges in the order they were generated
    edges: Vec<Edge>,
    node_count: usize,
}

impl EdgeSet {
    pub fn with_node_count(node_count: usize) -> Self {
        EdgeSet {
            pairs: HashSet::new(),
            edges: Vec::new(),
            node_count,
        }
    }

    /// Add an edge to the set
    /// Returns false for self loops, out-of-range endpoints and duplicates
    pub fn add(&mut self, edge: Edge) -> bool {
        if edge.a == edge.b {
            return false;
        }
        if !edge.b.is_valid_for(self.node_count) {
            log::warn!(
                "rejected edge {}-{}: only {} nodes",
                edge.a,
                edge.b,
                self.node_count
            );
            return false;
        }

        if self.pairs.insert(edge.key()) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges in generation order
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }
}

#[cfg(test)]
impl EdgeSet {
    /// Check if two nodes are connected, in either order
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.pairs.contains(&key)
    }

    /// Count how many edges are incident to a given node
    pub fn degree(&self, node: NodeId) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.contains_node(node))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical_form() {
        let e1 = Edge::new(NodeId(1), NodeId(3), 0.5);
        let e2 = Edge::new(NodeId(3), NodeId(1), 0.5);

        assert_eq!(e1, e2, "Edges should be equal regardless of order");
        assert_eq!(e1.a, NodeId(1));
        assert_eq!(e1.b, NodeId(3));
    }

    #[test]
    fn test_edge_set_rejects_duplicates_and_loops() {
        let mut set = EdgeSet::with_node_count(4);

        assert!(set.add(Edge::new(NodeId(0), NodeId(1), 0.0)));
        assert!(set.add(Edge::new(NodeId(1), NodeId(2), 0.0)));
        assert!(
            !set.add(Edge::new(NodeId(1), NodeId(0), 1.0)),
            "Adding the same pair reversed should return false"
        );
        assert!(!set.add(Edge::new(NodeId(2), NodeId(2), 0.0)));

        assert_eq!(set.len(), 2);
        assert!(set.contains(NodeId(1), NodeId(0)));
        assert!(!set.contains(NodeId(0), NodeId(2)));
    }

    #[test]
    fn test_edge_set_rejects_out_of_range() {
        let mut set = EdgeSet::with_node_count(3);

        assert!(!set.add(Edge::new(NodeId(0), NodeId(3), 0.0)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_edge_set_order_and_degree() {
        let mut set = EdgeSet::with_node_count(5);

        set.add(Edge::new(NodeId(0), NodeId(1), 0.0));
        set.add(Edge::new(NodeId(0), NodeId(2), 0.0));
        set.add(Edge::new(NodeId(3), NodeId(0), 0.0));

        let order: Vec<&Edge> = set.iter().collect();
        assert_eq!(order[0].key(), (NodeId(0), NodeId(1)));
        assert_eq!(order[2].key(), (NodeId(0), NodeId(3)));

        assert_eq!(set.degree(NodeId(0)), 3);
        assert_eq!(set.degree(NodeId(3)), 1);
        assert_eq!(set.degree(NodeId(4)), 0);
    }
}
