use std::fmt;

/// Index of a node in the network. The node set never changes size after
/// startup, so an id stays valid for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Check if this id addresses a node in a set of `node_count` nodes
    pub const fn is_valid_for(&self, node_count: usize) -> bool {
        self.0 < node_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_bounds() {
        assert!(NodeId(0).is_valid_for(1));
        assert!(NodeId(19).is_valid_for(20));
        assert!(!NodeId(20).is_valid_for(20));
        assert!(!NodeId(0).is_valid_for(0));
    }

    #[test]
    fn test_node_id_ordering() {
        assert!(NodeId(1) < NodeId(3));
        assert_eq!(NodeId(7).index(), 7);
        assert_eq!(NodeId(4).to_string(), "4");
    }
}
