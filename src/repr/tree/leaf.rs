//! Leaf and edge addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Identity of a leaf: an edge whose target has not been expanded yet.
///
/// [`Leaf::Root`] is the reserved identity of the implicit leaf that exists
/// before the tree has any interior node. Splitting it creates interior node 0.
/// It is a distinct variant so it can never be confused with an edge of node 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Leaf {
    /// The bootstrap leaf of an empty tree.
    Root,
    /// Outgoing edge `edge` of interior node `node`.
    Edge { node: NodeId, edge: u32 },
}

impl Leaf {
    /// Leaf at outgoing edge `edge` of interior node `node`.
    #[inline]
    pub const fn edge(node: NodeId, edge: u32) -> Self {
        Leaf::Edge { node, edge }
    }

    #[inline]
    pub fn is_root(self) -> bool {
        matches!(self, Leaf::Root)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Root => f.write_str("root"),
            Leaf::Edge { node, edge } => write!(f, "({node}, {edge})"),
        }
    }
}

/// An edge visited during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    /// Owning interior node.
    pub node: NodeId,
    /// Position within the owning node's outgoing edges.
    pub edge: u32,
    /// Position in the global flattened edge order
    /// (ascending node index, then ascending edge position).
    pub position: usize,
}

impl EdgeRef {
    /// The leaf identity of this edge.
    #[inline]
    pub fn leaf(self) -> Leaf {
        Leaf::edge(self.node, self.edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_distinct_from_node_zero() {
        assert_ne!(Leaf::Root, Leaf::edge(0, 0));
        assert!(Leaf::Root.is_root());
        assert!(!Leaf::edge(0, 0).is_root());
    }

    #[test]
    fn display() {
        assert_eq!(Leaf::Root.to_string(), "root");
        assert_eq!(Leaf::edge(2, 1).to_string(), "(2, 1)");
    }
}
