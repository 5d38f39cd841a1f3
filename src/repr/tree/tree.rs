//! Append-only tree store and the growth operation.
//!
//! This module provides:
//! - [`TreePredictor`]: arena of interior nodes addressed by [`NodeId`]
//! - [`TreePredictor::split`]: the only mutator, expanding a leaf into a node
//! - [`TreePredictor::validate`]: structural invariant checks
//!
//! Evaluation (`predict`, `edge_path_indicator`) lives in
//! [`crate::inference`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Edge, EdgeRef, InteriorNode, Leaf, NodeId, SplitCandidate, TreeError};

// ============================================================================
// TreePredictor
// ============================================================================

/// Multi-way decision tree whose edges carry predictors.
///
/// Interior nodes hold a split rule of type `R`; every outgoing edge holds a
/// predictor of type `P`. The output for a sample is the sum of the
/// predictors on the edges visited from the root until a leaf is reached or
/// a rule stops.
///
/// # Structure
///
/// - Interior nodes are numbered `0..n_interior_nodes()` in creation order;
///   node 0 is the root.
/// - An edge either is a leaf (`target() == None`) or targets a node created
///   after its owner, so the structure is a forward DAG and traversal always
///   terminates.
/// - Edges are numbered globally by ascending node index, then ascending edge
///   position. [`edge_offset`](Self::edge_offset) gives the first global
///   position of each node. This order is stable across growth: splitting
///   only appends positions.
///
/// # Growth
///
/// The tree starts empty. [`split`](Self::split) with [`Leaf::Root`] creates
/// the root; later splits expand leaves of existing nodes. Nothing is ever
/// removed. `split` takes `&mut self`, so growth and evaluation are separated
/// by the borrow checker.
///
/// # Example
///
/// ```
/// use edgetree::predictors::{ConstantPredictor, ThresholdRule};
/// use edgetree::repr::tree::{SplitCandidate, TreePredictor};
///
/// let mut tree = TreePredictor::new();
/// let root = tree
///     .split(SplitCandidate::root(
///         ThresholdRule::new(0, 0.5),
///         vec![ConstantPredictor(1.0), ConstantPredictor(-1.0)],
///     ))
///     .unwrap();
/// assert_eq!(root, 0);
/// assert_eq!(tree.n_edges(), 2);
///
/// assert_eq!(tree.predict(&[0.2f32]).unwrap(), 1.0);
/// assert_eq!(tree.edge_path_indicator(&[0.9f32]).unwrap(), vec![false, true]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "TreeParts<R, P>",
    bound(
        serialize = "R: Serialize, P: Serialize",
        deserialize = "R: Deserialize<'de>, P: Deserialize<'de>"
    )
)]
pub struct TreePredictor<R, P> {
    nodes: Vec<InteriorNode<R, P>>,
    /// Global position of the first edge of each node.
    #[serde(skip)]
    edge_offsets: Vec<usize>,
    #[serde(skip)]
    n_edges: usize,
}

impl<R, P> Default for TreePredictor<R, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, P> TreePredictor<R, P> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty tree with room for `n_nodes` interior nodes.
    pub fn with_capacity(n_nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n_nodes),
            edge_offsets: Vec::with_capacity(n_nodes),
            n_edges: 0,
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Number of interior nodes.
    #[inline]
    pub fn n_interior_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges (sum of all fan-outs).
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    /// `true` until the root has been created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&InteriorNode<R, P>> {
        self.nodes.get(id as usize)
    }

    /// All interior nodes in index order.
    #[inline]
    pub fn nodes(&self) -> &[InteriorNode<R, P>] {
        &self.nodes
    }

    /// Global position of the first outgoing edge of `node`.
    #[inline]
    pub fn edge_offset(&self, node: NodeId) -> Option<usize> {
        self.edge_offsets.get(node as usize).copied()
    }

    /// Global position of a leaf's edge, or `None` for [`Leaf::Root`] and
    /// leaves that do not exist.
    pub fn edge_position(&self, leaf: Leaf) -> Option<usize> {
        match leaf {
            Leaf::Root => None,
            Leaf::Edge { node, edge } => {
                let owner = self.node(node)?;
                (edge < owner.fan_out()).then(|| self.edge_offsets[node as usize] + edge as usize)
            }
        }
    }

    /// Iterate over every edge in global flattened order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeRef, &Edge<P>)> + '_ {
        self.nodes.iter().enumerate().flat_map(move |(node, interior)| {
            let offset = self.edge_offsets[node];
            interior.edges().iter().enumerate().map(move |(edge, e)| {
                let edge_ref = EdgeRef {
                    node: node as NodeId,
                    edge: edge as u32,
                    position: offset + edge,
                };
                (edge_ref, e)
            })
        })
    }

    /// Iterate over the leaves that can currently be split, in flattened order.
    ///
    /// An empty tree yields exactly [`Leaf::Root`].
    pub fn leaves(&self) -> impl Iterator<Item = Leaf> + '_ {
        let root = self.is_empty().then_some(Leaf::Root);
        root.into_iter().chain(
            self.edges()
                .filter(|(_, edge)| edge.is_leaf())
                .map(|(edge_ref, _)| edge_ref.leaf()),
        )
    }

    // =========================================================================
    // Growth
    // =========================================================================

    /// Expand a leaf into a new interior node.
    ///
    /// Returns the index of the new node. The first split must target
    /// [`Leaf::Root`] and returns 0.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidArgument`] if the predictor list is empty or the
    ///   leaf names an interior node that does not exist
    /// - [`TreeError::OutOfRange`] if the leaf's edge position exceeds its
    ///   node's fan-out
    /// - [`TreeError::AlreadyExpanded`] if the leaf already targets a node
    ///   (including [`Leaf::Root`] once the root exists)
    ///
    /// On error the tree is left untouched.
    pub fn split(&mut self, candidate: SplitCandidate<R, P>) -> Result<NodeId, TreeError> {
        let SplitCandidate { leaf, info } = candidate;
        self.check_leaf(leaf)?;

        let fan_out = info.predictors.len();
        let id = self.add_interior_node(info.rule, info.predictors)?;
        if let Leaf::Edge { node, edge } = leaf {
            if let Some(target) = self.nodes[node as usize].edge_mut(edge) {
                target.set_target(id);
            }
        }

        debug!(
            node = id,
            %leaf,
            fan_out,
            n_interior_nodes = self.nodes.len(),
            n_edges = self.n_edges,
            "split leaf"
        );
        Ok(id)
    }

    /// Check that `leaf` exists and is unexpanded.
    fn check_leaf(&self, leaf: Leaf) -> Result<(), TreeError> {
        match leaf {
            Leaf::Root if self.nodes.is_empty() => Ok(()),
            Leaf::Root => Err(TreeError::AlreadyExpanded { leaf, child: 0 }),
            Leaf::Edge { node, edge } => {
                let owner = self.node(node).ok_or_else(|| {
                    TreeError::invalid_argument(format!(
                        "leaf {leaf} refers to interior node {node}, but the tree has {} interior nodes",
                        self.nodes.len()
                    ))
                })?;
                let target = owner.edge(edge).ok_or(TreeError::OutOfRange {
                    node,
                    edge,
                    fan_out: owner.fan_out(),
                })?;
                match target.target() {
                    Some(child) => Err(TreeError::AlreadyExpanded { leaf, child }),
                    None => Ok(()),
                }
            }
        }
    }

    /// Append an interior node with all edges unexpanded and return its index.
    ///
    /// The node is not linked to any edge; [`split`](Self::split) does that.
    fn add_interior_node(&mut self, rule: R, predictors: Vec<P>) -> Result<NodeId, TreeError> {
        if predictors.is_empty() {
            return Err(TreeError::invalid_argument(
                "an interior node needs at least one outgoing edge",
            ));
        }
        if u32::try_from(predictors.len()).is_err() {
            return Err(TreeError::invalid_argument(format!(
                "fan-out {} exceeds the maximum edge position",
                predictors.len()
            )));
        }
        let id = NodeId::try_from(self.nodes.len()).map_err(|_| {
            TreeError::invalid_argument("the tree has reached the maximum number of interior nodes")
        })?;

        let fan_out = predictors.len();
        self.nodes.push(InteriorNode::new(rule, predictors));
        self.edge_offsets.push(self.n_edges);
        self.n_edges += fan_out;
        Ok(id)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate the structural invariants of this tree.
    ///
    /// Always succeeds for trees grown through [`split`](Self::split); used
    /// for debug checks and when rebuilding a tree from external parts.
    pub fn validate(&self) -> Result<(), TreeError> {
        validate_nodes(&self.nodes)?;

        let mut offset = 0;
        for (node, interior) in self.nodes.iter().enumerate() {
            if self.edge_offsets.get(node) != Some(&offset) {
                return Err(TreeError::invariant(format!(
                    "edge offset of interior node {node} is not {offset}"
                )));
            }
            offset += interior.edges().len();
        }
        if self.edge_offsets.len() != self.nodes.len() || self.n_edges != offset {
            return Err(TreeError::invariant(format!(
                "edge count {} does not match the sum of fan-outs {offset}",
                self.n_edges
            )));
        }
        Ok(())
    }
}

/// Check fan-outs, forward targets, and that every non-root node is the
/// target of exactly one edge while the root is the target of none.
fn validate_nodes<R, P>(nodes: &[InteriorNode<R, P>]) -> Result<(), TreeError> {
    let mut parents = vec![0usize; nodes.len()];

    for (node, interior) in nodes.iter().enumerate() {
        if interior.edges().is_empty() {
            return Err(TreeError::invariant(format!(
                "interior node {node} has no outgoing edges"
            )));
        }
        for (edge, e) in interior.edges().iter().enumerate() {
            let Some(child) = e.target() else { continue };
            let child = child as usize;
            if child >= nodes.len() {
                return Err(TreeError::invariant(format!(
                    "edge ({node}, {edge}) targets interior node {child}, but the tree has {} interior nodes",
                    nodes.len()
                )));
            }
            if child <= node {
                return Err(TreeError::invariant(format!(
                    "edge ({node}, {edge}) targets interior node {child}, which was not created after its owner"
                )));
            }
            parents[child] += 1;
        }
    }

    for (node, &count) in parents.iter().enumerate().skip(1) {
        if count != 1 {
            return Err(TreeError::invariant(format!(
                "interior node {node} is targeted by {count} edges, expected exactly 1"
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Serialization
// ============================================================================

/// Serialized form of a tree: its nodes. Counters are rebuilt on load.
#[derive(Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>, P: Deserialize<'de>"))]
struct TreeParts<R, P> {
    nodes: Vec<InteriorNode<R, P>>,
}

impl<R, P> TryFrom<TreeParts<R, P>> for TreePredictor<R, P> {
    type Error = TreeError;

    fn try_from(parts: TreeParts<R, P>) -> Result<Self, Self::Error> {
        validate_nodes(&parts.nodes)?;

        let mut edge_offsets = Vec::with_capacity(parts.nodes.len());
        let mut n_edges = 0;
        for interior in &parts.nodes {
            edge_offsets.push(n_edges);
            n_edges += interior.edges().len();
        }
        Ok(Self {
            nodes: parts.nodes,
            edge_offsets,
            n_edges,
        })
    }
}
