//! Interior nodes, edges and split descriptions.

use serde::{Deserialize, Serialize};

use super::{Leaf, NodeId};

/// Outgoing edge of an interior node.
///
/// The predictor is fixed at creation. The target starts as `None`
/// (the edge is a leaf) and is set at most once, by a split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<P> {
    predictor: P,
    target: Option<NodeId>,
}

impl<P> Edge<P> {
    pub(crate) fn new(predictor: P) -> Self {
        Self {
            predictor,
            target: None,
        }
    }

    #[inline]
    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Child interior node, or `None` if this edge is still a leaf.
    #[inline]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.target.is_none()
    }

    pub(crate) fn set_target(&mut self, child: NodeId) {
        debug_assert!(self.target.is_none(), "edge target is set at most once");
        self.target = Some(child);
    }
}

/// Interior node: a split rule and a fixed, non-empty list of outgoing edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorNode<R, P> {
    rule: R,
    edges: Box<[Edge<P>]>,
}

impl<R, P> InteriorNode<R, P> {
    pub(crate) fn new(rule: R, predictors: Vec<P>) -> Self {
        Self {
            rule,
            edges: predictors.into_iter().map(Edge::new).collect(),
        }
    }

    #[inline]
    pub fn rule(&self) -> &R {
        &self.rule
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<P>] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, edge: u32) -> Option<&Edge<P>> {
        self.edges.get(edge as usize)
    }

    /// Number of outgoing edges.
    #[inline]
    pub fn fan_out(&self) -> u32 {
        self.edges.len() as u32
    }

    pub(crate) fn edge_mut(&mut self, edge: u32) -> Option<&mut Edge<P>> {
        self.edges.get_mut(edge as usize)
    }
}

/// A split rule together with the predictors of its outgoing edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitInfo<R, P> {
    pub rule: R,
    /// One predictor per outgoing edge, in edge order. Must be non-empty.
    pub predictors: Vec<P>,
}

impl<R, P> SplitInfo<R, P> {
    pub fn new(rule: R, predictors: Vec<P>) -> Self {
        Self { rule, predictors }
    }
}

/// A split to commit at a specific leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitCandidate<R, P> {
    pub leaf: Leaf,
    pub info: SplitInfo<R, P>,
}

impl<R, P> SplitCandidate<R, P> {
    pub fn new(leaf: Leaf, rule: R, predictors: Vec<P>) -> Self {
        Self {
            leaf,
            info: SplitInfo::new(rule, predictors),
        }
    }

    /// Candidate for the bootstrap split that creates the root.
    pub fn root(rule: R, predictors: Vec<P>) -> Self {
        Self::new(Leaf::Root, rule, predictors)
    }
}
