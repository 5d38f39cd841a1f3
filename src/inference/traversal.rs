//! Single-sample traversal: prediction and edge path indicators.
//!
//! Traversal starts at interior node 0 and repeats:
//!
//! 1. The node's split rule routes the sample to an edge or stops.
//! 2. On [`Route::Stop`] traversal ends; edges visited so far count.
//! 3. Otherwise the selected edge is visited: its predictor contributes to
//!    the sum and its global position is marked. An unexpanded edge ends
//!    traversal, an expanded one continues at its target.
//!
//! An empty tree visits nothing and predicts `0.0`.

use tracing::trace;

use crate::data::SampleAccessor;
use crate::repr::tree::{
    Edge, EdgePredictor, EdgeRef, NodeId, Route, SplitRule, TreeError, TreePredictor,
};

// =============================================================================
// Shared Traversal Helper
// =============================================================================

impl<R: SplitRule, P> TreePredictor<R, P> {
    /// Walk the path of `sample`, calling `visit` for every visited edge in order.
    ///
    /// # Errors
    ///
    /// - [`TreeError::OutOfRange`] if a split rule selects an edge outside its
    ///   node's fan-out
    /// - [`TreeError::StructuralInvariantViolation`] if an edge target is not a
    ///   later interior node (unreachable for validated trees)
    pub fn walk<S, F>(&self, sample: &S, mut visit: F) -> Result<(), TreeError>
    where
        S: SampleAccessor + ?Sized,
        F: FnMut(EdgeRef, &Edge<P>),
    {
        if self.is_empty() {
            return Ok(());
        }

        let mut id: NodeId = 0;
        loop {
            let (node, offset) = match (self.node(id), self.edge_offset(id)) {
                (Some(node), Some(offset)) => (node, offset),
                _ => {
                    return Err(TreeError::invariant(format!(
                        "traversal reached missing interior node {id}"
                    )))
                }
            };

            let edge_pos = match node.rule().route(sample) {
                Route::Stop => {
                    trace!(node = id, "split rule stopped traversal");
                    return Ok(());
                }
                Route::Edge(edge) => edge,
            };
            let edge = node.edge(edge_pos).ok_or(TreeError::OutOfRange {
                node: id,
                edge: edge_pos,
                fan_out: node.fan_out(),
            })?;

            visit(
                EdgeRef {
                    node: id,
                    edge: edge_pos,
                    position: offset + edge_pos as usize,
                },
                edge,
            );

            match edge.target() {
                None => return Ok(()),
                Some(child) if child > id => id = child,
                Some(child) => {
                    return Err(TreeError::invariant(format!(
                        "edge ({id}, {edge_pos}) targets interior node {child}, which was not created after its owner"
                    )))
                }
            }
        }
    }

    /// Edges visited by `sample`, in visit order.
    pub fn edge_path<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Result<Vec<EdgeRef>, TreeError> {
        let mut path = Vec::new();
        self.walk(sample, |edge_ref, _| path.push(edge_ref))?;
        Ok(path)
    }

    /// Indicator of visited edges in global flattened order.
    ///
    /// The result has length [`n_edges`](Self::n_edges); position
    /// `edge_offset(node) + edge` is `true` iff that edge was visited. The
    /// ordering (ascending node index, then ascending edge position) is
    /// stable across calls and across further growth.
    pub fn edge_path_indicator<S: SampleAccessor + ?Sized>(
        &self,
        sample: &S,
    ) -> Result<Vec<bool>, TreeError> {
        let mut indicator = vec![false; self.n_edges()];
        self.walk(sample, |edge_ref, _| indicator[edge_ref.position] = true)?;
        Ok(indicator)
    }
}

impl<R: SplitRule, P: EdgePredictor> TreePredictor<R, P> {
    /// Predict the output for a single sample.
    ///
    /// Sum of the predictor values of all visited edges; `0.0` for an empty
    /// tree or when the root's rule stops immediately.
    pub fn predict<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Result<f64, TreeError> {
        let mut sum = 0.0;
        self.walk(sample, |_, edge| sum += edge.predictor().predict(sample))?;
        Ok(sum)
    }
}
