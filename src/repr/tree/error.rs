//! Errors raised by tree growth and evaluation.

use super::{Leaf, NodeId};

/// Error returned by [`TreePredictor`](super::TreePredictor) operations.
///
/// Every failing operation leaves the tree unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A split was requested with malformed arguments, such as an empty
    /// predictor list or a leaf naming an interior node that does not exist.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The leaf's edge already targets an interior node.
    #[error("leaf {leaf} is already expanded into interior node {child}")]
    AlreadyExpanded { leaf: Leaf, child: NodeId },

    /// An edge position outside the node's fan-out was referenced.
    #[error("edge {edge} is out of range for interior node {node} with fan-out {fan_out}")]
    OutOfRange {
        node: NodeId,
        edge: u32,
        fan_out: u32,
    },

    /// Internal inconsistency, e.g. an edge targeting a missing node.
    ///
    /// Unreachable for trees grown through [`split`](super::TreePredictor::split);
    /// reported when validating or deserializing externally supplied structure.
    #[error("structural invariant violated: {0}")]
    StructuralInvariantViolation(String),
}

impl TreeError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::StructuralInvariantViolation(reason.into())
    }
}
