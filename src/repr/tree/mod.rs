//! Edge-predictor decision tree: store, growth and addressing.

/// Interior node identifier.
///
/// Internally this is just an index into the tree's node arena.
pub type NodeId = u32;

pub mod capability;
pub mod error;
pub mod leaf;
pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use capability::{EdgePredictor, Route, SplitRule};
pub use error::TreeError;
pub use leaf::{EdgeRef, Leaf};
pub use node::{Edge, InteriorNode, SplitCandidate, SplitInfo};
pub use tree::TreePredictor;
