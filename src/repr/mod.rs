//! Canonical model representations.

pub mod tree;

pub use tree::{
    EdgePredictor, EdgeRef, Leaf, NodeId, Route, SplitCandidate, SplitInfo, SplitRule, TreeError,
    TreePredictor,
};
