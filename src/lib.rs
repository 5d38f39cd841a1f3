//! edgetree: incrementally grown multi-way decision trees.
//!
//! A [`TreePredictor`] is a tree whose interior nodes hold a split rule and
//! whose edges hold a scalar predictor. A sample is scored by walking from the
//! root, summing the predictors of the visited edges, until it reaches an
//! unexpanded edge (a leaf) or a split rule stops.
//!
//! # Key Types
//!
//! - [`TreePredictor`] - Append-only tree store with `split`, `predict` and
//!   `edge_path_indicator`
//! - [`SplitRule`] / [`EdgePredictor`] - Capabilities the tree consumes
//! - [`ThresholdRule`] / [`ConstantPredictor`] / [`LinearPredictor`] -
//!   Reference capabilities
//! - [`SampleAccessor`] - Dense or sparse feature-vector access
//!
//! # Growing a Tree
//!
//! Growth is driven by an external training loop. The first
//! [`split`](TreePredictor::split) targets [`Leaf::Root`]; later splits
//! target leaves returned by [`leaves`](TreePredictor::leaves):
//!
//! ```
//! use edgetree::{ConstantPredictor, Leaf, SimpleTreePredictor, SplitCandidate, ThresholdRule};
//!
//! let mut tree = SimpleTreePredictor::new();
//! tree.split(SplitCandidate::root(
//!     ThresholdRule::new(0, 0.0),
//!     vec![ConstantPredictor(1.0), ConstantPredictor(-1.0)],
//! ))?;
//! tree.split(SplitCandidate::new(
//!     Leaf::edge(0, 0),
//!     ThresholdRule::new(1, 0.0),
//!     vec![ConstantPredictor(0.5), ConstantPredictor(0.5)],
//! ))?;
//!
//! assert_eq!(tree.predict(&[-1.0f32, -1.0])?, 1.5);
//! assert_eq!(tree.edge_path_indicator(&[-1.0f32, -1.0])?, vec![true, false, true, false]);
//! # Ok::<(), edgetree::TreeError>(())
//! ```

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod inference;
pub mod predictors;
pub mod repr;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{DataAccessor, SampleAccessor, SamplesView, SparseSample, SparseSampleError};
pub use predictors::{ConstantPredictor, LinearPredictor, SimpleTreePredictor, ThresholdRule};
pub use repr::tree::{
    Edge, EdgePredictor, EdgeRef, InteriorNode, Leaf, NodeId, Route, SplitCandidate, SplitInfo,
    SplitRule, TreeError, TreePredictor,
};
pub use utils::{run_with_threads, Parallelism};
