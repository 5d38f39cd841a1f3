//! Feature-vector abstractions used during tree traversal.
//!
//! - [`SampleAccessor`]: read access to one feature vector (dense or sparse)
//! - [`DataAccessor`]: read access to a collection of feature vectors
//! - [`SparseSample`]: sorted `(index, value)` storage
//! - [`SamplesView`]: sample-major ndarray view
//!
//! Indices that a vector does not store read as `0.0`.

mod accessor;
mod sparse;
mod views;

pub use accessor::{DataAccessor, SampleAccessor};
pub use sparse::{SparseSample, SparseSampleError};
pub use views::SamplesView;
