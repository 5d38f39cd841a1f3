//! Capabilities a tree consumes from its split rules and edge predictors.
//!
//! The tree core depends only on these two contracts. Concrete rules and
//! predictors live in [`crate::predictors`]; callers can supply their own.

use serde::{Deserialize, Serialize};

use crate::data::SampleAccessor;

/// Outcome of evaluating a split rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Follow the outgoing edge at this position.
    Edge(u32),
    /// Terminate traversal; the prediction is the sum accumulated so far.
    Stop,
}

impl Route {
    /// The selected edge position, or `None` for [`Route::Stop`].
    #[inline]
    pub fn edge(self) -> Option<u32> {
        match self {
            Route::Edge(edge) => Some(edge),
            Route::Stop => None,
        }
    }
}

impl From<Option<u32>> for Route {
    fn from(edge: Option<u32>) -> Self {
        edge.map_or(Route::Stop, Route::Edge)
    }
}

/// Selects an outgoing edge of an interior node for a sample.
///
/// The returned edge position must be smaller than the owning node's
/// fan-out; anything else is reported by the tree as
/// [`TreeError::OutOfRange`](super::TreeError::OutOfRange).
pub trait SplitRule {
    /// Route a sample to an outgoing edge, or stop.
    fn route<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Route;
}

/// Scalar contribution of an edge to the prediction.
///
/// Implementations must be pure: the same sample always yields the same value.
pub trait EdgePredictor {
    /// Evaluate the predictor on a sample.
    fn predict<S: SampleAccessor + ?Sized>(&self, sample: &S) -> f64;
}

impl<T: SplitRule + ?Sized> SplitRule for &T {
    #[inline]
    fn route<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Route {
        (**self).route(sample)
    }
}

impl<T: SplitRule + ?Sized> SplitRule for Box<T> {
    #[inline]
    fn route<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Route {
        (**self).route(sample)
    }
}

impl<T: EdgePredictor + ?Sized> EdgePredictor for &T {
    #[inline]
    fn predict<S: SampleAccessor + ?Sized>(&self, sample: &S) -> f64 {
        (**self).predict(sample)
    }
}

impl<T: EdgePredictor + ?Sized> EdgePredictor for Box<T> {
    #[inline]
    fn predict<S: SampleAccessor + ?Sized>(&self, sample: &S) -> f64 {
        (**self).predict(sample)
    }
}
