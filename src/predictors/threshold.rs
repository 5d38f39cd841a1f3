use serde::{Deserialize, Serialize};

use crate::data::SampleAccessor;
use crate::repr::tree::{Route, SplitRule};

/// Binary split on one feature: edge 1 if `x[feature] > threshold`, else edge 0.
///
/// Missing (NaN) values compare false and take edge 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub feature: usize,
    pub threshold: f32,
}

impl ThresholdRule {
    /// Number of outgoing edges a node using this rule needs.
    pub const FAN_OUT: usize = 2;

    pub fn new(feature: usize, threshold: f32) -> Self {
        Self { feature, threshold }
    }
}

impl SplitRule for ThresholdRule {
    #[inline]
    fn route<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Route {
        if sample.feature(self.feature) > self.threshold {
            Route::Edge(1)
        } else {
            Route::Edge(0)
        }
    }
}
