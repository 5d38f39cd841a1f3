use serde::{Deserialize, Serialize};

use crate::data::SampleAccessor;
use crate::repr::tree::EdgePredictor;

/// Edge predictor returning a fixed value regardless of the sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstantPredictor(pub f64);

impl EdgePredictor for ConstantPredictor {
    #[inline]
    fn predict<S: SampleAccessor + ?Sized>(&self, _sample: &S) -> f64 {
        self.0
    }
}

impl From<f64> for ConstantPredictor {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<ConstantPredictor> for f64 {
    fn from(predictor: ConstantPredictor) -> Self {
        predictor.0
    }
}
