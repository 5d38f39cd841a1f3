use serde::{Deserialize, Serialize};

use crate::data::SampleAccessor;
use crate::repr::tree::EdgePredictor;

/// Edge predictor computing `bias + Σ weights[i] * x[i]`.
///
/// Features beyond the sample's stored length read as zero, so a sample
/// shorter than `weights` is well defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearPredictor {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearPredictor {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    /// Number of features this predictor reads.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }
}

impl EdgePredictor for LinearPredictor {
    fn predict<S: SampleAccessor + ?Sized>(&self, sample: &S) -> f64 {
        let dot: f64 = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, &w)| w * f64::from(sample.feature(i)))
            .sum();
        self.bias + dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SparseSample;
    use approx::assert_relative_eq;

    #[test]
    fn dense_dot_plus_bias() {
        let p = LinearPredictor::new(vec![2.0, -1.0], 0.5);
        // 0.5 + 2.0 * 1.5 - 1.0 * 4.0 = -0.5
        assert_relative_eq!(p.predict(&[1.5f32, 4.0]), -0.5);
    }

    #[test]
    fn short_and_sparse_samples() {
        let p = LinearPredictor::new(vec![1.0, 10.0, 100.0], 0.0);
        assert_relative_eq!(p.predict(&[1.0f32]), 1.0);

        let sparse = SparseSample::new(vec![2], vec![0.5]).unwrap();
        assert_relative_eq!(p.predict(&sparse), 50.0);
    }

    #[test]
    fn empty_weights_is_bias() {
        let p = LinearPredictor::new(Vec::new(), 3.0);
        assert_eq!(p.n_features(), 0);
        assert_eq!(p.predict(&[9.0f32]), 3.0);
    }
}
