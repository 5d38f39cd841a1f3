//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

use super::SampleAccessor;

/// Errors raised when constructing a [`SparseSample`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SparseSampleError {
    /// `indices` and `values` differ in length.
    #[error("indices and values must have the same length, got {indices} and {values}")]
    LengthMismatch { indices: usize, values: usize },

    /// Indices are not strictly increasing.
    #[error("indices must be strictly increasing, found {index} at position {position}")]
    Unsorted { position: usize, index: u32 },
}

/// A feature vector storing only its non-zero entries.
///
/// Indices are sorted and unique. Every index that is not stored reads as
/// `0.0`, matching the behaviour of dense slices past their end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SparseParts")]
pub struct SparseSample {
    indices: Vec<u32>,
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct SparseParts {
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl TryFrom<SparseParts> for SparseSample {
    type Error = SparseSampleError;

    fn try_from(parts: SparseParts) -> Result<Self, Self::Error> {
        Self::new(parts.indices, parts.values)
    }
}

impl SparseSample {
    /// Create a sparse sample from parallel index and value vectors.
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Result<Self, SparseSampleError> {
        if indices.len() != values.len() {
            return Err(SparseSampleError::LengthMismatch {
                indices: indices.len(),
                values: values.len(),
            });
        }
        for (position, pair) in indices.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SparseSampleError::Unsorted {
                    position: position + 1,
                    index: pair[1],
                });
            }
        }
        Ok(Self { indices, values })
    }

    /// Build from `(index, value)` pairs in any order.
    ///
    /// Duplicate indices are rejected.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (u32, f32)>,
    ) -> Result<Self, SparseSampleError> {
        let mut pairs: Vec<(u32, f32)> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(index, _)| index);
        let (indices, values) = pairs.into_iter().unzip();
        Self::new(indices, values)
    }

    /// Number of stored entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored indices, ascending.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Stored values, aligned with [`indices`](Self::indices).
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Expand into a dense vector of length [`n_features`](SampleAccessor::n_features).
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.n_features()];
        for (&index, &value) in self.indices.iter().zip(&self.values) {
            dense[index as usize] = value;
        }
        dense
    }
}

impl SampleAccessor for SparseSample {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        let Ok(index) = u32::try_from(index) else {
            return 0.0;
        };
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.indices.last().map_or(0, |&last| last as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_stored_and_absent() {
        let sample = SparseSample::new(vec![1, 4], vec![2.5, -1.0]).unwrap();
        assert_eq!(sample.feature(0), 0.0);
        assert_eq!(sample.feature(1), 2.5);
        assert_eq!(sample.feature(4), -1.0);
        assert_eq!(sample.feature(100), 0.0);
        assert_eq!(sample.n_features(), 5);
        assert_eq!(sample.nnz(), 2);
    }

    #[test]
    fn from_pairs_sorts() {
        let sample = SparseSample::from_pairs([(3, 1.0), (0, 2.0)]).unwrap();
        assert_eq!(sample.indices(), &[0, 3]);
        assert_eq!(sample.to_dense(), vec![2.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_duplicates_and_mismatch() {
        assert_eq!(
            SparseSample::from_pairs([(2, 1.0), (2, 3.0)]),
            Err(SparseSampleError::Unsorted { position: 1, index: 2 })
        );
        assert_eq!(
            SparseSample::new(vec![0, 1], vec![1.0]),
            Err(SparseSampleError::LengthMismatch { indices: 2, values: 1 })
        );
    }

    #[test]
    fn empty_sample() {
        let sample = SparseSample::default();
        assert_eq!(sample.n_features(), 0);
        assert!(sample.to_dense().is_empty());
    }
}
