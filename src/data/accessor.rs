//! Sample and data accessor traits for tree traversal.
//!
//! This module provides the core abstractions for reading feature vectors:
//!
//! - [`SampleAccessor`]: Access features for a single sample (row)
//! - [`DataAccessor`]: Access samples from a multi-sample dataset (matrix)
//!
//! # Missing Features
//!
//! Feature vectors follow sparse-vector semantics: reading an index past the
//! end of the stored values yields `0.0`. A dense slice of length 3 therefore
//! behaves like an infinite vector whose entries from index 3 on are zero.
//!
//! # Example
//!
//! ```
//! use edgetree::data::SampleAccessor;
//!
//! let features: &[f32] = &[0.5, 1.2, 3.4];
//! assert_eq!(features.feature(0), 0.5);
//! assert_eq!(features.feature(10), 0.0);
//! ```

// ============================================================================
// SampleAccessor Trait
// ============================================================================

/// Read-only access to the features of a single sample.
///
/// This is the feature-vector capability consumed by split rules and edge
/// predictors. Implementations never mutate the sample.
pub trait SampleAccessor {
    /// Get the feature value at the given index.
    ///
    /// Returns `0.0` for indices that are not stored.
    fn feature(&self, index: usize) -> f32;

    /// Number of stored features (largest stored index plus one).
    fn n_features(&self) -> usize;
}

impl SampleAccessor for [f32] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}

// Fixed-size arrays (enables `&[0.5f32, 1.0]` syntax)
impl<const N: usize> SampleAccessor for [f32; N] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self.as_slice().feature(index)
    }

    #[inline]
    fn n_features(&self) -> usize {
        N
    }
}

impl SampleAccessor for Vec<f32> {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self.as_slice().feature(index)
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}

impl<T: SampleAccessor + ?Sized> SampleAccessor for &T {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        (**self).feature(index)
    }

    #[inline]
    fn n_features(&self) -> usize {
        (**self).n_features()
    }
}

// ndarray ArrayView1 (may be contiguous or strided)
impl SampleAccessor for ndarray::ArrayView1<'_, f32> {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self.get(index).copied().unwrap_or(0.0)
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.len()
    }
}

// ============================================================================
// DataAccessor Trait
// ============================================================================

/// Access samples from a multi-sample dataset.
///
/// Used by batch evaluation. Each sample is handed out as a
/// [`SampleAccessor`] so trees never see the underlying layout.
pub trait DataAccessor {
    /// The type returned when accessing a single sample.
    type Sample<'a>: SampleAccessor
    where
        Self: 'a;

    /// Get a sample (row) by index.
    fn sample(&self, index: usize) -> Self::Sample<'_>;

    /// Number of samples in the dataset.
    fn n_samples(&self) -> usize;

    /// Number of features per sample.
    fn n_features(&self) -> usize;
}

impl<S: SampleAccessor> DataAccessor for [S] {
    type Sample<'a> = &'a S where Self: 'a;

    #[inline]
    fn sample(&self, index: usize) -> Self::Sample<'_> {
        &self[index]
    }

    #[inline]
    fn n_samples(&self) -> usize {
        self.len()
    }

    fn n_features(&self) -> usize {
        self.iter().map(SampleAccessor::n_features).max().unwrap_or(0)
    }
}
