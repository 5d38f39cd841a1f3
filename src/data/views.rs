//! Matrix views used for batch evaluation.

use ndarray::{ArrayView1, ArrayView2};

use super::DataAccessor;

/// Sample-major view of a feature matrix: `[n_samples, n_features]`.
///
/// The API uses conceptual terms (sample, feature) not array terms (row, col).
#[derive(Clone, Copy)]
pub struct SamplesView<'a> {
    data: ArrayView2<'a, f32>,
}

impl<'a> SamplesView<'a> {
    /// Create a samples view from a C-order array.
    ///
    /// Returns `None` if the array is not in standard (row-major) layout.
    pub fn from_array(data: ArrayView2<'a, f32>) -> Option<Self> {
        data.is_standard_layout().then_some(Self { data })
    }

    /// Create from a contiguous slice in sample-major order. Zero-copy.
    ///
    /// Returns `None` if the slice length doesn't match `n_samples * n_features`.
    pub fn from_slice(data: &'a [f32], n_samples: usize, n_features: usize) -> Option<Self> {
        ArrayView2::from_shape((n_samples, n_features), data)
            .ok()
            .map(|data| Self { data })
    }

    /// Get feature value at (sample, feature).
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f32 {
        self.data[[sample, feature]]
    }

    /// Get all features for a sample.
    #[inline]
    pub fn sample_view(&self, sample: usize) -> ArrayView1<'_, f32> {
        self.data.row(sample)
    }

    /// Get the underlying array view.
    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.data
    }
}

impl std::fmt::Debug for SamplesView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplesView")
            .field("n_samples", &self.data.nrows())
            .field("n_features", &self.data.ncols())
            .finish()
    }
}

impl DataAccessor for SamplesView<'_> {
    // Rows of a standard-layout array are contiguous.
    type Sample<'b> = &'b [f32] where Self: 'b;

    #[inline]
    fn sample(&self, index: usize) -> Self::Sample<'_> {
        let n_features = self.data.ncols();
        let start = index * n_features;
        match self.data.to_slice() {
            Some(slice) => &slice[start..start + n_features],
            None => unreachable!("SamplesView is always in standard layout"),
        }
    }

    #[inline]
    fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    fn n_features(&self) -> usize {
        self.data.ncols()
    }
}
