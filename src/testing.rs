//! Testing utilities for edgetree.
//!
//! Assertion helpers and a data-driven split rule that are shared by unit
//! tests, integration tests and benchmarks.
//!
//! ```
//! use edgetree::testing::assert_slice_approx_eq;
//!
//! assert_slice_approx_eq(&[1.0, 2.0], &[1.0, 2.0 + 1e-9], 1e-6, "predictions");
//! ```

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::data::SampleAccessor;
use crate::repr::tree::{Route, SplitRule};

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons of predictions.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Split Rules
// =============================================================================

/// Split rule that reads the edge position directly from a feature.
///
/// `x[feature] = 2.0` routes to edge 2; negative or NaN values stop. Useful
/// for steering a sample down an exact path in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRoute(pub usize);

impl SplitRule for FeatureRoute {
    #[inline]
    fn route<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Route {
        let value = sample.feature(self.0);
        if value >= 0.0 {
            Route::Edge(value as u32)
        } else {
            Route::Stop
        }
    }
}

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two slices of f64 values are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            a.abs_diff_eq(e, tolerance),
            "{context}[{i}]: {a} ≠ {e} (diff={}, tolerance={tolerance})",
            (a - e).abs()
        );
    }
}
