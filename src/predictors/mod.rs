//! Reference split rules and edge predictors.
//!
//! - [`ThresholdRule`]: binary split on a single feature
//! - [`ConstantPredictor`]: edge contributes a fixed value
//! - [`LinearPredictor`]: edge contributes `bias + w · x`
//!
//! [`SimpleTreePredictor`] combines the first two into the classic
//! binary regression tree with values on its edges.

mod constant;
mod linear;
mod threshold;

pub use constant::ConstantPredictor;
pub use linear::LinearPredictor;
pub use threshold::ThresholdRule;

use crate::repr::tree::TreePredictor;

/// Binary tree with single-feature threshold rules and constant edge values.
pub type SimpleTreePredictor = TreePredictor<ThresholdRule, ConstantPredictor>;
