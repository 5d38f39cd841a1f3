//! Evaluation of [`TreePredictor`](crate::repr::tree::TreePredictor)s.
//!
//! - [`traversal`]: single-sample `predict`, `edge_path_indicator`, `edge_path`
//! - [`batch`]: `predict_batch`, `predict_into`, `edge_visit_counts` over a
//!   [`DataAccessor`](crate::data::DataAccessor)
//!
//! All evaluation takes `&self` and never mutates the tree.

pub mod batch;
pub mod traversal;
