//! Batch evaluation over datasets.
//!
//! Each sample is evaluated independently with the single-sample traversal,
//! optionally in parallel. Trees are only read, so any number of batch calls
//! may share one tree.

use rayon::prelude::*;
use tracing::debug;

use crate::data::DataAccessor;
use crate::repr::tree::{EdgePredictor, SplitRule, TreeError, TreePredictor};
use crate::utils::Parallelism;

impl<R, P> TreePredictor<R, P>
where
    R: SplitRule + Sync,
    P: EdgePredictor + Sync,
{
    /// Predict every sample of `data`, returning one value per sample.
    ///
    /// # Errors
    ///
    /// The first traversal error encountered, in sample order.
    pub fn predict_batch<D>(&self, data: &D, parallelism: Parallelism) -> Result<Vec<f64>, TreeError>
    where
        D: DataAccessor + Sync + ?Sized,
    {
        parallelism
            .maybe_par_map(0..data.n_samples(), |i| self.predict(&data.sample(i)))
            .into_iter()
            .collect()
    }

    /// Predict every sample of `data` into `predictions`, overwriting it.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidArgument`] if `predictions.len() != data.n_samples()`
    /// - any traversal error; `predictions` may then be partially written
    pub fn predict_into<D>(
        &self,
        data: &D,
        predictions: &mut [f64],
        parallelism: Parallelism,
    ) -> Result<(), TreeError>
    where
        D: DataAccessor + Sync + ?Sized,
    {
        if predictions.len() != data.n_samples() {
            return Err(TreeError::invalid_argument(format!(
                "prediction buffer has length {}, expected {}",
                predictions.len(),
                data.n_samples()
            )));
        }

        let predict_row = |(row_idx, pred): (usize, &mut f64)| -> Result<(), TreeError> {
            *pred = self.predict(&data.sample(row_idx))?;
            Ok(())
        };

        if parallelism.is_parallel() {
            predictions.par_iter_mut().enumerate().try_for_each(predict_row)
        } else {
            predictions.iter_mut().enumerate().try_for_each(predict_row)
        }
    }

    /// Count, for every edge, how many samples of `data` visit it.
    ///
    /// The result has length [`n_edges`](Self::n_edges) and uses the global
    /// flattened edge order; it equals the element-wise sum of the
    /// [`edge_path_indicator`](Self::edge_path_indicator) of every sample.
    pub fn edge_visit_counts<D>(&self, data: &D, parallelism: Parallelism) -> Result<Vec<u64>, TreeError>
    where
        D: DataAccessor + Sync + ?Sized,
    {
        let n_edges = self.n_edges();
        let n_samples = data.n_samples();

        let count_row = |mut counts: Vec<u64>, row_idx: usize| -> Result<Vec<u64>, TreeError> {
            self.walk(&data.sample(row_idx), |edge_ref, _| counts[edge_ref.position] += 1)?;
            Ok(counts)
        };

        let counts = if parallelism.is_parallel() {
            (0..n_samples)
                .into_par_iter()
                .try_fold(|| vec![0u64; n_edges], count_row)
                .try_reduce(
                    || vec![0u64; n_edges],
                    |mut acc, partial| {
                        acc.iter_mut().zip(partial).for_each(|(a, p)| *a += p);
                        Ok(acc)
                    },
                )?
        } else {
            (0..n_samples).try_fold(vec![0u64; n_edges], count_row)?
        };

        debug!(n_samples, n_edges, "counted edge visits");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SamplesView;
    use crate::predictors::ConstantPredictor;
    use crate::repr::tree::{Leaf, SplitCandidate};
    use crate::testing::FeatureRoute;

    type Tree = TreePredictor<FeatureRoute, ConstantPredictor>;

    fn tree() -> Tree {
        let mut tree = Tree::new();
        tree.split(SplitCandidate::root(
            FeatureRoute(0),
            vec![ConstantPredictor(1.0), ConstantPredictor(-1.0)],
        ))
        .unwrap();
        tree.split(SplitCandidate::new(
            Leaf::edge(0, 1),
            FeatureRoute(1),
            vec![ConstantPredictor(10.0), ConstantPredictor(20.0)],
        ))
        .unwrap();
        tree
    }

    fn data() -> Vec<f32> {
        // 4 samples x 2 features
        vec![
            0.0, 0.0, // edge (0,0): 1.0
            1.0, 0.0, // (0,1) -> (1,0): 9.0
            1.0, 1.0, // (0,1) -> (1,1): 19.0
            -1.0, 0.0, // stop at root: 0.0
        ]
    }

    #[test]
    fn predict_batch_sequential_and_parallel_agree() {
        let tree = tree();
        let raw = data();
        let view = SamplesView::from_slice(&raw, 4, 2).unwrap();

        let expected = vec![1.0, 9.0, 19.0, 0.0];
        assert_eq!(tree.predict_batch(&view, Parallelism::Sequential).unwrap(), expected);
        assert_eq!(tree.predict_batch(&view, Parallelism::Parallel).unwrap(), expected);
    }

    #[test]
    fn predict_into_overwrites() {
        let tree = tree();
        let raw = data();
        let view = SamplesView::from_slice(&raw, 4, 2).unwrap();

        for parallelism in [Parallelism::Sequential, Parallelism::Parallel] {
            let mut predictions = vec![100.0; 4];
            tree.predict_into(&view, &mut predictions, parallelism).unwrap();
            assert_eq!(predictions, vec![1.0, 9.0, 19.0, 0.0]);
        }
    }

    #[test]
    fn predict_into_rejects_wrong_buffer() {
        let tree = tree();
        let raw = data();
        let view = SamplesView::from_slice(&raw, 4, 2).unwrap();
        let mut predictions = vec![0.0; 3];
        let err = tree
            .predict_into(&view, &mut predictions, Parallelism::Sequential)
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidArgument(_)));
    }

    #[test]
    fn visit_counts_sum_indicators() {
        let tree = tree();
        let raw = data();
        let view = SamplesView::from_slice(&raw, 4, 2).unwrap();

        let expected = vec![1, 2, 1, 1];
        assert_eq!(tree.edge_visit_counts(&view, Parallelism::Sequential).unwrap(), expected);
        assert_eq!(tree.edge_visit_counts(&view, Parallelism::Parallel).unwrap(), expected);
    }

    #[test]
    fn batch_error_surfaces() {
        let tree = tree();
        let rows = vec![vec![0.0f32], vec![5.0]];
        let err = tree
            .predict_batch(rows.as_slice(), Parallelism::Sequential)
            .unwrap_err();
        assert_eq!(err, TreeError::OutOfRange { node: 0, edge: 5, fan_out: 2 });
        assert!(tree.edge_visit_counts(rows.as_slice(), Parallelism::Parallel).is_err());
    }
}
