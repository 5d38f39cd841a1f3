//! Property-based tests for tree growth and evaluation.
//!
//! Trees are grown from arbitrary growth plans: each step picks one of the
//! current leaves and splits it with a rule of arbitrary fan-out.

use approx::assert_relative_eq;
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use edgetree::data::SampleAccessor;
use edgetree::predictors::ConstantPredictor;
use edgetree::repr::tree::{Leaf, Route, SplitCandidate, SplitRule, TreeError, TreePredictor};
use edgetree::Parallelism;

const N_FEATURES: usize = 4;

/// Buckets a feature into `fan_out` edges; values below -0.8 stop.
#[derive(Debug, Clone, PartialEq)]
struct Bucket {
    feature: usize,
    fan_out: u32,
}

impl SplitRule for Bucket {
    fn route<S: SampleAccessor + ?Sized>(&self, sample: &S) -> Route {
        let value = sample.feature(self.feature);
        if value < -0.8 {
            Route::Stop
        } else {
            Route::Edge((value.abs() * 10.0) as u32 % self.fan_out)
        }
    }
}

type Tree = TreePredictor<Bucket, ConstantPredictor>;

/// One growth step: which leaf to pick and the new node's edge values.
type Step = (usize, Vec<f64>);

fn arb_step() -> impl Strategy<Value = Step> {
    (any::<usize>(), prop_vec(-10.0f64..10.0, 1..5))
}

fn arb_sample() -> impl Strategy<Value = Vec<f32>> {
    prop_vec(-1.0f32..1.0, 0..=N_FEATURES)
}

fn grow(plan: &[Step]) -> Tree {
    let mut tree = Tree::new();
    for (i, (pick, values)) in plan.iter().enumerate() {
        let leaves: Vec<Leaf> = tree.leaves().collect();
        let leaf = leaves[pick % leaves.len()];
        let rule = Bucket {
            feature: i % N_FEATURES,
            fan_out: values.len() as u32,
        };
        let predictors = values.iter().copied().map(ConstantPredictor).collect();
        tree.split(SplitCandidate::new(leaf, rule, predictors)).unwrap();
    }
    tree
}

proptest! {
    #[test]
    fn prediction_is_sum_over_indicator(
        plan in prop_vec(arb_step(), 0..12),
        x in arb_sample(),
    ) {
        let tree = grow(&plan);
        let prediction = tree.predict(&x).unwrap();
        let indicator = tree.edge_path_indicator(&x).unwrap();
        prop_assert_eq!(indicator.len(), tree.n_edges());

        let expected: f64 = tree
            .edges()
            .filter(|(edge_ref, _)| indicator[edge_ref.position])
            .map(|(_, edge)| edge.predictor().0)
            .sum();
        assert_relative_eq!(prediction, expected, epsilon = 1e-9);
    }

    #[test]
    fn counters_track_successful_splits(plan in prop_vec(arb_step(), 0..12)) {
        let tree = grow(&plan);
        let fan_outs: usize = plan.iter().map(|(_, values)| values.len()).sum();

        prop_assert_eq!(tree.n_interior_nodes(), plan.len());
        prop_assert_eq!(tree.n_edges(), fan_outs);
        prop_assert_eq!(
            tree.nodes().iter().map(|n| n.edges().len()).sum::<usize>(),
            tree.n_edges()
        );
        prop_assert!(tree.validate().is_ok());

        // Every split consumes one leaf and adds `fan_out` new ones.
        let expected_leaves = if plan.is_empty() { 1 } else { fan_outs - (plan.len() - 1) };
        prop_assert_eq!(tree.leaves().count(), expected_leaves);
    }

    #[test]
    fn split_grows_counters_by_fan_out(
        plan in prop_vec(arb_step(), 0..8),
        step in arb_step(),
    ) {
        let mut tree = grow(&plan);
        let (nodes, edges) = (tree.n_interior_nodes(), tree.n_edges());
        let leaves: Vec<Leaf> = tree.leaves().collect();
        let leaf = leaves[step.0 % leaves.len()];
        let fan_out = step.1.len();

        let rule = Bucket { feature: 0, fan_out: fan_out as u32 };
        let predictors = step.1.iter().copied().map(ConstantPredictor).collect();
        let id = tree.split(SplitCandidate::new(leaf, rule, predictors)).unwrap();

        prop_assert_eq!(id as usize, nodes);
        prop_assert_eq!(tree.n_interior_nodes(), nodes + 1);
        prop_assert_eq!(tree.n_edges(), edges + fan_out);
        prop_assert_eq!(tree.edge_offset(id), Some(edges));
    }

    #[test]
    fn resplit_fails_without_mutation(plan in prop_vec(arb_step(), 1..10)) {
        let mut tree = grow(&plan);
        let before = tree.clone();

        // Root, and every edge that already has a target.
        let mut expanded = vec![Leaf::Root];
        expanded.extend(
            tree.edges()
                .filter(|(_, edge)| !edge.is_leaf())
                .map(|(edge_ref, _)| edge_ref.leaf()),
        );

        for leaf in expanded {
            let rule = Bucket { feature: 0, fan_out: 1 };
            let err = tree
                .split(SplitCandidate::new(leaf, rule, vec![ConstantPredictor(1.0)]))
                .unwrap_err();
            let is_already_expanded = matches!(err, TreeError::AlreadyExpanded { .. });
            prop_assert!(is_already_expanded);
            prop_assert_eq!(&tree, &before);
        }
    }

    #[test]
    fn evaluation_is_idempotent(
        plan in prop_vec(arb_step(), 0..12),
        x in arb_sample(),
    ) {
        let tree = grow(&plan);
        let first = tree.predict(&x).unwrap();
        for _ in 0..3 {
            prop_assert_eq!(tree.predict(&x).unwrap().to_bits(), first.to_bits());
        }
        prop_assert_eq!(tree.edge_path_indicator(&x).unwrap(), tree.edge_path_indicator(&x).unwrap());
    }

    #[test]
    fn indicator_positions_are_stable_under_growth(
        plan in prop_vec(arb_step(), 1..10),
        extra in arb_step(),
        x in arb_sample(),
    ) {
        let small = grow(&plan);
        let mut extended = plan.clone();
        extended.push(extra);
        let large = grow(&extended);

        // Growth only appends: the old edges keep their positions and predictors.
        for ((a, ea), (b, eb)) in small.edges().zip(large.edges()) {
            prop_assert_eq!(a, b);
            prop_assert_eq!(ea.predictor(), eb.predictor());
        }
        let path = small.edge_path(&x).unwrap();
        let positions: Vec<usize> = path.iter().map(|e| e.position).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn visit_counts_match_indicators(
        plan in prop_vec(arb_step(), 0..10),
        samples in prop_vec(arb_sample(), 0..20),
    ) {
        let tree = grow(&plan);
        let mut expected = vec![0u64; tree.n_edges()];
        for x in &samples {
            for (count, visited) in expected.iter_mut().zip(tree.edge_path_indicator(x).unwrap()) {
                *count += u64::from(visited);
            }
        }

        let data = samples.as_slice();
        prop_assert_eq!(&tree.edge_visit_counts(data, Parallelism::Sequential).unwrap(), &expected);
        prop_assert_eq!(&tree.edge_visit_counts(data, Parallelism::Parallel).unwrap(), &expected);

        let predictions = tree.predict_batch(data, Parallelism::Parallel).unwrap();
        for (x, p) in samples.iter().zip(predictions) {
            prop_assert_eq!(tree.predict(x).unwrap().to_bits(), p.to_bits());
        }
    }
}
