//! Property-based tests for split, sampling and query invariants

use proptest::prelude::*;
use std::collections::BTreeSet;

use nuscenes_sr::{LabelStore, MatchMode, SceneLabel, SplitRatios};

// ============================================================================
// Strategies
// ============================================================================

fn arb_label() -> impl Strategy<Value = SceneLabel> {
    prop::sample::select(SceneLabel::ALL.to_vec())
}

/// Store of `0..max` scenes, each with one to four labels
fn arb_store(max: usize) -> impl Strategy<Value = LabelStore> {
    prop::collection::vec(prop::collection::vec(arb_label(), 1..4), 0..max).prop_map(|scenes| {
        let body: Vec<String> = scenes
            .iter()
            .enumerate()
            .map(|(i, labels)| {
                let names: Vec<String> = labels.iter().map(|l| format!("\"{}\"", l)).collect();
                format!(
                    "\"scene_{}\": {{\"labels\": [{}], \"description\": \"\"}}",
                    i,
                    names.join(",")
                )
            })
            .collect();
        LabelStore::from_json_str(&format!("{{{}}}", body.join(","))).unwrap()
    })
}

/// Ratios that sum to 1.0
fn arb_ratios() -> impl Strategy<Value = SplitRatios> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(a, b)| {
        let train = a;
        let val = (1.0 - a) * b;
        SplitRatios::new(train, val, 1.0 - train - val)
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: split parts are disjoint and cover every token
    #[test]
    fn prop_split_partitions_store(store in arb_store(40), ratios in arb_ratios(), seed in any::<u64>()) {
        let split = store.split_dataset(ratios, seed).unwrap();
        prop_assert_eq!(split.total(), store.len());

        let union: BTreeSet<&String> = split.train.iter()
            .chain(split.val.iter())
            .chain(split.test.iter())
            .collect();
        prop_assert_eq!(union.len(), store.len());
        for token in union {
            prop_assert!(store.contains(token));
        }
    }

    /// Property: same seed, same split
    #[test]
    fn prop_split_deterministic(store in arb_store(30), seed in any::<u64>()) {
        let a = store.split_dataset(SplitRatios::default(), seed).unwrap();
        let b = store.split_dataset(SplitRatios::default(), seed).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: sampling is reproducible and yields distinct tokens
    #[test]
    fn prop_sample_deterministic(store in arb_store(30), fraction in 0.0f64..=1.0, seed in any::<u64>()) {
        let n = (store.len() as f64 * fraction) as usize;
        let first = store.sample_scenes(n, seed).unwrap();
        let second = store.sample_scenes(n, seed).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.iter().collect::<BTreeSet<_>>().len(), n);
    }

    /// Property: AND results are a subset of OR results
    #[test]
    fn prop_all_subset_of_any(store in arb_store(30), labels in prop::collection::vec(arb_label(), 1..4)) {
        let all = store.get_scenes_by_labels(&labels, MatchMode::All).unwrap();
        let any = store.get_scenes_by_labels(&labels, MatchMode::Any).unwrap();
        prop_assert!(all.is_subset(&any));
    }
}
