//! Seeded sampling and train/val/test partitioning.
//!
//! Both operations draw from `StdRng::seed_from_u64` over the store's sorted
//! token list, so the same seed and the same file always give the same result.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::core::dataset::LabelStore;
use crate::error::{Error, Result};

/// Allowed distance between the ratio sum and 1.0
pub const RATIO_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Val,
    Test,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Val => "val",
            DatasetSplit::Test => "test",
        }
    }

    pub fn all() -> [DatasetSplit; 3] {
        [DatasetSplit::Train, DatasetSplit::Val, DatasetSplit::Test]
    }
}

/// Target ratios for train/val/test split distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    pub train: f64, // e.g., 0.70 for 70%
    pub val: f64,   // e.g., 0.15 for 15%
    pub test: f64,  // e.g., 0.15 for 15%
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            val: 0.1,
            test: 0.1,
        }
    }
}

impl SplitRatios {
    pub fn new(train: f64, val: f64, test: f64) -> Self {
        Self { train, val, test }
    }

    /// Get the target ratio for a specific split
    pub fn get(&self, split: DatasetSplit) -> f64 {
        match split {
            DatasetSplit::Train => self.train,
            DatasetSplit::Val => self.val,
            DatasetSplit::Test => self.test,
        }
    }

    /// Each ratio finite and non-negative, sum within [`RATIO_TOLERANCE`] of 1.0
    pub fn validate(&self) -> Result<()> {
        for split in DatasetSplit::all() {
            let ratio = self.get(split);
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(Error::Ratio(format!(
                    "{} ratio must be a non-negative number, got {}",
                    split.as_str(),
                    ratio
                )));
            }
        }

        let sum = self.train + self.val + self.test;
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(Error::Ratio(format!("ratios must sum to 1.0, got {}", sum)));
        }
        Ok(())
    }
}

/// Three disjoint token lists covering the whole store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub train: Vec<String>,
    pub val: Vec<String>,
    pub test: Vec<String>,
}

impl SplitResult {
    pub fn get(&self, split: DatasetSplit) -> &[String] {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Val => &self.val,
            DatasetSplit::Test => &self.test,
        }
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}

impl LabelStore {
    fn sorted_tokens(&self) -> Vec<String> {
        self.scene_tokens().map(str::to_string).collect()
    }

    /// `n` distinct tokens chosen with a generator seeded by `seed`
    pub fn sample_scenes(&self, n: usize, seed: u64) -> Result<Vec<String>> {
        if n > self.len() {
            return Err(Error::SampleSize {
                requested: n,
                available: self.len(),
            });
        }

        let tokens = self.sorted_tokens();
        let mut rng = StdRng::seed_from_u64(seed);
        let sample: Vec<String> = rand::seq::index::sample(&mut rng, tokens.len(), n)
            .into_iter()
            .map(|idx| tokens[idx].clone())
            .collect();

        info!("Sampled {} of {} scenes (seed {})", sample.len(), tokens.len(), seed);
        Ok(sample)
    }

    /// Shuffle every token with `seed` and cut the list by `ratios`.
    ///
    /// Train takes `round(train * N)` tokens, val the next `round(val * N)`,
    /// and test whatever is left, so rounding never drops or repeats a token.
    pub fn split_dataset(&self, ratios: SplitRatios, seed: u64) -> Result<SplitResult> {
        ratios.validate()?;

        let mut tokens = self.sorted_tokens();
        let mut rng = StdRng::seed_from_u64(seed);
        tokens.shuffle(&mut rng);

        let total = tokens.len();
        let train_count = allocation(ratios.train, total).min(total);
        let val_count = allocation(ratios.val, total).min(total - train_count);

        let test = tokens.split_off(train_count + val_count);
        let val = tokens.split_off(train_count);
        let result = SplitResult {
            train: tokens,
            val,
            test,
        };

        info!(
            "Dataset split: Train={}, Val={}, Test={} (seed {})",
            result.train.len(),
            result.val.len(),
            result.test.len(),
            seed
        );
        Ok(result)
    }
}

fn allocation(ratio: f64, total: usize) -> usize {
    (ratio * total as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn create_store(count: usize) -> LabelStore {
        let body: Vec<String> = (0..count)
            .map(|i| format!(r#""scene_{:03}": {{"labels": ["INTERSECTION"], "description": ""}}"#, i))
            .collect();
        LabelStore::from_json_str(&format!("{{{}}}", body.join(","))).unwrap()
    }

    #[test]
    fn test_sample_is_reproducible() {
        let store = create_store(50);
        let first = store.sample_scenes(10, 42).unwrap();
        let second = store.sample_scenes(10, 42).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.iter().collect::<BTreeSet<_>>().len(), 10);
    }

    #[test]
    fn test_sample_full_population() {
        let store = create_store(20);
        let sample = store.sample_scenes(20, 7).unwrap();
        let unique: BTreeSet<&str> = sample.iter().map(String::as_str).collect();
        assert_eq!(sample.len(), 20);
        assert_eq!(unique, store.scene_tokens().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_sample_too_large() {
        let store = create_store(3);
        let err = store.sample_scenes(4, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::SampleSize {
                requested: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn test_sample_zero() {
        let store = create_store(3);
        assert!(store.sample_scenes(0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_split_sizes_follow_rounding() {
        let store = create_store(10);
        let split = store
            .split_dataset(SplitRatios::new(0.7, 0.15, 0.15), 42)
            .unwrap();
        // round(7.0) = 7, round(1.5) = 2, remainder 1
        assert_eq!(split.train.len(), 7);
        assert_eq!(split.val.len(), 2);
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.total(), 10);
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let store = create_store(37);
        let split = store.split_dataset(SplitRatios::default(), 3).unwrap();

        let mut seen = BTreeSet::new();
        for part in DatasetSplit::all() {
            for token in split.get(part) {
                assert!(seen.insert(token.clone()), "{} appears twice", token);
            }
        }
        assert_eq!(seen.len(), 37);
    }

    #[test]
    fn test_split_tiny_stores() {
        for count in [0, 1] {
            let store = create_store(count);
            let split = store.split_dataset(SplitRatios::default(), 9).unwrap();
            assert_eq!(split.total(), count);
        }
    }

    #[test]
    fn test_split_same_seed_same_result() {
        let store = create_store(25);
        let a = store.split_dataset(SplitRatios::default(), 11).unwrap();
        let b = store.split_dataset(SplitRatios::default(), 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_ratios() {
        let store = create_store(5);
        for ratios in [
            SplitRatios::new(0.5, 0.2, 0.2),
            SplitRatios::new(1.2, -0.1, -0.1),
            SplitRatios::new(f64::NAN, 0.5, 0.5),
        ] {
            let err = store.split_dataset(ratios, 0).unwrap_err();
            assert!(matches!(err, Error::Ratio(_)));
        }
    }

    #[test]
    fn test_ratio_tolerance() {
        assert!(SplitRatios::new(0.7, 0.2, 0.1 + 5e-7).validate().is_ok());
        assert!(SplitRatios::new(1.0, 0.0, 0.0).validate().is_ok());
    }
}
