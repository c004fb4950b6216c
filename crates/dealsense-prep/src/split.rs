//! Train / validation / test splitting
//!
//! Deals are shuffled with a seeded RNG, a hold-out share is carved off,
//! and the hold-out is halved into validation and test partitions. The
//! column transform is fitted on the training partition only.

use crate::error::{PrepError, Result};
use crate::transform::{ColumnTransformer, FittedTransform};
use dealsense_core::{Dataset, DealRecord, FeatureTransform, LabeledDeal};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Split configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Share of rows held out from training
    pub holdout_fraction: f64,

    /// Share of the hold-out used for the test partition
    pub test_fraction_of_holdout: f64,

    /// Shuffle seed
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            holdout_fraction: 0.3,
            test_fraction_of_holdout: 0.5,
            seed: 42,
        }
    }
}

impl SplitConfig {
    /// Set the shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Partition sizes `(train, validation, test)` for `rows` rows
    pub fn partition_sizes(&self, rows: usize) -> (usize, usize, usize) {
        let holdout = ceil_share(self.holdout_fraction, rows);
        let test = ceil_share(self.test_fraction_of_holdout, holdout);
        let validation = holdout - test;
        (rows - holdout, validation, test)
    }
}

/// `ceil(fraction * n)`, tolerant of float noise such as `0.3 * 10`
fn ceil_share(fraction: f64, n: usize) -> usize {
    let share = ((fraction * n as f64) - 1e-9).ceil().max(0.0) as usize;
    share.min(n)
}

/// Encoded partitions plus the transform fitted on the training rows
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub transform: FittedTransform,
    pub train: Dataset,
    pub validation: Dataset,
    pub test: Dataset,
}

/// Shuffle, split, fit the transform on train, and encode every partition
pub fn prepare_split(deals: &[LabeledDeal], config: &SplitConfig) -> Result<PreparedData> {
    let (n_train, n_validation, n_test) = config.partition_sizes(deals.len());
    if n_train == 0 || n_validation == 0 || n_test == 0 {
        return Err(PrepError::InsufficientData { rows: deals.len() });
    }

    let mut indices: Vec<usize> = (0..deals.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let (train_idx, rest) = indices.split_at(n_train);
    let (validation_idx, test_idx) = rest.split_at(n_validation);

    let train_records: Vec<DealRecord> = train_idx
        .iter()
        .map(|&i| deals[i].record.clone())
        .collect();
    let transform = ColumnTransformer::fit(&train_records)?;

    let encode = |idx: &[usize]| -> Result<Dataset> {
        let mut features = Vec::with_capacity(idx.len());
        let mut targets = Vec::with_capacity(idx.len());
        for &i in idx {
            features.push(transform.transform(&deals[i].record)?);
            targets.push(deals[i].target());
        }
        Ok(Dataset::new(features, targets))
    };

    let train = encode(train_idx)?;
    let validation = encode(validation_idx)?;
    let test = encode(test_idx)?;

    tracing::info!(
        "Split {} deals into train={} validation={} test={} ({} features)",
        deals.len(),
        train.len(),
        validation.len(),
        test.len(),
        transform.width()
    );

    Ok(PreparedData {
        transform,
        train,
        validation,
        test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_deals(n: usize) -> Vec<LabeledDeal> {
        (0..n)
            .map(|i| {
                let record = DealRecord::new()
                    .with_days_in_stage(i as f64)
                    .with_amount(1000.0 * (i % 7) as f64)
                    .with_days_to_close((i % 11) as f64)
                    .with_benchmark_ratio(0.5 + (i % 3) as f64 * 0.25)
                    .with_region(if i % 2 == 0 { "Pacific" } else { "Midwest" })
                    .with_route("Reseller")
                    .with_subgroup("Batteries");
                LabeledDeal::new(record, i % 3 == 0)
            })
            .collect()
    }

    #[test]
    fn test_partition_sizes() {
        let config = SplitConfig::default();
        assert_eq!(config.partition_sizes(100), (70, 15, 15));
        assert_eq!(config.partition_sizes(10), (7, 1, 2));
        assert_eq!(config.partition_sizes(20), (14, 3, 3));
        assert_eq!(config.partition_sizes(4), (2, 1, 1));
    }

    #[test]
    fn test_prepare_split_sizes() {
        let deals = synthetic_deals(100);
        let prepared = prepare_split(&deals, &SplitConfig::default()).unwrap();

        assert_eq!(prepared.train.len(), 70);
        assert_eq!(prepared.validation.len(), 15);
        assert_eq!(prepared.test.len(), 15);
        assert_eq!(prepared.train.width(), Some(prepared.transform.width()));
    }

    #[test]
    fn test_prepare_split_is_reproducible() {
        let deals = synthetic_deals(50);
        let a = prepare_split(&deals, &SplitConfig::default()).unwrap();
        let b = prepare_split(&deals, &SplitConfig::default()).unwrap();

        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
        assert_eq!(a.transform, b.transform);
    }

    #[test]
    fn test_different_seed_changes_split() {
        let deals = synthetic_deals(50);
        let a = prepare_split(&deals, &SplitConfig::default()).unwrap();
        let b = prepare_split(&deals, &SplitConfig::default().with_seed(7)).unwrap();

        assert_ne!(a.train.targets.len(), 0);
        assert_ne!(a.train, b.train);
    }

    #[test]
    fn test_partitions_cover_every_deal() {
        let deals = synthetic_deals(40);
        let prepared = prepare_split(&deals, &SplitConfig::default()).unwrap();

        let positives = prepared.train.targets.iter().sum::<f64>()
            + prepared.validation.targets.iter().sum::<f64>()
            + prepared.test.targets.iter().sum::<f64>();
        let expected = deals.iter().filter(|d| d.won).count() as f64;
        assert_eq!(positives, expected);
    }

    #[test]
    fn test_too_few_rows() {
        let deals = synthetic_deals(3);
        let err = prepare_split(&deals, &SplitConfig::default()).unwrap_err();
        assert!(matches!(err, PrepError::InsufficientData { rows: 3 }));
    }
}
