//! Mini-batch training with early stopping

use crate::evaluation::{binary_cross_entropy, evaluate};
use crate::network::WinNetwork;
use crate::optimizer::{Adam, AdamConfig};
use crate::Result;
use dealsense_core::{Dataset, ModelError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub batch_size: usize,
    /// Epochs without validation-loss improvement before stopping
    pub patience: usize,
    pub seed: u64,
    pub optimizer: AdamConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 32,
            patience: 5,
            seed: 42,
            optimizer: AdamConfig::default(),
        }
    }
}

impl TrainingConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.optimizer = self.optimizer.with_learning_rate(learning_rate);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(ModelError::InvalidConfig("epochs must be positive".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ModelError::InvalidConfig("batch size must be positive".to_string()));
        }
        if self.patience == 0 {
            return Err(ModelError::InvalidConfig("patience must be positive".to_string()));
        }
        if !(self.optimizer.learning_rate > 0.0 && self.optimizer.learning_rate.is_finite()) {
            return Err(ModelError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.optimizer.learning_rate
            )));
        }
        Ok(())
    }
}

/// Metrics recorded at the end of one epoch (1-based)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,
    pub loss: f64,
    pub mae: f64,
    pub val_loss: f64,
    pub val_mae: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochMetrics>,
    /// Epoch whose weights the network holds after training
    pub best_epoch: usize,
    pub best_val_loss: f64,
    pub stopped_early: bool,
}

impl TrainingHistory {
    pub fn epochs_run(&self) -> usize {
        self.epochs.len()
    }

    pub fn best(&self) -> Option<&EpochMetrics> {
        self.epochs.iter().find(|e| e.epoch == self.best_epoch)
    }
}

pub struct Trainer {
    config: TrainingConfig,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `network` in place.
    ///
    /// The network ends up holding the weights of the epoch with the lowest
    /// validation loss.
    pub fn fit(
        &self,
        network: &mut WinNetwork,
        train: &Dataset,
        validation: &Dataset,
    ) -> Result<TrainingHistory> {
        self.config.validate()?;
        check_dataset("training", network, train)?;
        check_dataset("validation", network, validation)?;

        info!(
            train = train.len(),
            validation = validation.len(),
            parameters = network.parameter_count(),
            epochs = self.config.epochs,
            "Training perception model"
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut optimizer = Adam::new(self.config.optimizer, network);
        let mut order: Vec<usize> = (0..train.len()).collect();

        let mut history = Vec::with_capacity(self.config.epochs);
        let mut best_weights = network.clone();
        let mut best_val_loss = f64::INFINITY;
        let mut best_epoch = 0;
        let mut wait = 0;
        let mut stopped_early = false;

        for epoch in 1..=self.config.epochs {
            order.shuffle(&mut rng);

            let mut loss_sum = 0.0;
            let mut abs_sum = 0.0;
            for batch in order.chunks(self.config.batch_size) {
                let mut grads = network.zero_gradients();
                for &i in batch {
                    let target = train.targets[i];
                    let p = network.accumulate_gradients(
                        train.features[i].as_slice(),
                        target,
                        &mut rng,
                        &mut grads,
                    )?;
                    loss_sum += binary_cross_entropy(p, target);
                    abs_sum += (p - target).abs();
                }
                let scale = 1.0 / batch.len() as f64;
                grads.iter_mut().for_each(|g| g.scale(scale));
                optimizer.step(network, &grads);
            }

            let val = evaluate(network, validation)?;
            let metrics = EpochMetrics {
                epoch,
                loss: loss_sum / train.len() as f64,
                mae: abs_sum / train.len() as f64,
                val_loss: val.loss,
                val_mae: val.mae,
            };
            debug!(
                epoch,
                loss = metrics.loss,
                mae = metrics.mae,
                val_loss = metrics.val_loss,
                val_mae = metrics.val_mae,
                "Epoch complete"
            );
            history.push(metrics);

            if val.loss < best_val_loss {
                best_val_loss = val.loss;
                best_epoch = epoch;
                best_weights = network.clone();
                wait = 0;
            } else {
                wait += 1;
                if wait >= self.config.patience {
                    stopped_early = true;
                    break;
                }
            }
        }

        *network = best_weights;

        info!(
            epochs_run = history.len(),
            best_epoch,
            best_val_loss,
            stopped_early,
            "Training finished"
        );

        Ok(TrainingHistory {
            epochs: history,
            best_epoch,
            best_val_loss,
            stopped_early,
        })
    }
}

fn check_dataset(name: &str, network: &WinNetwork, dataset: &Dataset) -> Result<()> {
    if dataset.is_empty() {
        return Err(ModelError::EmptyDataset(format!("{} set is empty", name)));
    }
    if dataset.features.len() != dataset.targets.len() {
        return Err(ModelError::InvalidConfig(format!(
            "{} set has {} feature rows but {} targets",
            name,
            dataset.features.len(),
            dataset.targets.len()
        )));
    }
    if let Some(row) = dataset
        .features
        .iter()
        .find(|row| row.len() != network.input_dim())
    {
        return Err(ModelError::DimensionMismatch {
            expected: network.input_dim(),
            actual: row.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkConfig;
    use dealsense_core::FeatureVector;
    use rand::Rng;

    /// Two blobs split on the sign of the first coordinate
    fn separable(n: usize, seed: u64) -> Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut features = Vec::with_capacity(n);
        let mut targets = Vec::with_capacity(n);
        for i in 0..n {
            let won = i % 2 == 0;
            let centre = if won { 1.5 } else { -1.5 };
            features.push(FeatureVector::new(vec![
                centre + rng.gen_range(-0.5..0.5),
                rng.gen_range(-1.0..1.0),
            ]));
            targets.push(if won { 1.0 } else { 0.0 });
        }
        Dataset::new(features, targets)
    }

    fn flipped(dataset: &Dataset) -> Dataset {
        Dataset::new(
            dataset.features.clone(),
            dataset.targets.iter().map(|y| 1.0 - y).collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.epochs, 50);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.patience, 5);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_learns_separable_data() {
        let train = separable(200, 1);
        let validation = separable(60, 2);
        let test = separable(60, 3);

        let mut net = WinNetwork::new(&NetworkConfig::new(2)).unwrap();
        let history = Trainer::new(TrainingConfig::default().with_learning_rate(0.01))
            .fit(&mut net, &train, &validation)
            .unwrap();

        assert!(history.epochs_run() >= 1);
        let first = &history.epochs[0];
        assert!(history.best_val_loss < first.val_loss || history.best_epoch == 1);

        let report = evaluate(&net, &test).unwrap();
        assert!(report.accuracy >= 0.9, "accuracy = {}", report.accuracy);
        assert!(report.mae < 0.3, "mae = {}", report.mae);
    }

    #[test]
    fn test_early_stopping_restores_best_weights() {
        let train = separable(120, 4);
        // validation labels disagree with training labels, so val loss rises
        let validation = flipped(&separable(40, 5));

        let mut net = WinNetwork::new(&NetworkConfig::new(2)).unwrap();
        let config = TrainingConfig::default()
            .with_learning_rate(0.01)
            .with_patience(2);
        let history = Trainer::new(config).fit(&mut net, &train, &validation).unwrap();

        assert!(history.stopped_early);
        assert_eq!(history.epochs_run(), history.best_epoch + 2);
        assert!(history.epochs_run() < 50);

        let restored = evaluate(&net, &validation).unwrap();
        assert!((restored.loss - history.best_val_loss).abs() < 1e-12);
        assert_eq!(history.best().map(|e| e.val_loss), Some(history.best_val_loss));
    }

    #[test]
    fn test_training_is_reproducible() {
        let train = separable(64, 6);
        let validation = separable(16, 7);
        let config = TrainingConfig::default().with_epochs(3);

        let mut a = WinNetwork::new(&NetworkConfig::new(2)).unwrap();
        let mut b = a.clone();
        let ha = Trainer::new(config.clone()).fit(&mut a, &train, &validation).unwrap();
        let hb = Trainer::new(config).fit(&mut b, &train, &validation).unwrap();

        assert_eq!(ha, hb);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_empty_and_mismatched_data() {
        let mut net = WinNetwork::new(&NetworkConfig::new(2)).unwrap();
        let trainer = Trainer::new(TrainingConfig::default());
        let empty = Dataset::new(vec![], vec![]);

        assert!(matches!(
            trainer.fit(&mut net, &empty, &separable(4, 1)),
            Err(ModelError::EmptyDataset(_))
        ));
        assert!(matches!(
            trainer.fit(&mut net, &separable(4, 1), &empty),
            Err(ModelError::EmptyDataset(_))
        ));

        let wide = Dataset::new(vec![FeatureVector::new(vec![0.0; 3])], vec![1.0]);
        assert_eq!(
            trainer.fit(&mut net, &wide, &separable(4, 1)).unwrap_err(),
            ModelError::DimensionMismatch { expected: 2, actual: 3 }
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut net = WinNetwork::new(&NetworkConfig::new(2)).unwrap();
        let data = separable(4, 1);
        for config in [
            TrainingConfig::default().with_epochs(0),
            TrainingConfig::default().with_batch_size(0),
            TrainingConfig::default().with_patience(0),
            TrainingConfig::default().with_learning_rate(-1.0),
        ] {
            assert!(matches!(
                Trainer::new(config).fit(&mut net, &data, &data),
                Err(ModelError::InvalidConfig(_))
            ));
        }
    }
}
