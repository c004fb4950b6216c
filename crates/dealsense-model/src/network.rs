//! Win-probability network
//!
//! Dense(64, ReLU) → Dropout → Dense(32, ReLU) → Dense(16, ReLU) → Dense(1, sigmoid)

use crate::activation::Activation;
use crate::layer::DenseLayer;
use crate::Result;
use dealsense_core::{FeatureVector, ModelError, WinPredictor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Network shape and initialisation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_dim: usize,
    pub hidden_units: Vec<usize>,
    /// Dropout applied after the first hidden layer while training
    pub dropout_rate: f64,
    pub seed: u64,
}

impl NetworkConfig {
    pub fn new(input_dim: usize) -> Self {
        Self {
            input_dim,
            hidden_units: vec![64, 32, 16],
            dropout_rate: 0.2,
            seed: 42,
        }
    }

    pub fn with_hidden_units(mut self, units: Vec<usize>) -> Self {
        self.hidden_units = units;
        self
    }

    pub fn with_dropout(mut self, rate: f64) -> Self {
        self.dropout_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Per-layer gradient buffers, shaped like the layer they belong to
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
}

impl LayerGradients {
    fn zeros_like(layer: &DenseLayer) -> Self {
        Self {
            weights: vec![0.0; layer.weights.len()],
            biases: vec![0.0; layer.biases.len()],
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.weights.iter_mut().for_each(|g| *g *= factor);
        self.biases.iter_mut().for_each(|g| *g *= factor);
    }
}

/// Feed-forward classifier producing a win probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinNetwork {
    layers: Vec<DenseLayer>,
    dropout_rate: f64,
}

impl WinNetwork {
    /// Build a freshly initialised network
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        if config.input_dim == 0 {
            return Err(ModelError::InvalidConfig("input dimension must be positive".to_string()));
        }
        if config.hidden_units.is_empty() || config.hidden_units.contains(&0) {
            return Err(ModelError::InvalidConfig(format!(
                "hidden layers must be non-empty with positive widths, got {:?}",
                config.hidden_units
            )));
        }
        if !(0.0..1.0).contains(&config.dropout_rate) {
            return Err(ModelError::InvalidConfig(format!(
                "dropout rate must be in [0, 1), got {}",
                config.dropout_rate
            )));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut layers = Vec::with_capacity(config.hidden_units.len() + 1);
        let mut fan_in = config.input_dim;
        for &units in &config.hidden_units {
            layers.push(DenseLayer::glorot(fan_in, units, Activation::Relu, &mut rng));
            fan_in = units;
        }
        layers.push(DenseLayer::glorot(fan_in, 1, Activation::Sigmoid, &mut rng));

        Ok(Self {
            layers,
            dropout_rate: config.dropout_rate,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.layers.first().map(|l| l.input_dim).unwrap_or(0)
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [DenseLayer] {
        &mut self.layers
    }

    pub fn dropout_rate(&self) -> f64 {
        self.dropout_rate
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(DenseLayer::parameter_count).sum()
    }

    /// Inference-mode forward pass (dropout disabled)
    pub fn predict_slice(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.input_dim() {
            return Err(ModelError::DimensionMismatch {
                expected: self.input_dim(),
                actual: input.len(),
            });
        }

        let mut activation = input.to_vec();
        for layer in &self.layers {
            activation = layer.forward(&activation).1;
        }

        let output = activation.first().copied().unwrap_or(f64::NAN);
        if !output.is_finite() {
            return Err(ModelError::NonFiniteOutput(output));
        }
        Ok(output)
    }

    pub fn predict_batch(&self, inputs: &[FeatureVector]) -> Result<Vec<f64>> {
        inputs.iter().map(|x| self.predict_slice(x.as_slice())).collect()
    }

    pub(crate) fn zero_gradients(&self) -> Vec<LayerGradients> {
        self.layers.iter().map(LayerGradients::zeros_like).collect()
    }

    /// Training-mode forward and backward pass for one sample.
    ///
    /// Adds dL/dθ of the binary cross-entropy into `grads` and returns the
    /// training-mode prediction.
    pub(crate) fn accumulate_gradients<R: Rng>(
        &self,
        input: &[f64],
        target: f64,
        rng: &mut R,
        grads: &mut [LayerGradients],
    ) -> Result<f64> {
        if input.len() != self.input_dim() {
            return Err(ModelError::DimensionMismatch {
                expected: self.input_dim(),
                actual: input.len(),
            });
        }

        let mut activations: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len() + 1);
        let mut pre_activations: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        let mut masks: Vec<Option<Vec<f64>>> = Vec::with_capacity(self.layers.len());
        activations.push(input.to_vec());

        for (i, layer) in self.layers.iter().enumerate() {
            let (z, mut a) = layer.forward(&activations[i]);
            let mask = if i == 0 && self.dropout_rate > 0.0 {
                let keep = 1.0 - self.dropout_rate;
                let mask: Vec<f64> = (0..a.len())
                    .map(|_| if rng.gen::<f64>() < self.dropout_rate { 0.0 } else { 1.0 / keep })
                    .collect();
                a.iter_mut().zip(&mask).for_each(|(v, m)| *v *= m);
                Some(mask)
            } else {
                None
            };
            pre_activations.push(z);
            activations.push(a);
            masks.push(mask);
        }

        let output = activations
            .last()
            .and_then(|a| a.first().copied())
            .unwrap_or(f64::NAN);
        if !output.is_finite() {
            return Err(ModelError::NonFiniteOutput(output));
        }

        // sigmoid + cross-entropy collapses to (p - y) at the output
        let mut delta = vec![output - target];
        for i in (0..self.layers.len()).rev() {
            let layer = &self.layers[i];
            let input = &activations[i];
            let grad = &mut grads[i];

            for (o, d) in delta.iter().enumerate() {
                grad.biases[o] += d;
                let row = &mut grad.weights[o * layer.input_dim..(o + 1) * layer.input_dim];
                for (g, x) in row.iter_mut().zip(input) {
                    *g += d * x;
                }
            }

            if i > 0 {
                let mut upstream = layer.backward_input(&delta);
                if let Some(mask) = &masks[i - 1] {
                    upstream.iter_mut().zip(mask).for_each(|(g, m)| *g *= m);
                }
                let previous = &self.layers[i - 1];
                delta = upstream
                    .iter()
                    .zip(&pre_activations[i - 1])
                    .map(|(g, &z)| g * previous.activation.derivative(z))
                    .collect();
            }
        }

        Ok(output)
    }

    /// Persist weights as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ModelError::Serialization(e.to_string()))?;
        std::fs::write(path.as_ref(), json).map_err(|e| {
            ModelError::Serialization(format!("failed to write {}: {}", path.as_ref().display(), e))
        })?;
        Ok(())
    }

    /// Load weights saved by [`WinNetwork::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ModelError::Serialization(format!("failed to read {}: {}", path.as_ref().display(), e))
        })?;
        let network: Self =
            serde_json::from_str(&json).map_err(|e| ModelError::Serialization(e.to_string()))?;
        network.check_shape()?;
        Ok(network)
    }

    fn check_shape(&self) -> Result<()> {
        let invalid = |msg: String| Err(ModelError::Serialization(msg));

        let Some(last) = self.layers.last() else {
            return invalid("network has no layers".to_string());
        };
        if last.output_dim != 1 || last.activation != Activation::Sigmoid {
            return invalid("output layer must be a single sigmoid unit".to_string());
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.len() != layer.input_dim * layer.output_dim
                || layer.biases.len() != layer.output_dim
            {
                return invalid(format!("layer {} parameters do not match its shape", i));
            }
            if i > 0 && self.layers[i - 1].output_dim != layer.input_dim {
                return invalid(format!("layer {} input does not match previous output", i));
            }
        }
        if !(0.0..1.0).contains(&self.dropout_rate) {
            return invalid(format!("invalid dropout rate {}", self.dropout_rate));
        }
        Ok(())
    }
}

impl WinPredictor for WinNetwork {
    fn predict(&self, features: &FeatureVector) -> std::result::Result<f64, ModelError> {
        self.predict_slice(features.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(input_dim: usize) -> WinNetwork {
        WinNetwork::new(&NetworkConfig::new(input_dim)).unwrap()
    }

    #[test]
    fn test_default_topology() {
        let net = network(12);
        let shapes: Vec<(usize, usize, Activation)> = net
            .layers()
            .iter()
            .map(|l| (l.input_dim, l.output_dim, l.activation))
            .collect();

        assert_eq!(
            shapes,
            vec![
                (12, 64, Activation::Relu),
                (64, 32, Activation::Relu),
                (32, 16, Activation::Relu),
                (16, 1, Activation::Sigmoid),
            ]
        );
        assert_eq!(net.dropout_rate(), 0.2);
        assert_eq!(net.parameter_count(), 12 * 64 + 64 + 64 * 32 + 32 + 32 * 16 + 16 + 16 + 1);
    }

    #[test]
    fn test_prediction_is_a_probability() {
        let net = network(3);
        for input in [[0.0, 0.0, 0.0], [10.0, -10.0, 3.0], [-250.0, 400.0, 1e3]] {
            let p = net.predict(&FeatureVector::new(input.to_vec())).unwrap();
            assert!((0.0..=1.0).contains(&p), "p = {}", p);
        }
    }

    #[test]
    fn test_inference_is_deterministic() {
        let net = network(4);
        let x = FeatureVector::new(vec![0.3, -1.2, 0.0, 2.5]);
        assert_eq!(net.predict(&x).unwrap(), net.predict(&x).unwrap());
    }

    #[test]
    fn test_same_seed_same_weights() {
        assert_eq!(network(5), network(5));
        let other = WinNetwork::new(&NetworkConfig::new(5).with_seed(9)).unwrap();
        assert_ne!(network(5), other);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = network(4).predict(&FeatureVector::new(vec![1.0, 2.0])).unwrap_err();
        assert_eq!(err, ModelError::DimensionMismatch { expected: 4, actual: 2 });
    }

    #[test]
    fn test_non_finite_input_is_reported() {
        let err = network(2)
            .predict(&FeatureVector::new(vec![f64::NAN, 1.0]))
            .unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteOutput(_)));
    }

    #[test]
    fn test_invalid_config() {
        assert!(WinNetwork::new(&NetworkConfig::new(0)).is_err());
        assert!(WinNetwork::new(&NetworkConfig::new(3).with_dropout(1.0)).is_err());
        assert!(WinNetwork::new(&NetworkConfig::new(3).with_hidden_units(vec![8, 0])).is_err());
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let net = WinNetwork::new(
            &NetworkConfig::new(3)
                .with_hidden_units(vec![4, 3])
                .with_dropout(0.0),
        )
        .unwrap();
        let x = [0.4, -0.7, 1.1];
        let y = 1.0;

        let mut grads = net.zero_gradients();
        let mut rng = StdRng::seed_from_u64(0);
        net.accumulate_gradients(&x, y, &mut rng, &mut grads).unwrap();

        let loss = |n: &WinNetwork| {
            let p = n.predict_slice(&x).unwrap();
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        };
        let h = 1e-6;
        for (layer_idx, weight_idx) in [(0, 0), (0, 5), (1, 2), (2, 1)] {
            let mut plus = net.clone();
            plus.layers_mut()[layer_idx].weights[weight_idx] += h;
            let mut minus = net.clone();
            minus.layers_mut()[layer_idx].weights[weight_idx] -= h;
            let numeric = (loss(&plus) - loss(&minus)) / (2.0 * h);
            let analytic = grads[layer_idx].weights[weight_idx];
            assert!(
                (numeric - analytic).abs() < 1e-5,
                "layer {} weight {}: numeric {} analytic {}",
                layer_idx,
                weight_idx,
                numeric,
                analytic
            );
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let net = network(6);

        net.save(&path).unwrap();
        let loaded = WinNetwork::load(&path).unwrap();
        assert_eq!(net, loaded);

        let x = FeatureVector::new(vec![0.1; 6]);
        assert_eq!(net.predict(&x).unwrap(), loaded.predict(&x).unwrap());
    }

    #[test]
    fn test_load_rejects_inconsistent_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut net = network(3);
        net.layers_mut()[1].weights.pop();
        std::fs::write(&path, serde_json::to_string(&net).unwrap()).unwrap();

        assert!(matches!(WinNetwork::load(&path), Err(ModelError::Serialization(_))));
    }
}
