//! Fully connected layer

use crate::activation::Activation;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Dense layer with row-major weights (`output_dim` rows of `input_dim`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub input_dim: usize,
    pub output_dim: usize,
    pub activation: Activation,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    /// Glorot-uniform weights, zero biases
    pub fn glorot<R: Rng>(input_dim: usize, output_dim: usize, activation: Activation, rng: &mut R) -> Self {
        let limit = (6.0 / (input_dim + output_dim) as f64).sqrt();
        let weights = (0..input_dim * output_dim)
            .map(|_| rng.gen_range(-limit..=limit))
            .collect();

        Self {
            input_dim,
            output_dim,
            activation,
            weights,
            biases: vec![0.0; output_dim],
        }
    }

    /// Pre-activations `z = W x + b`
    pub fn linear(&self, input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(input.len(), self.input_dim);
        self.weights
            .chunks_exact(self.input_dim)
            .zip(&self.biases)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect()
    }

    /// Pre-activations and activations for one input
    pub fn forward(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let z = self.linear(input);
        let a = z.iter().map(|&v| self.activation.apply(v)).collect();
        (z, a)
    }

    /// Propagate `delta` (dL/dz of this layer) back to dL/da of the input
    pub fn backward_input(&self, delta: &[f64]) -> Vec<f64> {
        let mut grad = vec![0.0; self.input_dim];
        for (row, d) in self.weights.chunks_exact(self.input_dim).zip(delta) {
            for (g, w) in grad.iter_mut().zip(row) {
                *g += w * d;
            }
        }
        grad
    }

    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}
