//! Adam optimizer

use crate::network::{LayerGradients, WinNetwork};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
        }
    }
}

impl AdamConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }
}

/// Adam state: first and second moment estimates per parameter
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
    step: u64,
    first_moment: Vec<LayerGradients>,
    second_moment: Vec<LayerGradients>,
}

impl Adam {
    pub fn new(config: AdamConfig, network: &WinNetwork) -> Self {
        let zeros = network.zero_gradients();
        Self {
            config,
            step: 0,
            first_moment: zeros.clone(),
            second_moment: zeros,
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    /// Apply one update from batch-averaged gradients
    pub fn step(&mut self, network: &mut WinNetwork, grads: &[LayerGradients]) {
        self.step += 1;
        let AdamConfig {
            learning_rate,
            beta1,
            beta2,
            epsilon,
        } = self.config;
        let t = self.step as f64;
        let lr_t = learning_rate * (1.0 - beta2.powf(t)).sqrt() / (1.0 - beta1.powf(t));

        let update = |params: &mut [f64], grad: &[f64], m: &mut [f64], v: &mut [f64]| {
            for (((p, g), m), v) in params.iter_mut().zip(grad).zip(m.iter_mut()).zip(v.iter_mut()) {
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g * g;
                *p -= lr_t * *m / (v.sqrt() + epsilon);
            }
        };

        for (((layer, grad), m), v) in network
            .layers_mut()
            .iter_mut()
            .zip(grads)
            .zip(self.first_moment.iter_mut())
            .zip(self.second_moment.iter_mut())
        {
            update(&mut layer.weights, &grad.weights, &mut m.weights, &mut v.weights);
            update(&mut layer.biases, &grad.biases, &mut m.biases, &mut v.biases);
        }
    }
}
