//! Configuration types for DealAgent

use dealsense_runtime::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Probability at or above which no intervention is taken
    pub threshold: f64,

    /// Deal amount above which at-risk deals get an autonomous discount
    pub high_value_cutoff: f64,

    /// Optional decision table file, replaces the built-in table
    pub decision_table_file: Option<PathBuf>,

    /// Decision table YAML - alternative to file path
    #[serde(skip)]
    pub decision_table_content: Option<String>,
}

impl AgentConfig {
    /// Create a configuration with the default business parameters
    pub fn new() -> Self {
        let engine = EngineConfig::default();
        Self {
            threshold: engine.threshold,
            high_value_cutoff: engine.high_value_cutoff,
            decision_table_file: None,
            decision_table_content: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_high_value_cutoff(mut self, cutoff: f64) -> Self {
        self.high_value_cutoff = cutoff;
        self
    }

    pub fn with_decision_table_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.decision_table_file = Some(path.into());
        self
    }

    pub fn with_decision_table_content(mut self, content: impl Into<String>) -> Self {
        self.decision_table_content = Some(content.into());
        self
    }

    /// Engine parameters derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.threshold, self.high_value_cutoff)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
