//! CLI configuration

use dealsense_model::TrainingConfig;
use dealsense_sdk::{AgentConfig, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
///
/// Read from `config/dealsense.{yaml,toml,json}` (optional) and then
/// `DEALSENSE_*` environment variables, e.g. `DEALSENSE_THRESHOLD=0.55`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Probability threshold for intervention
    pub threshold: f64,

    /// Deal amount separating discount from escalation
    pub high_value_cutoff: f64,

    /// Optional decision table file (YAML)
    pub decision_table_file: Option<PathBuf>,

    /// Directory holding transform.json / model.json / report.json
    pub artifacts_dir: PathBuf,

    /// Seed for splitting, weight init and shuffling
    pub seed: u64,

    pub epochs: usize,

    pub batch_size: usize,

    pub patience: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        let agent = AgentConfig::default();
        let training = TrainingConfig::default();
        Self {
            threshold: agent.threshold,
            high_value_cutoff: agent.high_value_cutoff,
            decision_table_file: None,
            artifacts_dir: PathBuf::from("artifacts"),
            seed: training.seed,
            epochs: training.epochs,
            batch_size: training.batch_size,
            patience: training.patience,
        }
    }
}

impl CliConfig {
    /// Load configuration from the config file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        Self::from_sources(
            config::File::with_name("config/dealsense").required(false),
            config::Environment::with_prefix("DEALSENSE").try_parsing(true),
        )
    }

    /// Build from an explicit file source and environment source
    pub fn from_sources(file: config::File<config::FileSourceFile, config::FileFormat>, env: config::Environment) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    pub fn agent_config(&self) -> AgentConfig {
        let mut agent = AgentConfig::new()
            .with_threshold(self.threshold)
            .with_high_value_cutoff(self.high_value_cutoff);
        if let Some(path) = &self.decision_table_file {
            agent = agent.with_decision_table_file(path);
        }
        agent
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut pipeline = PipelineConfig::default();
        pipeline.split = pipeline.split.with_seed(self.seed);
        pipeline.training = TrainingConfig::default()
            .with_epochs(self.epochs)
            .with_batch_size(self.batch_size)
            .with_patience(self.patience)
            .with_seed(self.seed);
        pipeline.init_seed = self.seed;
        pipeline
    }
}
