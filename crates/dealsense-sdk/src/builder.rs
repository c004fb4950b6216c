//! Builder pattern for DealAgent

use crate::agent::DealAgent;
use crate::artifacts::ModelArtifacts;
use crate::config::AgentConfig;
use crate::error::{Result, SdkError};
use dealsense_core::ast::DecisionTable;
use dealsense_core::{FeatureTransform, WinPredictor};
use dealsense_parser::TableParser;
use dealsense_runtime::{ActionExecutor, MetricsCollector, ReasoningEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Builder for DealAgent
///
/// # Example
///
/// ```rust,ignore
/// use dealsense_sdk::DealAgentBuilder;
///
/// // From a trained artifacts directory
/// let agent = DealAgentBuilder::new()
///     .with_artifacts("artifacts")?
///     .with_threshold(0.65)
///     .build()?;
///
/// // With injected collaborators (tests, custom models)
/// let agent = DealAgentBuilder::new()
///     .with_transform(Arc::new(my_transform))
///     .with_predictor(Arc::new(my_model))
///     .with_decision_table_file("config/decision_table.yaml")
///     .build()?;
/// ```
pub struct DealAgentBuilder {
    config: AgentConfig,
    transform: Option<Arc<dyn FeatureTransform>>,
    predictor: Option<Arc<dyn WinPredictor>>,
    executor: Option<Arc<dyn ActionExecutor>>,
    metrics: Option<Arc<MetricsCollector>>,
    table: Option<DecisionTable>,
}

impl DealAgentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: AgentConfig::new(),
            transform: None,
            predictor: None,
            executor: None,
            metrics: None,
            table: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn with_high_value_cutoff(mut self, cutoff: f64) -> Self {
        self.config.high_value_cutoff = cutoff;
        self
    }

    /// Load the decision table from a YAML file
    pub fn with_decision_table_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.decision_table_file = Some(path.into());
        self
    }

    /// Decision table YAML (alternative to file path)
    pub fn with_decision_table_content(mut self, content: impl Into<String>) -> Self {
        self.config.decision_table_content = Some(content.into());
        self
    }

    /// Use an already built decision table
    pub fn with_decision_table(mut self, table: DecisionTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_transform(mut self, transform: Arc<dyn FeatureTransform>) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn WinPredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn ActionExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Share a metrics collector with the engine
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Load transform and model from a trained artifacts directory
    pub fn with_artifacts(self, dir: impl AsRef<Path>) -> Result<Self> {
        let artifacts = ModelArtifacts::load(dir)?;
        Ok(self
            .with_transform(Arc::new(artifacts.transform))
            .with_predictor(Arc::new(artifacts.network)))
    }

    /// Build the agent
    pub fn build(self) -> Result<DealAgent> {
        let transform = self
            .transform
            .ok_or_else(|| SdkError::ConfigError("no feature transform configured".to_string()))?;
        let predictor = self
            .predictor
            .ok_or_else(|| SdkError::ConfigError("no win predictor configured".to_string()))?;

        let table = match self.table {
            Some(table) => table,
            None => resolve_table(&self.config)?,
        };
        info!(
            table = %table.id,
            rows = table.rows.len(),
            threshold = self.config.threshold,
            high_value_cutoff = self.config.high_value_cutoff,
            "Building deal agent"
        );

        let mut engine = ReasoningEngine::with_table(self.config.engine_config(), table)?;
        if let Some(executor) = self.executor {
            engine = engine.with_executor(executor);
        }
        if let Some(metrics) = self.metrics {
            engine = engine.with_metrics(metrics);
        }

        Ok(DealAgent {
            config: self.config,
            transform,
            predictor,
            engine,
        })
    }
}

impl Default for DealAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content wins over a file; neither means the built-in table
fn resolve_table(config: &AgentConfig) -> Result<DecisionTable> {
    if let Some(content) = &config.decision_table_content {
        return Ok(TableParser::parse(content)?);
    }
    if let Some(path) = &config.decision_table_file {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SdkError::ConfigError(format!(
                "failed to read decision table {}: {}",
                path.display(),
                e
            ))
        })?;
        return Ok(TableParser::parse(&content)?);
    }
    Ok(DecisionTable::deal_health())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealsense_core::{DealRecord, FeatureVector, ModelError, TransformError};

    struct ConstantPredictor(f64);

    impl WinPredictor for ConstantPredictor {
        fn predict(&self, _features: &FeatureVector) -> std::result::Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct EmptyTransform;

    impl FeatureTransform for EmptyTransform {
        fn transform(&self, _record: &DealRecord) -> std::result::Result<FeatureVector, TransformError> {
            Ok(FeatureVector::new(vec![]))
        }

        fn output_width(&self) -> usize {
            0
        }
    }

    fn builder() -> DealAgentBuilder {
        DealAgentBuilder::new()
            .with_transform(Arc::new(EmptyTransform))
            .with_predictor(Arc::new(ConstantPredictor(0.5)))
    }

    #[test]
    fn test_builder_defaults() {
        let agent = builder().build().unwrap();
        assert_eq!(agent.config().threshold, 0.60);
        assert_eq!(agent.engine().table().id, "deal_health");
        assert_eq!(agent.engine().executor_name(), "logging");
    }

    #[test]
    fn test_missing_collaborators() {
        let err = DealAgentBuilder::new()
            .with_predictor(Arc::new(ConstantPredictor(0.5)))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no feature transform"));

        let err = DealAgentBuilder::new()
            .with_transform(Arc::new(EmptyTransform))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no win predictor"));
    }

    #[test]
    fn test_invalid_threshold() {
        let err = builder().with_threshold(1.5).build().unwrap_err();
        assert!(matches!(err, SdkError::RuntimeError(_)));
    }

    #[test]
    fn test_table_from_content() {
        let yaml = r#"
decision_table:
  id: escalate_everything
  rules:
    - id: all
      default: true
      action: manager_alert_task
      justification: Every deal gets a review.
"#;
        let agent = builder().with_decision_table_content(yaml).build().unwrap();
        assert_eq!(agent.engine().table().id, "escalate_everything");
    }

    #[test]
    fn test_table_file_missing() {
        let err = builder()
            .with_decision_table_file("/nonexistent/table.yaml")
            .build()
            .unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }

    #[test]
    fn test_malformed_table_content() {
        let err = builder()
            .with_decision_table_content("decision_table:\n  id: t\n  rules: []\n")
            .build()
            .unwrap_err();
        assert!(matches!(err, SdkError::ParseError(_)));
    }
}
