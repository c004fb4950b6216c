//! Reasoning engine
//!
//! `decide` is pure apart from metrics: it validates its inputs, walks the
//! decision table top to bottom and turns the first matching row into a
//! [`DecisionRecord`]. `execute` hands actionable decisions to the configured
//! [`ActionExecutor`] and never discards the decision on failure.

use crate::action::{ActionExecutor, LoggingExecutor, MONITORING_MESSAGE};
use crate::context::DecisionContext;
use crate::engine::justification::{check_template, render};
use crate::engine::operators::row_matches;
use crate::error::{Result, RuntimeError};
use crate::observability::{Metrics, MetricsCollector};
use dealsense_core::ast::DecisionTable;
use dealsense_core::{
    ActionType, DealRecord, DecisionRecord, ExecutionOutcome, ExecutionStatus, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Static business parameters of the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Probability at or above which a deal counts as healthy
    pub threshold: f64,
    /// Deal amount above which at-risk deals get an autonomous discount
    pub high_value_cutoff: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: 0.60,
            high_value_cutoff: 50000.0,
        }
    }
}

impl EngineConfig {
    pub fn new(threshold: f64, high_value_cutoff: f64) -> Self {
        Self {
            threshold,
            high_value_cutoff,
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

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(RuntimeError::InvalidConfig(format!(
                "threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        if !self.high_value_cutoff.is_finite() {
            return Err(RuntimeError::InvalidConfig(format!(
                "high value cutoff must be finite, got {}",
                self.high_value_cutoff
            )));
        }
        Ok(())
    }
}

/// Reasoning & Action engine
pub struct ReasoningEngine {
    config: EngineConfig,
    table: Arc<DecisionTable>,
    executor: Arc<dyn ActionExecutor>,
    metrics: Arc<MetricsCollector>,
}

impl ReasoningEngine {
    /// Engine over the built-in deal health table
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_table(config, DecisionTable::deal_health())
    }

    /// Engine over a custom decision table
    pub fn with_table(config: EngineConfig, table: DecisionTable) -> Result<Self> {
        config.validate()?;
        table.validate()?;
        for row in &table.rows {
            check_template(&row.justification)?;
        }

        Ok(Self {
            config,
            table: Arc::new(table),
            executor: Arc::new(LoggingExecutor::new()),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }

    /// Replace the action executor
    pub fn with_executor(mut self, executor: Arc<dyn ActionExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Share a metrics collector with the caller
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    /// Decide the next-best action using the configured parameters
    pub fn decide(&self, win_probability: f64, record: &DealRecord) -> Result<DecisionRecord> {
        self.decide_internal(win_probability, record, &self.config)
    }

    /// Decide with per-call threshold and cutoff
    pub fn decide_with(
        &self,
        win_probability: f64,
        record: &DealRecord,
        threshold: f64,
        high_value_cutoff: f64,
    ) -> Result<DecisionRecord> {
        let config = EngineConfig::new(threshold, high_value_cutoff);
        config.validate()?;
        self.decide_internal(win_probability, record, &config)
    }

    fn decide_internal(
        &self,
        win_probability: f64,
        record: &DealRecord,
        config: &EngineConfig,
    ) -> Result<DecisionRecord> {
        let start = Instant::now();
        let result = self.evaluate(win_probability, record, config);
        self.metrics.record_execution_time("decide", start.elapsed());

        match &result {
            Ok(decision) => {
                self.metrics.counter("decisions_total").inc();
                self.metrics
                    .counter(&format!("decisions_{}", decision.action_type().key()))
                    .inc();
            }
            Err(RuntimeError::Validation(err)) => {
                warn!("Rejected decision input: {}", err);
                self.metrics.record_error("validation");
            }
            Err(_) => {}
        }
        result
    }

    fn evaluate(
        &self,
        win_probability: f64,
        record: &DealRecord,
        config: &EngineConfig,
    ) -> Result<DecisionRecord> {
        if !(0.0..=1.0).contains(&win_probability) {
            return Err(ValidationError::ProbabilityOutOfRange {
                value: win_probability,
            }
            .into());
        }
        let deal_amount = record.deal_amount()?;

        let ctx = DecisionContext::new(
            win_probability,
            deal_amount,
            config.threshold,
            config.high_value_cutoff,
        );

        for row in &self.table.rows {
            if !row_matches(row, &ctx)? {
                continue;
            }

            let justification = render(&row.justification, &ctx);
            debug!(
                "Table '{}' row '{}' fired for p={:.4}, amount={:.2}",
                self.table.id, row.id, win_probability, deal_amount
            );
            info!(
                rule = %row.id,
                action = %row.action,
                "Decision: {}",
                justification
            );
            return Ok(DecisionRecord::new(
                win_probability,
                row.action,
                justification,
                row.id.clone(),
            ));
        }

        Err(RuntimeError::InvalidTable(format!(
            "no row of table '{}' matched",
            self.table.id
        )))
    }

    /// Carry out a decision.
    ///
    /// Executing the same record twice delivers it twice; engine state is
    /// not changed beyond metrics.
    pub async fn execute(&self, decision: &DecisionRecord) -> ExecutionOutcome {
        if !decision.action_required() {
            info!("[Status] {}", MONITORING_MESSAGE);
            return ExecutionOutcome::new(
                ExecutionStatus::Monitoring,
                ActionType::None,
                MONITORING_MESSAGE,
            );
        }

        match self.executor.deliver(decision).await {
            Ok(detail) => {
                self.metrics
                    .counter(&format!("executions_{}", decision.action_type().key()))
                    .inc();
                ExecutionOutcome::new(ExecutionStatus::Executed, decision.action_type(), detail)
            }
            Err(err) => {
                warn!(
                    executor = self.executor.name(),
                    action = %decision.action_type(),
                    "Action delivery failed: {}",
                    err
                );
                self.metrics.counter("execution_failures").inc();
                ExecutionOutcome::new(
                    ExecutionStatus::DeliveryFailed,
                    decision.action_type(),
                    err.to_string(),
                )
            }
        }
    }
}

impl std::fmt::Debug for ReasoningEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningEngine")
            .field("config", &self.config)
            .field("table", &self.table.id)
            .field("executor", &self.executor.name())
            .finish()
    }
}
