//! Metrics collection
//!
//! Names used by the engine:
//! - `decisions_total`, `decisions_<action key>`
//! - `errors_validation`, `execution_failures`
//! - `decide_duration` (seconds)

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Monotonic counter
#[derive(Debug, Clone)]
pub struct Counter {
    name: String,
    value: Arc<RwLock<u64>>,
}

impl Counter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Arc::new(RwLock::new(0)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inc(&self) {
        self.add(1);
    }

    pub fn add(&self, value: u64) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) += value;
    }

    pub fn get(&self) -> u64 {
        *self.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn reset(&self) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = 0;
    }
}

/// Samples kept for percentile estimation
pub const DEFAULT_HISTOGRAM_WINDOW: usize = 1024;

#[derive(Debug, Default)]
struct HistogramState {
    count: usize,
    sum: f64,
    window: VecDeque<f64>,
}

/// Histogram with running count/sum and a bounded window of recent samples
///
/// Percentiles are computed over the most recent `window` observations only.
#[derive(Debug, Clone)]
pub struct Histogram {
    name: String,
    capacity: usize,
    state: Arc<RwLock<HistogramState>>,
}

impl Histogram {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_window(name, DEFAULT_HISTOGRAM_WINDOW)
    }

    pub fn with_window(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity: capacity.max(1),
            state: Arc::new(RwLock::new(HistogramState::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn observe(&self, value: f64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.count += 1;
        state.sum += value;
        if state.window.len() == self.capacity {
            state.window.pop_front();
        }
        state.window.push_back(value);
    }

    pub fn observe_duration(&self, duration: Duration) {
        self.observe(duration.as_secs_f64());
    }

    /// Total observations since creation or the last reset
    pub fn count(&self) -> usize {
        self.state.read().unwrap_or_else(PoisonError::into_inner).count
    }

    /// Samples currently held for percentiles
    pub fn retained(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .window
            .len()
    }

    pub fn sum(&self) -> f64 {
        self.state.read().unwrap_or_else(PoisonError::into_inner).sum
    }

    pub fn avg(&self) -> f64 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.count == 0 {
            0.0
        } else {
            state.sum / state.count as f64
        }
    }

    /// Nearest-rank percentile (0-100) over the retained window
    pub fn percentile(&self, p: f64) -> f64 {
        let mut values: Vec<f64> = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .window
            .iter()
            .copied()
            .collect();
        if values.is_empty() {
            return 0.0;
        }

        values.sort_by(f64::total_cmp);
        let index = ((p.clamp(0.0, 100.0) / 100.0) * (values.len() - 1) as f64).round() as usize;
        values[index]
    }

    pub fn reset(&self) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = HistogramState::default();
    }
}

/// Metrics sink used by the engine
pub trait Metrics: Send + Sync {
    /// Get or create a counter
    fn counter(&self, name: &str) -> Arc<Counter>;

    /// Get or create a histogram
    fn histogram(&self, name: &str) -> Arc<Histogram>;

    /// Record the duration of an operation as `<operation>_duration`
    fn record_execution_time(&self, operation: &str, duration: Duration) {
        self.histogram(&format!("{}_duration", operation))
            .observe_duration(duration);
    }

    /// Count an error as `errors_<error_type>`
    fn record_error(&self, error_type: &str) {
        self.counter(&format!("errors_{}", error_type)).inc();
    }
}

/// Point-in-time view of all metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub count: usize,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
}

/// Thread-safe in-memory metrics registry
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: RwLock<HashMap<String, Arc<Counter>>>,
    histograms: RwLock<HashMap<String, Arc<Histogram>>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn histogram_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let counters = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, c)| (name.clone(), c.get()))
            .collect();
        let histograms = self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, h)| {
                (
                    name.clone(),
                    HistogramSummary {
                        count: h.count(),
                        avg: h.avg(),
                        p50: h.percentile(50.0),
                        p95: h.percentile(95.0),
                    },
                )
            })
            .collect();

        MetricsSnapshot {
            counters,
            histograms,
        }
    }

    pub fn reset_all(&self) {
        for counter in self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            counter.reset();
        }
        for histogram in self
            .histograms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            histogram.reset();
        }
    }
}

impl Metrics for MetricsCollector {
    fn counter(&self, name: &str) -> Arc<Counter> {
        self.counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Counter::new(name)))
            .clone()
    }

    fn histogram(&self, name: &str) -> Arc<Histogram> {
        self.histograms
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Histogram::new(name)))
            .clone()
    }
}
