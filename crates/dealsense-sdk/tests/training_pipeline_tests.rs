//! Train from CSV, persist artifacts, score through the agent

use dealsense_core::{ActionType, DealRecord, LabeledDeal};
use dealsense_model::TrainingConfig;
use dealsense_sdk::artifacts::load_report;
use dealsense_sdk::{
    train_from_csv, train_from_deals, DealAgentBuilder, ModelArtifacts, PipelineConfig,
    MODEL_FILE, REPORT_FILE, TRANSFORM_FILE,
};
use std::fmt::Write;

/// Deals that win when they move quickly through the pipeline
fn synthetic_deals(n: usize) -> Vec<LabeledDeal> {
    let regions = ["Pacific", "Midwest", "Southeast"];
    (0..n)
        .map(|i| {
            let days = (i % 40) as f64;
            let won = days < 20.0;
            let record = DealRecord::new()
                .with_days_in_stage(days)
                .with_amount(5000.0 + (i % 17) as f64 * 9000.0)
                .with_days_to_close((i % 11) as f64)
                .with_benchmark_ratio(0.8)
                .with_region(regions[i % regions.len()])
                .with_route("Reseller");
            LabeledDeal::new(record, won)
        })
        .collect()
}

fn quick_config() -> PipelineConfig {
    PipelineConfig {
        training: TrainingConfig::default()
            .with_epochs(15)
            .with_learning_rate(0.01),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_train_and_reload_artifacts() {
    let outcome = train_from_deals(&synthetic_deals(300), &quick_config()).unwrap();
    assert!(outcome.history.epochs_run() >= 1);
    assert_eq!(outcome.report.samples, 45);
    assert!(outcome.report.accuracy > 0.7, "accuracy = {}", outcome.report.accuracy);

    let dir = tempfile::tempdir().unwrap();
    outcome.save(dir.path()).unwrap();
    for file in [TRANSFORM_FILE, MODEL_FILE, REPORT_FILE] {
        assert!(dir.path().join(file).exists(), "missing {}", file);
    }
    assert_eq!(load_report(dir.path()).unwrap(), outcome.report);

    let loaded = ModelArtifacts::load(dir.path()).unwrap();
    assert_eq!(loaded.network, outcome.artifacts.network);
    assert_eq!(loaded.transform, outcome.artifacts.transform);
}

#[tokio::test]
async fn test_agent_from_artifacts() {
    let outcome = train_from_deals(&synthetic_deals(300), &quick_config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    outcome.save(dir.path()).unwrap();

    let agent = DealAgentBuilder::new()
        .with_artifacts(dir.path())
        .unwrap()
        .build()
        .unwrap();

    let fast = DealRecord::new()
        .with_days_in_stage(2.0)
        .with_amount(90000.0)
        .with_days_to_close(3.0)
        .with_region("Pacific")
        .with_route("Reseller");
    let p_fast = agent.score(&fast).unwrap();
    assert!((0.0..=1.0).contains(&p_fast));

    let slow = fast.clone().with_days_in_stage(38.0);
    let p_slow = agent.score(&slow).unwrap();
    assert!(p_fast > p_slow, "fast {} vs slow {}", p_fast, p_slow);

    let report = agent.analyze_and_act(&slow).await.unwrap();
    if report.decision.probability() < 0.60 {
        assert_eq!(
            report.decision.action_type(),
            ActionType::AutonomousDiscountTrigger
        );
    } else {
        assert_eq!(report.decision.action_type(), ActionType::None);
    }
}

#[test]
fn test_train_from_csv_export() {
    let mut csv = String::from(
        "Opportunity Number,Supplies Subgroup,Supplies Group,Region,Route To Market,\
         Elapsed Days In Sales Stage,Opportunity Result,Opportunity Amount USD,\
         Total Days Identified Through Closing,Ratio to Benchmark\n",
    );
    for i in 0..120 {
        let days = i % 30;
        let result = if days < 15 { "Won" } else { "Loss" };
        writeln!(
            csv,
            "{},Batteries & Accessories,Car Accessories,Midwest,Fields Sales,{},{},{},{},0.7",
            7_000_000 + i,
            days,
            result,
            10000 + i * 500,
            i % 9
        )
        .unwrap();
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    std::fs::write(&path, csv).unwrap();

    let outcome = train_from_csv(&path, &quick_config()).unwrap();
    assert_eq!(outcome.report.samples, 18);
    assert!(outcome.history.best_epoch >= 1);
}

#[test]
fn test_too_few_deals() {
    let result = train_from_deals(&synthetic_deals(2), &quick_config());
    assert!(matches!(result, Err(dealsense_sdk::SdkError::PrepError(_))));
}
