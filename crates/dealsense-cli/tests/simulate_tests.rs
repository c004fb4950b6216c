//! Scenario replay through the full agent loop

use dealsense_cli::simulate::{reference_scenarios, run_scenarios};
use dealsense_core::{ActionType, ExecutionStatus};
use dealsense_sdk::AgentConfig;

#[tokio::test]
async fn test_reference_scenarios() {
    let reports = run_scenarios(&reference_scenarios(), &AgentConfig::default())
        .await
        .unwrap();

    let actions: Vec<ActionType> = reports
        .iter()
        .map(|(_, r)| r.decision.action_type())
        .collect();
    assert_eq!(
        actions,
        vec![
            ActionType::None,
            ActionType::AutonomousDiscountTrigger,
            ActionType::ManagerAlertTask,
            ActionType::None,
        ]
    );

    let statuses: Vec<ExecutionStatus> = reports.iter().map(|(_, r)| r.outcome.status).collect();
    assert_eq!(
        statuses,
        vec![
            ExecutionStatus::Monitoring,
            ExecutionStatus::Executed,
            ExecutionStatus::Executed,
            ExecutionStatus::Monitoring,
        ]
    );
}

#[tokio::test]
async fn test_scenarios_follow_configured_threshold() {
    let config = AgentConfig::default().with_threshold(0.40);
    let reports = run_scenarios(&reference_scenarios(), &config).await.unwrap();

    assert!(reports.iter().all(|(_, r)| !r.decision.action_required()));
}
