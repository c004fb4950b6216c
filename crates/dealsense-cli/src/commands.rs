//! Command parsing and dispatch

use crate::config::CliConfig;
use crate::simulate::{reference_scenarios, run_scenarios};
use anyhow::{bail, Context, Result};
use dealsense_core::DealRecord;
use dealsense_sdk::{train_from_csv, DealAgentBuilder};
use std::path::{Path, PathBuf};
use tracing::info;

pub const USAGE: &str = "\
Usage:
  dealsense train <dataset.csv> [artifacts_dir]
  dealsense score <record.json> [artifacts_dir]
  dealsense simulate";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Train {
        dataset: PathBuf,
        artifacts_dir: Option<PathBuf>,
    },
    Score {
        record: PathBuf,
        artifacts_dir: Option<PathBuf>,
    },
    Simulate,
    Help,
}

impl Command {
    /// Parse arguments (without the program name)
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut iter = args.iter();
        let Some(name) = iter.next() else {
            return Ok(Command::Help);
        };
        let rest: Vec<&String> = iter.collect();

        match (name.as_str(), rest.as_slice()) {
            ("train", [dataset]) => Ok(Command::Train {
                dataset: PathBuf::from(dataset.as_str()),
                artifacts_dir: None,
            }),
            ("train", [dataset, dir]) => Ok(Command::Train {
                dataset: PathBuf::from(dataset.as_str()),
                artifacts_dir: Some(PathBuf::from(dir.as_str())),
            }),
            ("score", [record]) => Ok(Command::Score {
                record: PathBuf::from(record.as_str()),
                artifacts_dir: None,
            }),
            ("score", [record, dir]) => Ok(Command::Score {
                record: PathBuf::from(record.as_str()),
                artifacts_dir: Some(PathBuf::from(dir.as_str())),
            }),
            ("simulate", []) => Ok(Command::Simulate),
            ("help" | "-h" | "--help", _) => Ok(Command::Help),
            (other, _) => bail!("unrecognised arguments for '{}'\n\n{}", other, USAGE),
        }
    }
}

pub async fn run(command: Command, config: &CliConfig) -> Result<()> {
    match command {
        Command::Train {
            dataset,
            artifacts_dir,
        } => train(&dataset, artifacts_dir.as_deref().unwrap_or(&config.artifacts_dir), config),
        Command::Score {
            record,
            artifacts_dir,
        } => score(&record, artifacts_dir.as_deref().unwrap_or(&config.artifacts_dir), config).await,
        Command::Simulate => simulate(config).await,
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn train(dataset: &Path, artifacts_dir: &Path, config: &CliConfig) -> Result<()> {
    info!("Training from {}", dataset.display());
    let outcome = train_from_csv(dataset, &config.pipeline_config())
        .with_context(|| format!("training on {} failed", dataset.display()))?;
    outcome
        .save(artifacts_dir)
        .with_context(|| format!("could not write artifacts to {}", artifacts_dir.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "artifacts_dir": artifacts_dir,
            "epochs_run": outcome.history.epochs_run(),
            "best_epoch": outcome.history.best_epoch,
            "stopped_early": outcome.history.stopped_early,
            "report": outcome.report,
        }))?
    );
    Ok(())
}

async fn score(record_path: &Path, artifacts_dir: &Path, config: &CliConfig) -> Result<()> {
    let json = std::fs::read_to_string(record_path)
        .with_context(|| format!("could not read {}", record_path.display()))?;
    let record: DealRecord = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid deal record", record_path.display()))?;

    let agent = DealAgentBuilder::new()
        .with_config(config.agent_config())
        .with_artifacts(artifacts_dir)
        .with_context(|| format!("could not load artifacts from {}", artifacts_dir.display()))?
        .build()?;

    let report = agent.analyze_and_act(&record).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn simulate(config: &CliConfig) -> Result<()> {
    info!("Agent Engine Mode: Standalone Simulation");
    let reports = run_scenarios(&reference_scenarios(), &config.agent_config()).await?;

    let summary: Vec<serde_json::Value> = reports
        .iter()
        .map(|(name, report)| serde_json::json!({ "scenario": name, "report": report }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_train() {
        assert_eq!(
            Command::parse(&args(&["train", "sales.csv"])).unwrap(),
            Command::Train {
                dataset: PathBuf::from("sales.csv"),
                artifacts_dir: None
            }
        );
        assert_eq!(
            Command::parse(&args(&["train", "sales.csv", "out"])).unwrap(),
            Command::Train {
                dataset: PathBuf::from("sales.csv"),
                artifacts_dir: Some(PathBuf::from("out"))
            }
        );
    }

    #[test]
    fn test_parse_score_and_simulate() {
        assert_eq!(
            Command::parse(&args(&["score", "deal.json", "models"])).unwrap(),
            Command::Score {
                record: PathBuf::from("deal.json"),
                artifacts_dir: Some(PathBuf::from("models"))
            }
        );
        assert_eq!(Command::parse(&args(&["simulate"])).unwrap(), Command::Simulate);
        assert_eq!(Command::parse(&args(&[])).unwrap(), Command::Help);
        assert_eq!(Command::parse(&args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(Command::parse(&args(&["train"])).is_err());
        assert!(Command::parse(&args(&["score", "a", "b", "c"])).is_err());
        assert!(Command::parse(&args(&["deploy"])).is_err());
        assert!(Command::parse(&args(&["simulate", "extra"])).is_err());
    }
}
