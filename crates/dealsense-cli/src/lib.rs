//! DealSense command-line interface
//!
//! `dealsense train <csv> [artifacts_dir]` fits the transform and the
//! perception model, `dealsense score <record.json> [artifacts_dir]` runs
//! one deal through the agent, and `dealsense simulate` replays the
//! reference scenarios against fixed probabilities.

pub mod commands;
pub mod config;
pub mod simulate;
