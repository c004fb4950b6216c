//! DealSense Prep - Data preparation for the DealSense pipeline
//!
//! This crate turns a raw CRM export into model-ready datasets:
//! - CSV loading with label derivation
//! - Column transform (impute + scale numerics, impute + one-hot categoricals)
//! - Seeded train / validation / test splitting

pub mod error;
pub mod loader;
pub mod split;
pub mod transform;

// Re-export main types
pub use error::{PrepError, Result};
pub use loader::{load_csv, read_deals};
pub use split::{prepare_split, PreparedData, SplitConfig};
pub use transform::{ColumnTransformer, FittedTransform};
