//! CSV dataset loading
//!
//! Reads the IBM Watson Sales-Win-Loss export layout. Identifier columns
//! (`Opportunity Number`, `Supplies Group`) are ignored, and the binary
//! label is derived from `Opportunity Result` ("Won" is a win, anything
//! else is a loss).

use crate::error::{PrepError, Result};
use dealsense_core::{DealRecord, LabeledDeal};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Column holding the outcome label
pub const RESULT_COLUMN: &str = "Opportunity Result";

/// Outcome value counted as a win
pub const WON_LABEL: &str = "Won";

/// One CSV row; unparseable numeric cells are read as missing
#[derive(Debug, Deserialize)]
struct RawDealRow {
    #[serde(
        rename = "Elapsed Days In Sales Stage",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    elapsed_days_in_sales_stage: Option<f64>,

    #[serde(
        rename = "Opportunity Amount USD",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    opportunity_amount_usd: Option<f64>,

    #[serde(
        rename = "Total Days Identified Through Closing",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    total_days_identified_through_closing: Option<f64>,

    #[serde(
        rename = "Ratio to Benchmark",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    ratio_to_benchmark: Option<f64>,

    #[serde(rename = "Supplies Subgroup", default)]
    supplies_subgroup: Option<String>,

    #[serde(rename = "Region", default)]
    region: Option<String>,

    #[serde(rename = "Route To Market", default)]
    route_to_market: Option<String>,

    #[serde(rename = "Opportunity Result", default)]
    opportunity_result: Option<String>,
}

impl From<RawDealRow> for LabeledDeal {
    fn from(row: RawDealRow) -> Self {
        let won = row.opportunity_result.as_deref() == Some(WON_LABEL);
        let record = DealRecord {
            elapsed_days_in_sales_stage: row.elapsed_days_in_sales_stage,
            opportunity_amount_usd: row.opportunity_amount_usd,
            total_days_identified_through_closing: row.total_days_identified_through_closing,
            ratio_to_benchmark: row.ratio_to_benchmark,
            supplies_subgroup: row.supplies_subgroup,
            region: row.region,
            route_to_market: row.route_to_market,
        };
        LabeledDeal::new(record, won)
    }
}

/// Load and clean a dataset from a CSV file
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<LabeledDeal>> {
    let path = path.as_ref();
    tracing::info!("Loading deals from {:?}", path);
    let file = File::open(path)?;
    read_deals(file)
}

/// Load and clean a dataset from any CSV reader
pub fn read_deals<R: Read>(reader: R) -> Result<Vec<LabeledDeal>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if !headers.iter().any(|h| h == RESULT_COLUMN) {
        return Err(PrepError::MissingColumn(RESULT_COLUMN.to_string()));
    }

    let mut deals = Vec::new();
    for row in csv_reader.deserialize::<RawDealRow>() {
        deals.push(LabeledDeal::from(row?));
    }
    if deals.is_empty() {
        return Err(PrepError::EmptyDataset);
    }

    let won = deals.iter().filter(|d| d.won).count();
    tracing::info!("Loaded {} deals ({} won, {} lost)", deals.len(), won, deals.len() - won);

    Ok(deals)
}
