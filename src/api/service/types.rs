use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Date to precipitation amount over the last year of data.
pub type PrecipitationResponse = BTreeMap<String, Option<f64>>;

pub type StationsResponse = Vec<String>;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub temperature: Option<f64>,
}

pub type TobsResponse = Vec<TemperatureObservation>;

#[derive(Deserialize)]
pub struct StatsFromRequest {
    pub start: String,
}

#[derive(Deserialize)]
pub struct StatsRangeRequest {
    pub start: String,
    pub end: String,
}

/// Aggregates are `None` when no row in the range has a temperature.
#[derive(Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StatsResponse {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,

    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,

    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyDataset,
    MalformedInput,
    StoreUnavailable,
    Timeout,
    CorruptRecord,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::EmptyDataset => "empty_dataset",
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::Timeout => "timeout",
            ErrorKind::CorruptRecord => "corrupt_record",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, thiserror::Error)]
#[error("{error}: {message}")]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
}
