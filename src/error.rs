// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures that stop an analysis. Arithmetic edge cases never end up here;
/// they surface as `None` or zero in the affected fields instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Invalid date '{value}' on row {row}")]
    InvalidDate { row: usize, value: String },
    #[error("Invalid value '{value}' on row {row}")]
    InvalidValue { row: usize, value: String },
    #[error("No balance periods available")]
    EmptySeries,
    #[error("Date out of range: {0} plus {1} months")]
    DateOutOfRange(chrono::NaiveDate, u32),
    #[error("Invalid annual rate {0}%")]
    InvalidRate(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
