// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger CSV boundary. Everything that reaches the engines has been
//! validated here; one bad cell fails the whole load.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{BalanceRecord, DatasetSummary};
use crate::utils::{detect_date, parse_amount};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::BTreeSet;
use std::path::Path;

pub const COL_DATE: &str = "Data";
pub const COL_VALUE: &str = "Valor";
pub const COL_INSTITUTION: &str = "Instituição";

/// Whole-column formats, tried in order before per-value detection.
const COLUMN_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

fn column_index(headers: &csv::StringRecord, name: &str) -> AnalysisResult<usize> {
    headers
        .iter()
        .position(|h| h.trim().trim_start_matches('\u{feff}') == name)
        .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
}

/// Parse a date column. A fixed format applies only if every value fits it.
pub fn parse_date_column(raw: &[String]) -> AnalysisResult<Vec<NaiveDate>> {
    for fmt in COLUMN_FORMATS {
        let parsed: Option<Vec<NaiveDate>> = raw
            .iter()
            .map(|s| NaiveDate::parse_from_str(s, fmt).ok())
            .collect();
        if let Some(dates) = parsed {
            log::debug!("date column parsed with format {}", fmt);
            return Ok(dates);
        }
    }
    raw.iter()
        .enumerate()
        .map(|(idx, s)| {
            detect_date(s).ok_or_else(|| AnalysisError::InvalidDate {
                row: idx + 1,
                value: s.clone(),
            })
        })
        .collect()
}

pub fn load_records<R: std::io::Read>(
    reader: R,
    delimiter: u8,
) -> AnalysisResult<Vec<BalanceRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, COL_DATE)?;
    let value_idx = column_index(&headers, COL_VALUE)?;
    let inst_idx = column_index(&headers, COL_INSTITUTION)?;

    let mut raw_dates = Vec::new();
    let mut values = Vec::new();
    let mut institutions = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = idx + 1;
        let cell = |i: usize| rec.get(i).unwrap_or("").trim().to_string();
        let value_raw = cell(value_idx);
        let value = parse_amount(&value_raw).ok_or(AnalysisError::InvalidValue {
            row,
            value: value_raw.clone(),
        })?;
        raw_dates.push(cell(date_idx));
        values.push(value);
        institutions.push(cell(inst_idx));
    }

    let dates = parse_date_column(&raw_dates)?;
    let records: Vec<BalanceRecord> = dates
        .into_iter()
        .zip(values)
        .zip(institutions)
        .map(|((date, value), institution)| BalanceRecord {
            date,
            value,
            institution,
        })
        .collect();
    log::info!("loaded {} balance records", records.len());
    Ok(records)
}

pub fn load_records_from_path<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> AnalysisResult<Vec<BalanceRecord>> {
    let file = std::fs::File::open(path)?;
    load_records(file, delimiter)
}

pub fn summarize(records: &[BalanceRecord]) -> DatasetSummary {
    let mut institutions: Vec<String> = Vec::new();
    for r in records {
        if !institutions.contains(&r.institution) {
            institutions.push(r.institution.clone());
        }
    }
    let dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.date).collect();
    DatasetSummary {
        record_count: records.len(),
        period_count: dates.len(),
        institutions,
        first_date: dates.first().copied(),
        last_date: dates.last().copied(),
    }
}
