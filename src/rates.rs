// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reference interest-rate schedule (annual percentages with validity ranges).

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{RateInterval, RateSelection, RateSource};
use crate::utils::parse_iso_prefix;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Annual rate (percent) used when no reference interval covers the date.
pub const DEFAULT_ANNUAL_RATE: Decimal = Decimal::from_parts(1075, 0, 0, false, 2);

pub const DEFAULT_RATES_URL: &str = "https://www.bcb.gov.br/api/servico/sitebcb/historicotaxasjuros";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    pub intervals: Vec<RateInterval>,
}

impl RateTable {
    pub fn new(intervals: Vec<RateInterval>) -> Self {
        Self { intervals }
    }

    /// Interval covering `date`; open-ended intervals run through `today`.
    /// On overlap the most recently started interval wins.
    pub fn find(&self, date: NaiveDate, today: NaiveDate) -> Option<&RateInterval> {
        self.intervals
            .iter()
            .filter(|i| i.valid_from <= date && date <= i.valid_to.unwrap_or(today))
            .max_by_key(|i| i.valid_from)
    }

    pub fn select(&self, date: NaiveDate, today: NaiveDate, default_rate: Decimal) -> RateSelection {
        match self.find(date, today) {
            Some(i) => RateSelection {
                annual_rate: i.rate,
                source: RateSource::Reference {
                    valid_from: i.valid_from,
                    valid_to: i.valid_to,
                },
            },
            None => {
                log::warn!(
                    "no reference rate covers {}, using fallback {}%",
                    date,
                    default_rate
                );
                fallback(default_rate)
            }
        }
    }
}

pub fn fallback(default_rate: Decimal) -> RateSelection {
    RateSelection {
        annual_rate: default_rate,
        source: RateSource::Fallback,
    }
}

/// Pick a rate from a table that may have failed to load.
pub fn select_or_default<E: std::fmt::Display>(
    table: Result<RateTable, E>,
    date: NaiveDate,
    today: NaiveDate,
    default_rate: Decimal,
) -> RateSelection {
    match table {
        Ok(t) => t.select(date, today, default_rate),
        Err(err) => {
            log::warn!("reference rates unavailable ({}), using fallback {}%", err, default_rate);
            fallback(default_rate)
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    conteudo: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    #[serde(rename = "DataInicioVigencia")]
    valid_from: String,
    #[serde(rename = "DataFimVigencia")]
    valid_to: Option<String>,
    #[serde(rename = "MetaSelic")]
    rate: f64,
}

fn parse_history(body: HistoryResponse) -> AnalysisResult<RateTable> {
    let mut intervals = Vec::with_capacity(body.conteudo.len());
    for (idx, e) in body.conteudo.into_iter().enumerate() {
        let valid_from = parse_iso_prefix(&e.valid_from).ok_or_else(|| AnalysisError::InvalidDate {
            row: idx + 1,
            value: e.valid_from.clone(),
        })?;
        let valid_to = match e.valid_to.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(parse_iso_prefix(s).ok_or_else(|| AnalysisError::InvalidDate {
                row: idx + 1,
                value: s.to_string(),
            })?),
            None => None,
        };
        let rate = Decimal::try_from(e.rate).map_err(|_| AnalysisError::InvalidValue {
            row: idx + 1,
            value: e.rate.to_string(),
        })?;
        intervals.push(RateInterval {
            valid_from,
            valid_to,
            rate,
        });
    }
    Ok(RateTable::new(intervals))
}

/// Fetch the rate history published by the central bank.
pub fn fetch_history(client: &reqwest::blocking::Client, url: &str) -> AnalysisResult<RateTable> {
    let resp = client.get(url).send()?.error_for_status()?;
    let body: HistoryResponse = resp.json()?;
    let table = parse_history(body)?;
    log::info!("fetched {} reference rate intervals", table.intervals.len());
    Ok(table)
}

pub fn parse_history_json(s: &str) -> AnalysisResult<RateTable> {
    let body: HistoryResponse = serde_json::from_str(s)?;
    parse_history(body)
}

/// Load `valid_from,valid_to,rate` rows; an empty `valid_to` is open-ended.
pub fn load_rate_table<R: std::io::Read>(reader: R) -> AnalysisResult<RateTable> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut intervals = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = idx + 1;
        let cell = |i: usize| rec.get(i).unwrap_or("").trim().to_string();
        let from_raw = cell(0);
        let to_raw = cell(1);
        let rate_raw = cell(2);
        let valid_from = parse_iso_prefix(&from_raw).ok_or(AnalysisError::InvalidDate {
            row,
            value: from_raw.clone(),
        })?;
        let valid_to = if to_raw.is_empty() {
            None
        } else {
            Some(parse_iso_prefix(&to_raw).ok_or(AnalysisError::InvalidDate {
                row,
                value: to_raw.clone(),
            })?)
        };
        let rate = rate_raw
            .parse::<Decimal>()
            .map_err(|_| AnalysisError::InvalidValue {
                row,
                value: rate_raw.clone(),
            })?;
        intervals.push(RateInterval {
            valid_from,
            valid_to,
            rate,
        });
    }
    Ok(RateTable::new(intervals))
}

pub fn load_rate_table_from_path(path: &str) -> AnalysisResult<RateTable> {
    let file = std::fs::File::open(path)?;
    load_rate_table(file)
}
