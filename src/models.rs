// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trailing window sizes, in periods.
pub const WINDOWS: [usize; 3] = [6, 12, 24];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub date: NaiveDate,
    pub value: Decimal,
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowStats {
    pub window: usize,
    pub mean_abs_delta: Option<Decimal>,
    pub trend_abs: Decimal,
    pub trend_rel: Decimal,
}

/// One row per distinct ledger date, summed across institutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodAggregate {
    pub date: NaiveDate,
    pub value: Decimal,
    pub absolute_delta: Option<Decimal>,
    pub relative_delta: Option<Decimal>,
    pub windows: Vec<WindowStats>,
}

impl PeriodAggregate {
    pub fn window(&self, size: usize) -> Option<&WindowStats> {
        self.windows.iter().find(|w| w.window == size)
    }

    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalParams {
    pub start_date: NaiveDate,
    pub fixed_costs: Decimal,
    pub net_income: Decimal,
    pub goal_amount: Decimal,
    /// Defaults to starting balance + goal when absent.
    pub final_net_worth: Option<Decimal>,
    /// Annual rate in percent, e.g. 10.75.
    pub annual_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartResolution {
    Exact,
    LatestInMonth,
    EarliestInSeries,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRow {
    pub reference_period: String, // YYYY-MM
    pub monthly_goal: Decimal,
    pub expected_attainment: Option<Decimal>,
    pub actual_value: Option<Decimal>,
    pub attainment_pct: Option<Decimal>,
    pub attainment_year_pct: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub requested_start: NaiveDate,
    pub resolved_start: NaiveDate,
    pub resolution: StartResolution,
    pub starting_balance: Decimal,
    pub annual_rate: Decimal,
    pub monthly_rate: Decimal,
    pub monthly_yield: Decimal,
    pub annual_yield: Decimal,
    pub monthly_potential: Decimal,
    pub annual_potential: Decimal,
    pub final_net_worth: Decimal,
    pub schedule: Vec<GoalRow>,
}

impl GoalProjection {
    pub fn start_was_substituted(&self) -> bool {
        self.resolved_start != self.requested_start
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateInterval {
    pub valid_from: NaiveDate,
    /// Open interval when absent: still in effect.
    pub valid_to: Option<NaiveDate>,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    Reference {
        valid_from: NaiveDate,
        valid_to: Option<NaiveDate>,
    },
    Manual,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSelection {
    pub annual_rate: Decimal,
    pub source: RateSource,
}

impl RateSelection {
    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Fallback
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub period_count: usize,
    pub institutions: Vec<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionRow {
    pub date: NaiveDate,
    pub balances: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionShare {
    pub institution: String,
    pub value: Decimal,
    pub share: Option<Decimal>,
}
