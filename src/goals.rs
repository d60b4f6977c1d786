// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Twelve-month savings-goal projection on top of the period table.

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{GoalParams, GoalProjection, GoalRow, PeriodAggregate, StartResolution};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

pub const SCHEDULE_MONTHS: u32 = 12;

/// Map a requested start date onto a ledger date.
///
/// Exact match first, then the latest date in the same calendar month, then
/// the earliest date of the whole series.
pub fn resolve_start(
    requested: NaiveDate,
    stats: &[PeriodAggregate],
) -> AnalysisResult<(NaiveDate, StartResolution)> {
    if stats.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    if stats.iter().any(|p| p.date == requested) {
        return Ok((requested, StartResolution::Exact));
    }
    let same_month = stats
        .iter()
        .filter(|p| p.date.year() == requested.year() && p.date.month() == requested.month())
        .map(|p| p.date)
        .max();
    if let Some(date) = same_month {
        log::info!("start date {} not in ledger, using {} from the same month", requested, date);
        return Ok((date, StartResolution::LatestInMonth));
    }
    let earliest = stats
        .iter()
        .map(|p| p.date)
        .min()
        .ok_or(AnalysisError::EmptySeries)?;
    log::info!(
        "no ledger dates in {}, falling back to earliest date {}",
        requested.format("%Y-%m"),
        earliest
    );
    Ok((earliest, StartResolution::EarliestInSeries))
}

/// Geometric monthly equivalent of an annual percentage rate.
pub fn monthly_rate(annual_pct: Decimal) -> AnalysisResult<Decimal> {
    let invalid = || AnalysisError::InvalidRate(annual_pct.to_string());
    let base = annual_pct
        .to_f64()
        .map(|a| 1.0 + a / 100.0)
        .filter(|b| *b > 0.0)
        .ok_or_else(invalid)?;
    let m = base.powf(1.0 / 12.0) - 1.0;
    Decimal::try_from(m).map_err(|_| invalid())
}

pub fn suggested_final_net_worth(starting_balance: Decimal, goal_amount: Decimal) -> Decimal {
    starting_balance + goal_amount
}

pub fn add_months(date: NaiveDate, months: u32) -> AnalysisResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or(AnalysisError::DateOutOfRange(date, months))
}

fn pct(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    numerator
        .checked_div(denominator)
        .map(|r| (r * Decimal::ONE_HUNDRED).round_dp(1))
}

/// Year-month -> value of the latest ledger date in that month.
fn values_by_month(stats: &[PeriodAggregate]) -> BTreeMap<String, Decimal> {
    let mut out = BTreeMap::new();
    let mut ordered: Vec<&PeriodAggregate> = stats.iter().collect();
    ordered.sort_by_key(|p| p.date);
    for p in ordered {
        out.insert(p.year_month(), p.value);
    }
    out
}

pub fn build_schedule(
    start: NaiveDate,
    starting_balance: Decimal,
    goal_amount: Decimal,
    final_net_worth: Decimal,
    stats: &[PeriodAggregate],
) -> AnalysisResult<Vec<GoalRow>> {
    let actuals = values_by_month(stats);
    let step = (goal_amount / Decimal::from(SCHEDULE_MONTHS)).round_dp(2);
    let goal_defined = !goal_amount.is_zero();

    (1..=SCHEDULE_MONTHS)
        .map(|i| {
            let reference_period = add_months(start, i)?.format("%Y-%m").to_string();
            let monthly_goal = starting_balance + step * Decimal::from(i);
            let expected_attainment = if goal_defined {
                monthly_goal.checked_div(goal_amount)
            } else {
                None
            };
            let actual_value = actuals.get(&reference_period).copied();
            let attainment_pct = actual_value
                .filter(|_| goal_defined)
                .and_then(|v| pct(v, monthly_goal));
            let attainment_year_pct = actual_value.and_then(|v| pct(v, final_net_worth));
            Ok(GoalRow {
                reference_period,
                monthly_goal,
                expected_attainment,
                actual_value,
                attainment_pct,
                attainment_year_pct,
            })
        })
        .collect()
}

pub fn project(params: &GoalParams, stats: &[PeriodAggregate]) -> AnalysisResult<GoalProjection> {
    let resolved = resolve_start(params.start_date, stats)?;
    project_resolved(params, resolved, stats)
}

/// Projection for a start date already passed through [`resolve_start`].
pub fn project_resolved(
    params: &GoalParams,
    (resolved_start, resolution): (NaiveDate, StartResolution),
    stats: &[PeriodAggregate],
) -> AnalysisResult<GoalProjection> {
    let starting_balance = stats
        .iter()
        .find(|p| p.date == resolved_start)
        .map(|p| p.value)
        .ok_or(AnalysisError::EmptySeries)?;

    let monthly_rate = monthly_rate(params.annual_rate)?;
    let annual_fraction = params.annual_rate / Decimal::ONE_HUNDRED;
    let monthly_yield = starting_balance * monthly_rate;
    let annual_yield = starting_balance * annual_fraction;
    let net_savings = params.net_income - params.fixed_costs;
    let monthly_potential = net_savings + monthly_yield;
    let annual_potential = Decimal::from(SCHEDULE_MONTHS) * net_savings + annual_yield;

    let final_net_worth = params
        .final_net_worth
        .unwrap_or_else(|| suggested_final_net_worth(starting_balance, params.goal_amount));
    if final_net_worth < starting_balance {
        log::warn!(
            "final net worth {} is below the starting balance {}",
            final_net_worth,
            starting_balance
        );
    }

    let schedule = build_schedule(
        resolved_start,
        starting_balance,
        params.goal_amount,
        final_net_worth,
        stats,
    )?;

    Ok(GoalProjection {
        requested_start: params.start_date,
        resolved_start,
        resolution,
        starting_balance,
        annual_rate: params.annual_rate,
        monthly_rate,
        monthly_yield,
        annual_yield,
        monthly_potential,
        annual_potential,
        final_net_worth,
        schedule,
    })
}
