// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rolling statistics over the date-aggregated balance series.
//!
//! Windows are trailing and counted in periods (ledger dates), not calendar
//! months. A window uses whatever history exists, down to a single period, so
//! early rows still carry a signal. Missing deltas are skipped, never read as 0.

use crate::models::{BalanceRecord, PeriodAggregate, WINDOWS, WindowStats};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum all institutions per date. The map keeps dates ascending.
/// A total past the `Decimal` range saturates.
pub fn aggregate_by_date(records: &[BalanceRecord]) -> BTreeMap<NaiveDate, Decimal> {
    let mut out: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for r in records {
        let total = out.entry(r.date).or_insert(Decimal::ZERO);
        let current = *total;
        *total = current.checked_add(r.value).unwrap_or_else(|| {
            log::warn!("balance total on {} overflowed, saturating", r.date);
            current.saturating_add(r.value)
        });
    }
    out
}

/// Populated values of `series` in the trailing window of `size` periods
/// ending at index `end` (inclusive).
pub fn trailing_window(series: &[Option<Decimal>], end: usize, size: usize) -> Vec<Decimal> {
    let size = size.max(1);
    let start = (end + 1).saturating_sub(size);
    series[start..=end].iter().flatten().copied().collect()
}

/// Missing for an empty window or a sum past the `Decimal` range.
pub fn trailing_mean(window: &[Decimal]) -> Option<Decimal> {
    if window.is_empty() {
        return None;
    }
    let sum = window
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(window.len()))
}

/// Last minus first; 0 with fewer than two points or on overflow.
pub fn trailing_abs_trend(window: &[Decimal]) -> Decimal {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() > 1 => {
            last.checked_sub(*first).unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Last over first, minus one; 0 with fewer than two points or a zero start.
pub fn trailing_rel_trend(window: &[Decimal]) -> Decimal {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() > 1 && !first.is_zero() => last
            .checked_div(*first)
            .and_then(|r| r.checked_sub(Decimal::ONE))
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn relative_change(value: Decimal, lag: Decimal) -> Option<Decimal> {
    if lag.is_zero() {
        return None;
    }
    value.checked_div(lag)?.checked_sub(Decimal::ONE)
}

/// Build the period table from raw records. Input order does not matter.
pub fn compute(records: &[BalanceRecord]) -> Vec<PeriodAggregate> {
    let periods: Vec<(NaiveDate, Decimal)> = aggregate_by_date(records).into_iter().collect();

    let mut abs_deltas: Vec<Option<Decimal>> = Vec::with_capacity(periods.len());
    let mut rel_deltas: Vec<Option<Decimal>> = Vec::with_capacity(periods.len());
    for (i, (_, value)) in periods.iter().enumerate() {
        if i == 0 {
            abs_deltas.push(None);
            rel_deltas.push(None);
        } else {
            let lag = periods[i - 1].1;
            abs_deltas.push(value.checked_sub(lag));
            rel_deltas.push(relative_change(*value, lag));
        }
    }

    let rows: Vec<PeriodAggregate> = periods
        .iter()
        .enumerate()
        .map(|(i, (date, value))| {
            let windows = WINDOWS
                .iter()
                .map(|&w| {
                    let abs = trailing_window(&abs_deltas, i, w);
                    let rel = trailing_window(&rel_deltas, i, w);
                    WindowStats {
                        window: w,
                        mean_abs_delta: trailing_mean(&abs),
                        trend_abs: trailing_abs_trend(&abs),
                        trend_rel: trailing_rel_trend(&rel),
                    }
                })
                .collect();
            PeriodAggregate {
                date: *date,
                value: *value,
                absolute_delta: abs_deltas[i],
                relative_delta: rel_deltas[i],
                windows,
            }
        })
        .collect();

    log::debug!(
        "computed {} periods from {} records",
        rows.len(),
        records.len()
    );
    rows
}
