// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::goals;
use crate::models::{GoalParams, GoalProjection, RateSelection, RateSource};
use crate::rates::{self, RateTable};
use crate::stats;
use crate::utils::{fmt_opt, http_client, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GoalReport {
    pub rate: RateSelection,
    pub projection: GoalProjection,
}

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    let report = build_report(cfg, sub, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

/// Reference rate for `date`: `--rate`, then `--rates-file`, then the
/// published history, then the configured fallback.
pub fn resolve_rate(
    cfg: &Config,
    sub: &clap::ArgMatches,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<RateSelection> {
    if let Some(raw) = sub.get_one::<String>("rate") {
        return Ok(RateSelection {
            annual_rate: parse_decimal(raw)?,
            source: RateSource::Manual,
        });
    }
    if let Some(path) = sub.get_one::<String>("rates-file") {
        let table = rates::load_rate_table_from_path(path.trim())
            .with_context(|| format!("Load rates {}", path))?;
        return Ok(table.select(date, today, cfg.default_annual_rate));
    }
    if sub.get_flag("offline") {
        return Ok(RateTable::default().select(date, today, cfg.default_annual_rate));
    }
    let table = http_client(cfg.http_timeout_secs).and_then(|client| {
        rates::fetch_history(&client, &cfg.rates_url).map_err(anyhow::Error::from)
    });
    Ok(rates::select_or_default(table, date, today, cfg.default_annual_rate))
}

pub fn build_report(cfg: &Config, sub: &clap::ArgMatches, today: NaiveDate) -> Result<GoalReport> {
    let records = super::load_ledger(cfg, sub)?;
    let periods = stats::compute(&records);

    let requested = parse_date(sub.get_one::<String>("start").context("--start is required")?)?;
    let resolved = goals::resolve_start(requested, &periods)?;
    let rate = resolve_rate(cfg, sub, resolved.0, today)?;

    let opt_decimal = |name: &str| -> Result<Option<rust_decimal::Decimal>> {
        sub.get_one::<String>(name).map(|s| parse_decimal(s)).transpose()
    };
    let params = GoalParams {
        start_date: requested,
        fixed_costs: opt_decimal("fixed-costs")?.unwrap_or_default(),
        net_income: opt_decimal("net-income")?.unwrap_or_default(),
        goal_amount: opt_decimal("goal")?.unwrap_or_default(),
        final_net_worth: opt_decimal("final")?,
        annual_rate: rate.annual_rate,
    };
    let projection = goals::project_resolved(&params, resolved, &periods)?;
    Ok(GoalReport { rate, projection })
}

fn print_report(report: &GoalReport) {
    let p = &report.projection;
    if p.start_was_substituted() {
        println!(
            "Start date {} has no balance; using {} instead.",
            p.requested_start, p.resolved_start
        );
    }
    let rate_note = match &report.rate.source {
        RateSource::Reference { valid_from, .. } => format!("reference since {}", valid_from),
        RateSource::Manual => "manual".to_string(),
        RateSource::Fallback => "fallback".to_string(),
    };
    let facts = vec![
        vec!["Start".to_string(), p.resolved_start.format("%d/%m/%Y").to_string()],
        vec!["Starting balance".to_string(), format!("{:.2}", p.starting_balance.round_dp(2))],
        vec!["Annual rate".to_string(), format!("{}% ({})", p.annual_rate, rate_note)],
        vec!["Monthly rate".to_string(), format!("{:.6}", p.monthly_rate.round_dp(6))],
        vec!["Monthly yield".to_string(), format!("{:.2}", p.monthly_yield.round_dp(2))],
        vec!["Annual yield".to_string(), format!("{:.2}", p.annual_yield.round_dp(2))],
        vec!["Monthly potential".to_string(), format!("{:.2}", p.monthly_potential.round_dp(2))],
        vec!["Annual potential".to_string(), format!("{:.2}", p.annual_potential.round_dp(2))],
        vec!["Final net worth".to_string(), format!("{:.2}", p.final_net_worth.round_dp(2))],
    ];
    println!("{}", pretty_table(&["", "Value"], facts));

    let data = p
        .schedule
        .iter()
        .map(|r| {
            vec![
                r.reference_period.clone(),
                format!("{:.2}", r.monthly_goal.round_dp(2)),
                fmt_opt(r.expected_attainment, 3),
                fmt_opt(r.actual_value, 2),
                fmt_opt(r.attainment_pct, 1),
                fmt_opt(r.attainment_year_pct, 1),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Period", "Goal", "Expected", "Actual", "Attained %", "Year %"],
            data
        )
    );
}
