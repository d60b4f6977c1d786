// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::{GoalRow, PeriodAggregate, WINDOWS};
use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("stats", sub)) => export_stats(cfg, sub),
        Some(("goal", sub)) => export_goal(cfg, sub),
        _ => Ok(()),
    }
}

/// Trailing zeros dropped so equal values always export the same text.
fn raw(d: Option<Decimal>) -> String {
    d.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn stats_header() -> Vec<String> {
    let mut h: Vec<String> = ["date", "value", "absolute_delta", "relative_delta"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for w in WINDOWS {
        h.push(format!("mean_abs_delta_{}", w));
        h.push(format!("trend_abs_{}", w));
        h.push(format!("trend_rel_{}", w));
    }
    h
}

fn stats_record(p: &PeriodAggregate) -> Vec<String> {
    let mut r = vec![
        p.date.to_string(),
        raw(Some(p.value)),
        raw(p.absolute_delta),
        raw(p.relative_delta),
    ];
    for w in WINDOWS {
        let ws = p.window(w);
        r.push(raw(ws.and_then(|s| s.mean_abs_delta)));
        r.push(raw(ws.map(|s| s.trend_abs)));
        r.push(raw(ws.map(|s| s.trend_rel)));
    }
    r
}

fn goal_record(g: &GoalRow) -> Vec<String> {
    vec![
        g.reference_period.clone(),
        raw(Some(g.monthly_goal)),
        raw(g.expected_attainment),
        raw(g.actual_value),
        raw(g.attainment_pct),
        raw(g.attainment_year_pct),
    ]
}

fn export_stats(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").context("--format")?.to_lowercase();
    let out = sub.get_one::<String>("out").context("--out is required")?;
    let rows = super::stats::query_rows(cfg, sub)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(stats_header())?;
            for p in &rows {
                wtr.write_record(stats_record(p))?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported {} periods to {}", rows.len(), out);
    Ok(())
}

fn export_goal(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").context("--format")?.to_lowercase();
    let out = sub.get_one::<String>("out").context("--out is required")?;
    let report = super::goal::build_report(cfg, sub, Utc::now().date_naive())?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "reference_period",
                "monthly_goal",
                "expected_attainment",
                "actual_value",
                "attainment_pct",
                "attainment_year_pct",
            ])?;
            for g in &report.projection.schedule {
                wtr.write_record(goal_record(g))?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&report)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    if report.projection.start_was_substituted() {
        println!(
            "Start date {} resolved to {}",
            report.projection.requested_start, report.projection.resolved_start
        );
    }
    println!("Exported goal schedule to {}", out);
    Ok(())
}
