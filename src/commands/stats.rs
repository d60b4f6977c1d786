// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::{PeriodAggregate, WINDOWS};
use crate::stats;
use crate::utils::{fmt_opt, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let rows = query_rows(cfg, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let mut headers: Vec<String> = vec!["Date".into(), "Value".into(), "Δ abs".into(), "Δ rel".into()];
    for w in WINDOWS {
        headers.push(format!("Mean {}P", w));
        headers.push(format!("Trend {}P", w));
        headers.push(format!("Trend rel {}P", w));
    }
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    let data = rows.iter().map(display_row).collect();
    println!("{}", pretty_table(&header_refs, data));
    Ok(())
}

/// Period table, optionally cut to the most recent `--last` rows.
pub fn query_rows(cfg: &Config, sub: &clap::ArgMatches) -> Result<Vec<PeriodAggregate>> {
    let records = super::load_ledger(cfg, sub)?;
    let mut rows = stats::compute(&records);
    if let Some(&last) = sub.get_one::<usize>("last") {
        let skip = rows.len().saturating_sub(last);
        rows.drain(..skip);
    }
    Ok(rows)
}

fn display_row(p: &PeriodAggregate) -> Vec<String> {
    let mut out = vec![
        p.date.format("%d/%m/%Y").to_string(),
        format!("{:.2}", p.value.round_dp(2)),
        fmt_opt(p.absolute_delta, 2),
        fmt_pct(p.relative_delta),
    ];
    for w in WINDOWS {
        match p.window(w) {
            Some(ws) => {
                out.push(fmt_opt(ws.mean_abs_delta, 2));
                out.push(fmt_opt(Some(ws.trend_abs), 2));
                out.push(fmt_pct(Some(ws.trend_rel)));
            }
            None => out.extend(std::iter::repeat_n("—".to_string(), 3)),
        }
    }
    out
}
