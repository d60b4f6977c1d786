// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::institutions::{pivot_by_institution, shares_at};
use crate::utils::{fmt_opt, fmt_pct, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use std::collections::BTreeSet;

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records = super::load_ledger(cfg, sub)?;

    if let Some(raw) = sub.get_one::<String>("date") {
        let date = parse_date(raw)?;
        let shares = shares_at(&records, date);
        if maybe_print_json(json_flag, jsonl_flag, &shares)? {
            return Ok(());
        }
        if shares.is_empty() {
            println!("No balances recorded on {}", date);
            return Ok(());
        }
        let data = shares
            .iter()
            .map(|s| {
                vec![
                    s.institution.clone(),
                    format!("{:.2}", s.value.round_dp(2)),
                    fmt_pct(s.share),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Institution", "Value", "Share"], data));
        return Ok(());
    }

    let pivot = pivot_by_institution(&records);
    if maybe_print_json(json_flag, jsonl_flag, &pivot)? {
        return Ok(());
    }
    let names: BTreeSet<&String> = pivot.iter().flat_map(|r| r.balances.keys()).collect();
    let mut headers: Vec<&str> = vec!["Date"];
    headers.extend(names.iter().map(|s| s.as_str()));
    let data = pivot
        .iter()
        .map(|row| {
            let mut out = vec![row.date.format("%d/%m/%Y").to_string()];
            for n in &names {
                out.push(fmt_opt(row.balances.get(*n).copied(), 2));
            }
            out
        })
        .collect();
    println!("{}", pretty_table(&headers, data));
    Ok(())
}
