// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::RateSource;
use crate::rates;
use crate::utils::{http_client, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", sub)) => fetch(cfg, sub)?,
        Some(("lookup", sub)) => lookup(cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn fetch(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let client = http_client(cfg.http_timeout_secs)?;
    let table = rates::fetch_history(&client, &cfg.rates_url)
        .with_context(|| format!("Fetch reference rates from {}", cfg.rates_url))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &table.intervals)? {
        return Ok(());
    }
    let mut data: Vec<Vec<String>> = table
        .intervals
        .iter()
        .map(|i| {
            vec![
                i.valid_from.to_string(),
                i.valid_to.map(|d| d.to_string()).unwrap_or_else(|| "open".into()),
                format!("{}", i.rate),
            ]
        })
        .collect();
    data.reverse();
    data.truncate(50);
    println!("{}", pretty_table(&["From", "To", "Rate %"], data));
    Ok(())
}

fn lookup(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").context("--date is required")?)?;
    let today = Utc::now().date_naive();
    let selection = super::goal::resolve_rate(cfg, sub, date, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &selection)? {
        return Ok(());
    }
    let source = match &selection.source {
        RateSource::Reference {
            valid_from,
            valid_to,
        } => format!(
            "reference {} .. {}",
            valid_from,
            valid_to.map(|d| d.to_string()).unwrap_or_else(|| "open".into())
        ),
        RateSource::Manual => "manual".into(),
        RateSource::Fallback => "fallback default".into(),
    };
    println!("{}: {}% ({})", date, selection.annual_rate, source);
    Ok(())
}
