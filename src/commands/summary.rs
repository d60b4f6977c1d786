// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::ingest::summarize;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let records = super::load_ledger(cfg, sub)?;
    let summary = summarize(&records);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    let range = match (summary.first_date, summary.last_date) {
        (Some(a), Some(b)) => format!("{} .. {}", a.format("%d/%m/%Y"), b.format("%d/%m/%Y")),
        _ => "—".to_string(),
    };
    let rows = vec![
        vec!["Records".to_string(), summary.record_count.to_string()],
        vec!["Periods".to_string(), summary.period_count.to_string()],
        vec![
            "Institutions".to_string(),
            format!("{} ({})", summary.institutions.len(), summary.institutions.join(", ")),
        ],
        vec!["Range".to_string(), range],
    ];
    println!("{}", pretty_table(&["", "Value"], rows));
    Ok(())
}
