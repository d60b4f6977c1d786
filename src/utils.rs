// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

const UA: &str = concat!("wealthtrack/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

static ISO_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:[T ].*)?$").unwrap());
static DAY_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})(?:[T ].*)?$").unwrap());

/// Date from a `YYYY-MM-DD` prefix, ignoring any time part.
pub fn parse_iso_prefix(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    s.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Best-effort date detection for values that match no fixed format.
pub fn detect_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let ymd = |y: &str, m: &str, d: &str| -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
    };
    if let Some(c) = ISO_LIKE.captures(s) {
        return ymd(&c[1], &c[2], &c[3]);
    }
    if let Some(c) = DAY_FIRST.captures(s) {
        return ymd(&c[3], &c[2], &c[1]);
    }
    None
}

/// Ledger amounts: plain decimals, or comma-decimal with `.` thousands and an
/// optional `R$` prefix.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(d) = cleaned.parse::<Decimal>() {
        return Some(d);
    }
    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(p)) if p > c => cleaned.replace(',', ""),
        (Some(_), _) => cleaned.replace('.', "").replace(',', "."),
        _ => return None,
    };
    normalized.parse::<Decimal>().ok()
}

pub fn fmt_opt(d: Option<Decimal>, dp: u32) -> String {
    d.map(|v| format!("{:.*}", dp as usize, v.round_dp(dp)))
        .unwrap_or_else(|| "—".to_string())
}

pub fn fmt_pct(d: Option<Decimal>) -> String {
    d.map(|v| format!("{:.2}%", (v * Decimal::ONE_HUNDRED).round_dp(2)))
        .unwrap_or_else(|| "—".to_string())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
