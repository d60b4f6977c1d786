// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod summary;
pub mod stats;
pub mod institutions;
pub mod goal;
pub mod rates;
pub mod exporter;
pub mod config;

use crate::config::Config;
use crate::ingest;
use crate::models::BalanceRecord;
use anyhow::{Context, Result};

pub(crate) fn delimiter_for(cfg: &Config, sub: &clap::ArgMatches) -> u8 {
    sub.get_one::<String>("delimiter")
        .and_then(|s| s.bytes().next())
        .unwrap_or_else(|| cfg.delimiter_byte())
}

/// Read and validate the ledger named by `--path`.
pub fn load_ledger(cfg: &Config, sub: &clap::ArgMatches) -> Result<Vec<BalanceRecord>> {
    let path = sub
        .get_one::<String>("path")
        .context("--path is required")?
        .trim();
    ingest::load_records_from_path(path, delimiter_for(cfg, sub))
        .with_context(|| format!("Load ledger {}", path))
}
