// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::rates::{DEFAULT_ANNUAL_RATE, DEFAULT_RATES_URL};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Wealthtrack", "wealthtrack"));

pub const ENV_RATES_URL: &str = "WEALTHTRACK_RATES_URL";
pub const ENV_DEFAULT_RATE: &str = "WEALTHTRACK_DEFAULT_RATE";
pub const ENV_HTTP_TIMEOUT: &str = "WEALTHTRACK_HTTP_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rates_url: String,
    /// Annual percent used when no reference rate applies.
    pub default_annual_rate: Decimal,
    pub http_timeout_secs: u64,
    /// Ledger CSV field separator.
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            default_annual_rate: DEFAULT_ANNUAL_RATE,
            http_timeout_secs: 15,
            delimiter: ',',
        }
    }
}

impl Config {
    /// Config file if present, then environment overrides.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Parse config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn apply_env<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = get(ENV_RATES_URL) {
            self.rates_url = url;
        }
        if let Some(rate) = get(ENV_DEFAULT_RATE) {
            self.default_annual_rate = rate
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("Invalid {} '{}'", ENV_DEFAULT_RATE, rate))?;
        }
        if let Some(secs) = get(ENV_HTTP_TIMEOUT) {
            self.http_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", ENV_HTTP_TIMEOUT, secs))?;
        }
        Ok(())
    }

    /// Non-ASCII delimiters cannot drive the CSV reader; `,` is used instead.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!(
                "configured delimiter '{}' is not ASCII, using ','",
                self.delimiter
            );
            b','
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}
