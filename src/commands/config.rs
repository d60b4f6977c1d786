// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, config_path};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("show", sub)) = m.subcommand() {
        if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), cfg)? {
            return Ok(());
        }
        let rows = vec![
            vec!["config file".to_string(), config_path()?.display().to_string()],
            vec!["rates_url".to_string(), cfg.rates_url.clone()],
            vec!["default_annual_rate".to_string(), format!("{}%", cfg.default_annual_rate)],
            vec!["http_timeout_secs".to_string(), cfg.http_timeout_secs.to_string()],
            vec!["delimiter".to_string(), format!("'{}'", cfg.delimiter)],
        ];
        println!("{}", pretty_table(&["Key", "Value"], rows));
    }
    Ok(())
}
