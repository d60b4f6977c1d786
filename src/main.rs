// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use wealthtrack::{cli, commands, config::Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = Config::load()?;

    match matches.subcommand() {
        Some(("summary", sub)) => commands::summary::handle(&cfg, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&cfg, sub)?,
        Some(("institutions", sub)) => commands::institutions::handle(&cfg, sub)?,
        Some(("goal", sub)) => commands::goal::handle(&cfg, sub)?,
        Some(("rates", sub)) => commands::rates::handle(&cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&cfg, sub)?,
        Some(("config", sub)) => commands::config::handle(&cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
