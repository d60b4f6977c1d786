// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn ledger_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .long("path")
            .required(true)
            .help("Ledger CSV with Data, Valor and Instituição columns"),
    )
    .arg(
        Arg::new("delimiter")
            .long("delimiter")
            .help("Field separator (defaults to the configured one)"),
    )
}

fn goal_args(cmd: Command) -> Command {
    ledger_args(cmd)
        .arg(
            Arg::new("start")
                .long("start")
                .required(true)
                .help("Goal start date YYYY-MM-DD"),
        )
        .arg(
            Arg::new("goal")
                .long("goal")
                .required(true)
                .help("Amount to save over twelve months"),
        )
        .arg(
            Arg::new("fixed-costs")
                .long("fixed-costs")
                .default_value("0")
                .help("Monthly fixed costs"),
        )
        .arg(
            Arg::new("net-income")
                .long("net-income")
                .default_value("0")
                .help("Monthly net income"),
        )
        .arg(
            Arg::new("final")
                .long("final")
                .help("Expected net worth after the goal (default: start + goal)"),
        )
        .arg(
            Arg::new("rate")
                .long("rate")
                .help("Annual rate in percent; skips the reference lookup"),
        )
        .arg(
            Arg::new("rates-file")
                .long("rates-file")
                .help("CSV of valid_from,valid_to,rate used instead of fetching"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .action(ArgAction::SetTrue)
                .help("Never fetch reference rates"),
        )
}

fn last_arg() -> Arg {
    Arg::new("last")
        .long("last")
        .value_parser(value_parser!(usize))
        .help("Only keep the most recent N periods")
}

pub fn build_cli() -> Command {
    Command::new("wealthtrack")
        .version(clap::crate_version!())
        .about("Rolling net-worth statistics and savings-goal projections")
        .subcommand_required(false)
        .subcommand(json_flags(ledger_args(
            Command::new("summary").about("Records, periods and institutions in a ledger"),
        )))
        .subcommand(json_flags(
            ledger_args(Command::new("stats").about("Per-period deltas and rolling windows"))
                .arg(last_arg()),
        ))
        .subcommand(json_flags(
            ledger_args(Command::new("institutions").about("Balances by institution")).arg(
                Arg::new("date")
                    .long("date")
                    .help("Show each institution's share on this date"),
            ),
        ))
        .subcommand(json_flags(goal_args(
            Command::new("goal").about("Twelve-month goal schedule"),
        )))
        .subcommand(
            Command::new("rates")
                .about("Reference interest rates")
                .subcommand(json_flags(
                    Command::new("fetch").about("Download the reference rate history"),
                ))
                .subcommand(json_flags(
                    Command::new("lookup")
                        .about("Rate in effect on a date")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("rate").long("rate"))
                        .arg(Arg::new("rates-file").long("rates-file"))
                        .arg(
                            Arg::new("offline")
                                .long("offline")
                                .action(ArgAction::SetTrue),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write raw results to a file")
                .subcommand(
                    ledger_args(Command::new("stats"))
                        .arg(last_arg())
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    goal_args(Command::new("goal"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Configuration")
                .subcommand(json_flags(Command::new("show"))),
        )
}
