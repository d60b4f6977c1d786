// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io::Write;
use tempfile::NamedTempFile;
use wealthtrack::commands::goal;
use wealthtrack::config::Config;
use wealthtrack::models::{BalanceRecord, GoalParams, RateSource, StartResolution};
use wealthtrack::{AnalysisError, cli, goals, stats};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rec(y: i32, m: u32, d: u32, value: i64) -> BalanceRecord {
    BalanceRecord {
        date: date(y, m, d),
        value: Decimal::from(value),
        institution: "Bank".to_string(),
    }
}

fn ledger() -> Vec<BalanceRecord> {
    vec![
        rec(2024, 1, 10, 10_000),
        rec(2024, 1, 31, 12_000),
        rec(2024, 2, 29, 12_500),
        rec(2024, 3, 31, 13_400),
        rec(2024, 4, 15, 13_000),
        rec(2024, 4, 30, 14_000),
    ]
}

fn params(start: NaiveDate, goal_amount: i64) -> GoalParams {
    GoalParams {
        start_date: start,
        fixed_costs: Decimal::from(3_000),
        net_income: Decimal::from(5_000),
        goal_amount: Decimal::from(goal_amount),
        final_net_worth: None,
        annual_rate: Decimal::new(1075, 2),
    }
}

#[test]
fn zero_goal_leaves_attainment_missing() {
    let periods = stats::compute(&ledger());
    let p = goals::project(&params(date(2024, 1, 31), 0), &periods).unwrap();
    assert_eq!(p.schedule.len(), 12);
    for row in &p.schedule {
        assert_eq!(row.expected_attainment, None);
        assert_eq!(row.attainment_pct, None);
        assert_eq!(row.monthly_goal, p.starting_balance);
    }
}

#[test]
fn missing_start_uses_latest_date_in_month() {
    let periods = stats::compute(&ledger());
    let p = goals::project(&params(date(2024, 1, 15), 12_000), &periods).unwrap();
    assert_eq!(p.resolved_start, date(2024, 1, 31));
    assert_eq!(p.resolution, StartResolution::LatestInMonth);
    assert!(p.start_was_substituted());
    assert_eq!(p.starting_balance, Decimal::from(12_000));
}

#[test]
fn start_outside_ledger_months_uses_earliest_date() {
    let periods = stats::compute(&ledger());
    let (resolved, how) = goals::resolve_start(date(2023, 6, 1), &periods).unwrap();
    assert_eq!(resolved, date(2024, 1, 10));
    assert_eq!(how, StartResolution::EarliestInSeries);
}

#[test]
fn projection_accepts_a_resolved_start() {
    let periods = stats::compute(&ledger());
    let prm = params(date(2024, 4, 1), 6_000);
    let resolved = goals::resolve_start(prm.start_date, &periods).unwrap();
    assert_eq!(resolved, (date(2024, 4, 30), StartResolution::LatestInMonth));
    let p = goals::project_resolved(&prm, resolved, &periods).unwrap();
    assert_eq!(p, goals::project(&prm, &periods).unwrap());
    assert_eq!(p.requested_start, date(2024, 4, 1));
    assert_eq!(p.starting_balance, Decimal::from(14_000));
}

#[test]
fn exact_start_is_kept() {
    let periods = stats::compute(&ledger());
    let (resolved, how) = goals::resolve_start(date(2024, 2, 29), &periods).unwrap();
    assert_eq!(resolved, date(2024, 2, 29));
    assert_eq!(how, StartResolution::Exact);
}

#[test]
fn empty_ledger_cannot_project() {
    let err = goals::project(&params(date(2024, 1, 1), 100), &[]).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptySeries));
}

#[test]
fn schedule_joins_actuals_by_month() {
    let periods = stats::compute(&ledger());
    let p = goals::project(&params(date(2024, 1, 31), 12_000), &periods).unwrap();

    let periods_seen: Vec<&str> = p.schedule.iter().map(|r| r.reference_period.as_str()).collect();
    assert_eq!(periods_seen[0], "2024-02");
    assert_eq!(periods_seen[11], "2025-01");

    let feb = &p.schedule[0];
    assert_eq!(feb.monthly_goal, Decimal::from(13_000));
    assert_eq!(feb.actual_value, Some(Decimal::from(12_500)));
    // 12500 / 13000
    assert_eq!(feb.attainment_pct, Some(Decimal::new(962, 1)));
    // 12500 / 24000
    assert_eq!(feb.attainment_year_pct, Some(Decimal::new(521, 1)));

    // April has two balances; the later one counts
    let apr = &p.schedule[2];
    assert_eq!(apr.actual_value, Some(Decimal::from(14_000)));

    let may = &p.schedule[3];
    assert_eq!(may.actual_value, None);
    assert_eq!(may.attainment_pct, None);
    assert_eq!(may.attainment_year_pct, None);

    let last = &p.schedule[11];
    assert_eq!(last.monthly_goal, Decimal::from(24_000));
    assert_eq!(last.expected_attainment, Some(Decimal::from(2)));
}

#[test]
fn yields_and_potentials() {
    let periods = stats::compute(&ledger());
    let p = goals::project(&params(date(2024, 1, 31), 12_000), &periods).unwrap();

    assert_eq!(p.annual_yield, Decimal::from(1_290));
    assert_eq!(p.final_net_worth, Decimal::from(24_000));
    let monthly_yield = p.monthly_yield.to_f64().unwrap();
    assert!((monthly_yield - 12_000.0 * 0.008545071).abs() < 0.01);
    assert_eq!(p.monthly_potential, Decimal::from(2_000) + p.monthly_yield);
    assert_eq!(p.annual_potential, Decimal::from(24_000) + Decimal::from(1_290));
}

#[test]
fn explicit_final_net_worth_is_used() {
    let periods = stats::compute(&ledger());
    let mut prm = params(date(2024, 1, 31), 12_000);
    prm.final_net_worth = Some(Decimal::from(50_000));
    let p = goals::project(&prm, &periods).unwrap();
    assert_eq!(p.final_net_worth, Decimal::from(50_000));
    assert_eq!(p.schedule[0].attainment_year_pct, Some(Decimal::from(25)));
}

#[test]
fn uneven_goal_step_is_rounded_to_cents() {
    let periods = stats::compute(&ledger());
    let p = goals::project(&params(date(2024, 1, 31), 1_000), &periods).unwrap();
    // 1000 / 12 = 83.33
    assert_eq!(p.schedule[0].monthly_goal, Decimal::new(1_208_333, 2));
}

#[test]
fn negative_total_rate_is_rejected() {
    let periods = stats::compute(&ledger());
    let mut prm = params(date(2024, 1, 31), 1_000);
    prm.annual_rate = Decimal::from(-150);
    assert!(matches!(
        goals::project(&prm, &periods),
        Err(AnalysisError::InvalidRate(_))
    ));
}

fn write_ledger() -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(f, "Data,Valor,Instituição").unwrap();
    writeln!(f, "2024-01-31,8000,Banco A").unwrap();
    writeln!(f, "2024-01-31,4000,Corretora").unwrap();
    writeln!(f, "2024-02-29,12500,Banco A").unwrap();
    f
}

#[test]
fn goal_command_with_manual_rate() {
    let ledger = write_ledger();
    let path = ledger.path().to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "wealthtrack", "goal", "--path", &path, "--start", "2024-01-15", "--goal", "12000",
        "--rate", "12",
    ]);
    let Some(("goal", sub)) = matches.subcommand() else {
        panic!("no goal subcommand");
    };
    let report = goal::build_report(&Config::default(), sub, date(2024, 6, 1)).unwrap();
    assert_eq!(report.rate.source, RateSource::Manual);
    assert_eq!(report.projection.annual_rate, Decimal::from(12));
    assert_eq!(report.projection.resolved_start, date(2024, 1, 31));
    assert_eq!(report.projection.resolution, StartResolution::LatestInMonth);
    assert_eq!(report.projection.starting_balance, Decimal::from(12_000));
}

#[test]
fn goal_command_offline_falls_back_to_default_rate() {
    let ledger = write_ledger();
    let path = ledger.path().to_string_lossy().to_string();
    let matches = cli::build_cli().get_matches_from([
        "wealthtrack", "goal", "--path", &path, "--start", "2024-01-31", "--goal", "6000",
        "--offline",
    ]);
    let Some(("goal", sub)) = matches.subcommand() else {
        panic!("no goal subcommand");
    };
    let report = goal::build_report(&Config::default(), sub, date(2024, 6, 1)).unwrap();
    assert!(report.rate.is_fallback());
    assert_eq!(report.projection.annual_rate, Decimal::new(1075, 2));
    assert_eq!(report.projection.schedule.len(), 12);
}

#[test]
fn goal_command_reads_rates_file_for_resolved_date() {
    let ledger = write_ledger();
    let path = ledger.path().to_string_lossy().to_string();
    let mut rates = NamedTempFile::new().unwrap();
    writeln!(rates, "valid_from,valid_to,rate").unwrap();
    writeln!(rates, "2023-12-14,2024-01-31,11.75").unwrap();
    writeln!(rates, "2024-02-01,,11.25").unwrap();
    let rates_path = rates.path().to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "wealthtrack", "goal", "--path", &path, "--start", "2024-01-02", "--goal", "6000",
        "--rates-file", &rates_path,
    ]);
    let Some(("goal", sub)) = matches.subcommand() else {
        panic!("no goal subcommand");
    };
    let report = goal::build_report(&Config::default(), sub, date(2024, 6, 1)).unwrap();
    assert_eq!(report.projection.annual_rate, Decimal::new(1175, 2));
    assert_eq!(
        report.rate.source,
        RateSource::Reference {
            valid_from: date(2023, 12, 14),
            valid_to: Some(date(2024, 1, 31)),
        }
    );
}
