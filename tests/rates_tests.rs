// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wealthtrack::models::{RateInterval, RateSource};
use wealthtrack::rates::{self, DEFAULT_ANNUAL_RATE, RateTable};
use wealthtrack::AnalysisError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn table() -> RateTable {
    let csv = "valid_from,valid_to,rate\n\
               2023-08-03,2023-09-20,13.25\n\
               2023-09-21,2023-11-01,12.75\n\
               2023-11-02,2023-12-13,12.25\n\
               2023-12-14,,11.75\n";
    rates::load_rate_table(csv.as_bytes()).unwrap()
}

#[test]
fn lookup_picks_covering_interval() {
    let sel = table().select(date(2023, 10, 10), date(2024, 1, 1), DEFAULT_ANNUAL_RATE);
    assert_eq!(sel.annual_rate, Decimal::new(1275, 2));
    assert!(!sel.is_fallback());
}

#[test]
fn interval_bounds_are_inclusive() {
    let t = table();
    let today = date(2024, 1, 1);
    assert_eq!(t.find(date(2023, 9, 20), today).unwrap().rate, Decimal::new(1325, 2));
    assert_eq!(t.find(date(2023, 9, 21), today).unwrap().rate, Decimal::new(1275, 2));
}

#[test]
fn open_interval_runs_until_today() {
    let t = table();
    let sel = t.select(date(2023, 12, 31), date(2024, 1, 1), DEFAULT_ANNUAL_RATE);
    assert_eq!(
        sel.source,
        RateSource::Reference {
            valid_from: date(2023, 12, 14),
            valid_to: None
        }
    );
    assert!(t.find(date(2024, 3, 1), date(2024, 1, 1)).is_none());
}

#[test]
fn date_before_history_falls_back() {
    let sel = table().select(date(2020, 1, 1), date(2024, 1, 1), DEFAULT_ANNUAL_RATE);
    assert!(sel.is_fallback());
    assert_eq!(sel.annual_rate, Decimal::new(1075, 2));
}

#[test]
fn failed_fetch_falls_back_without_error() {
    let failed: Result<RateTable, AnalysisError> = Err(AnalysisError::EmptySeries);
    let sel = rates::select_or_default(failed, date(2024, 1, 1), date(2024, 1, 1), Decimal::from(9));
    assert_eq!(sel.source, RateSource::Fallback);
    assert_eq!(sel.annual_rate, Decimal::from(9));
}

#[test]
fn overlapping_intervals_prefer_latest_start() {
    let t = RateTable::new(vec![
        RateInterval {
            valid_from: date(2024, 1, 1),
            valid_to: Some(date(2024, 12, 31)),
            rate: Decimal::from(10),
        },
        RateInterval {
            valid_from: date(2024, 6, 1),
            valid_to: Some(date(2024, 6, 30)),
            rate: Decimal::from(11),
        },
    ]);
    let today = date(2025, 1, 1);
    assert_eq!(t.find(date(2024, 6, 15), today).unwrap().rate, Decimal::from(11));
    assert_eq!(t.find(date(2024, 7, 15), today).unwrap().rate, Decimal::from(10));
}

#[test]
fn history_json_parses_published_shape() {
    let body = r#"{"conteudo":[
        {"DataInicioVigencia":"2024-05-09T00:00:00","DataFimVigencia":"2024-06-19T00:00:00","MetaSelic":10.5},
        {"DataInicioVigencia":"2024-06-20T00:00:00","DataFimVigencia":null,"MetaSelic":10.5}
    ]}"#;
    let t = rates::parse_history_json(body).unwrap();
    assert_eq!(t.intervals.len(), 2);
    assert_eq!(t.intervals[0].valid_to, Some(date(2024, 6, 19)));
    assert_eq!(t.intervals[1].valid_to, None);
    assert_eq!(t.intervals[1].rate, Decimal::new(105, 1));
}

#[test]
fn bad_rate_row_is_reported() {
    let csv = "valid_from,valid_to,rate\n2024-01-01,,ten\n";
    match rates::load_rate_table(csv.as_bytes()) {
        Err(AnalysisError::InvalidValue { row, .. }) => assert_eq!(row, 1),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_history_json_is_a_json_error() {
    let err = rates::parse_history_json(r#"{"conteudo": "nope"}"#).unwrap_err();
    assert!(matches!(err, AnalysisError::Json(_)), "got {err:?}");
}
