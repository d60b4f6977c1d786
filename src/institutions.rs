// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BalanceRecord, InstitutionRow, InstitutionShare};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Date x institution table. Repeated entries for the same pair are averaged.
pub fn pivot_by_institution(records: &[BalanceRecord]) -> Vec<InstitutionRow> {
    let mut acc: BTreeMap<NaiveDate, BTreeMap<String, (Decimal, u32)>> = BTreeMap::new();
    for r in records {
        let slot = acc
            .entry(r.date)
            .or_default()
            .entry(r.institution.clone())
            .or_insert((Decimal::ZERO, 0));
        slot.0 += r.value;
        slot.1 += 1;
    }
    acc.into_iter()
        .map(|(date, per_inst)| InstitutionRow {
            date,
            balances: per_inst
                .into_iter()
                .map(|(name, (sum, n))| (name, sum / Decimal::from(n)))
                .collect(),
        })
        .collect()
}

/// Each institution's part of the total on `date`, largest first.
pub fn shares_at(records: &[BalanceRecord], date: NaiveDate) -> Vec<InstitutionShare> {
    let mut per_inst: HashMap<String, Decimal> = HashMap::new();
    for r in records.iter().filter(|r| r.date == date) {
        *per_inst.entry(r.institution.clone()).or_insert(Decimal::ZERO) += r.value;
    }
    let total: Decimal = per_inst.values().sum();
    let mut items: Vec<InstitutionShare> = per_inst
        .into_iter()
        .map(|(institution, value)| InstitutionShare {
            institution,
            value,
            share: if total.is_zero() {
                None
            } else {
                value.checked_div(total)
            },
        })
        .collect();
    items.sort_by(|a, b| b.value.cmp(&a.value).then(a.institution.cmp(&b.institution)));
    items
}
