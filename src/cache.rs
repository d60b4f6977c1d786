// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Memoization for repeated analyses over the same ledger.
//!
//! Both engines are pure, so results are keyed only by input fingerprints:
//! the record set for statistics, and the period table plus every goal
//! parameter for projections.

use crate::error::AnalysisResult;
use crate::goals;
use crate::models::{BalanceRecord, GoalParams, GoalProjection, PeriodAggregate};
use crate::stats;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fingerprint of a record set; row order does not change it.
pub fn records_fingerprint(records: &[BalanceRecord]) -> u64 {
    let mut sorted: Vec<&BalanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (a.date, &a.institution, a.value).cmp(&(b.date, &b.institution, b.value))
    });
    let mut h = DefaultHasher::new();
    sorted.len().hash(&mut h);
    for r in sorted {
        r.date.hash(&mut h);
        r.institution.hash(&mut h);
        // normalize so 10 and 10.00 collide
        r.value.normalize().hash(&mut h);
    }
    h.finish()
}

pub fn stats_fingerprint(periods: &[PeriodAggregate]) -> u64 {
    let mut h = DefaultHasher::new();
    periods.len().hash(&mut h);
    for p in periods {
        p.date.hash(&mut h);
        p.value.normalize().hash(&mut h);
    }
    h.finish()
}

#[derive(Debug, Default)]
pub struct AnalysisCache {
    stats: HashMap<u64, Vec<PeriodAggregate>>,
    projections: HashMap<(u64, GoalParams), GoalProjection>,

    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&mut self, records: &[BalanceRecord]) -> Vec<PeriodAggregate> {
        let key = records_fingerprint(records);
        if let Some(hit) = self.stats.get(&key) {
            self.cache_hits += 1;
            log::debug!("stats cache hit {:016x}", key);
            return hit.clone();
        }
        self.cache_misses += 1;
        let computed = stats::compute(records);
        self.stats.insert(key, computed.clone());
        computed
    }

    /// Errors are returned as-is and never stored.
    pub fn projection(
        &mut self,
        params: &GoalParams,
        periods: &[PeriodAggregate],
    ) -> AnalysisResult<GoalProjection> {
        let key = (stats_fingerprint(periods), params.clone());
        if let Some(hit) = self.projections.get(&key) {
            self.cache_hits += 1;
            log::debug!("projection cache hit {:016x}", key.0);
            return Ok(hit.clone());
        }
        self.cache_misses += 1;
        let computed = goals::project(params, periods)?;
        self.projections.insert(key, computed.clone());
        Ok(computed)
    }

    pub fn clear(&mut self) {
        self.stats.clear();
        self.projections.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    pub fn len(&self) -> usize {
        self.stats.len() + self.projections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.projections.is_empty()
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
