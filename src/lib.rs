// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod goals;
pub mod ingest;
pub mod institutions;
pub mod models;
pub mod rates;
pub mod stats;
pub mod utils;

pub use error::{AnalysisError, AnalysisResult};
