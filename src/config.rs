// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "spendlog=warn";

#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit database file; falls back to the platform data dir.
    pub database_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_path: env::var("SPENDLOG_DATABASE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_filter: env::var("SPENDLOG_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}
