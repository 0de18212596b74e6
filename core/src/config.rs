/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Creator Earnings Estimator.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Rate table overrides.
//!
//! Hosts run on the built-in table unless `CREATOR_EARNINGS_RATES` names a
//! JSON file in the `RateTable` override format. A named file that cannot be
//! read or fails validation is an error, never a silent fallback.

use crate::rates::RateTable;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming a rate table override file.
pub const RATES_PATH_ENV: &str = "CREATOR_EARNINGS_RATES";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rate table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rate table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read, parse and validate a rate table override file.
pub fn load_rate_table(path: &Path) -> Result<RateTable, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = RateTable::from_json_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), platforms = table.len(), "Rate table loaded");
    Ok(table)
}

/// Resolve the active rate table from the environment.
pub fn rate_table_from_env() -> Result<RateTable, ConfigError> {
    rate_table_from_override(std::env::var_os(RATES_PATH_ENV).map(PathBuf::from).as_deref())
}

/// Load `path` if given (and non-empty), otherwise clone the built-in table.
pub fn rate_table_from_override(path: Option<&Path>) -> Result<RateTable, ConfigError> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => match load_rate_table(path) {
            Ok(table) => Ok(table),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Rate table override rejected");
                Err(e)
            }
        },
        _ => {
            debug!("Using built-in rate table");
            Ok(RateTable::builtin().clone())
        }
    }
}
