// Copyright (c) 2025 Hewa Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Object pool configuration module.
//!
//! Controls which status codes keep a reuse pool and how many released
//! instances each pool may hold.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Status codes pooled by default.
pub const DEFAULT_POOLED_CODES: [u16; 5] = [400, 401, 403, 404, 500];

/// Default number of instances kept per pooled status code.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Largest accepted number of instances per pooled status code.
pub const MAX_POOL_SIZE: usize = 4096;

/// Object pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolConfig {
    /// Whether pooling is enabled at all
    pub enabled: bool,

    /// Maximum number of instances kept per status code
    pub size: usize,

    /// Status codes that get a pool
    pub codes: Vec<u16>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: DEFAULT_POOL_SIZE,
            codes: DEFAULT_POOLED_CODES.to_vec(),
        }
    }
}

impl PoolConfig {
    /// A configuration with pooling switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Validate for PoolConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.size == 0 {
            return Err(ConfigError::ValidationError(
                "pool size must be greater than 0".to_string(),
            ));
        }

        if self.size > MAX_POOL_SIZE {
            return Err(ConfigError::ValueOutOfRange {
                key: "pool.size".to_string(),
                message: format!("{} exceeds the maximum of {MAX_POOL_SIZE}", self.size),
            });
        }

        for (i, code) in self.codes.iter().enumerate() {
            if !(400..600).contains(code) {
                return Err(ConfigError::ValueOutOfRange {
                    key: format!("pool.codes[{i}]"),
                    message: format!("{code} is not a 4xx or 5xx status code"),
                });
            }
            if self.codes[..i].contains(code) {
                return Err(ConfigError::ValidationError(format!(
                    "status code {code} is pooled more than once"
                )));
            }
        }

        Ok(())
    }
}
