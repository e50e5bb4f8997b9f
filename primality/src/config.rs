// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Tunables for the batched parallel strategy
//!
//! # Environment Configuration
//!
//! [`PrimalityConfig::from_env`] starts from the defaults and applies any of:
//! ```bash
//! export PRIMALITY_BATCH_SIZE=64   # divisors per batch
//! export PRIMALITY_WORKERS=8       # dedicated pool size (unset = global pool)
//! export PRIMALITY_CANCEL=false    # disable cross-batch cancellation
//! ```

use crate::error::{PrimalityError, Result};
use std::env;
use tracing::debug;

/// Default number of divisors per parallel batch
pub const DEFAULT_BATCH_SIZE: u64 = 128;

/// Environment variable overriding [`PrimalityConfig::batch_size`]
pub const BATCH_SIZE_ENV: &str = "PRIMALITY_BATCH_SIZE";

/// Environment variable overriding [`PrimalityConfig::worker_count`]
pub const WORKERS_ENV: &str = "PRIMALITY_WORKERS";

/// Environment variable overriding [`PrimalityConfig::cancel_on_factor`]
pub const CANCEL_ENV: &str = "PRIMALITY_CANCEL";

/// Configuration for the parallel strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimalityConfig {
    /// Number of divisors scanned by one task
    pub batch_size: u64,
    /// Size of a dedicated worker pool; `None` uses the global pool, which is
    /// sized to the available hardware parallelism
    pub worker_count: Option<usize>,
    /// Whether the first factor found stops the other batches
    pub cancel_on_factor: bool,
}

impl Default for PrimalityConfig {
    fn default() -> Self {
        PrimalityConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            worker_count: None,
            cancel_on_factor: true,
        }
    }
}

impl PrimalityConfig {
    /// Create a configuration with a custom batch size
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn new(batch_size: u64) -> Self {
        assert!(batch_size >= 1, "Batch size must be at least 1");
        PrimalityConfig {
            batch_size,
            ..Self::default()
        }
    }

    /// Run batches on a dedicated pool of `workers` threads
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero.
    pub fn with_workers(mut self, workers: usize) -> Self {
        assert!(workers >= 1, "Worker count must be at least 1");
        self.worker_count = Some(workers);
        self
    }

    /// Enable or disable cross-batch cancellation
    pub fn with_cancellation(mut self, enabled: bool) -> Self {
        self.cancel_on_factor = enabled;
        self
    }

    /// Defaults overridden by `PRIMALITY_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`PrimalityError::Config`] if a variable is set but cannot be
    /// parsed, or if the resulting configuration is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`
    ///
    /// Split out of [`from_env`](Self::from_env) so overrides can be supplied
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(BATCH_SIZE_ENV) {
            config.batch_size = parse_positive(BATCH_SIZE_ENV, &value)?;
        }
        if let Some(value) = lookup(WORKERS_ENV) {
            let parsed = parse_positive(WORKERS_ENV, &value)?;
            let workers = usize::try_from(parsed).map_err(|_| PrimalityError::Config {
                message: format!("{} is too large: {}", WORKERS_ENV, value),
            })?;
            config.worker_count = Some(workers);
        }
        if let Some(value) = lookup(CANCEL_ENV) {
            config.cancel_on_factor = parse_flag(CANCEL_ENV, &value)?;
        }

        config.validate()?;
        debug!(?config, "loaded primality configuration");
        Ok(config)
    }

    /// Check that every tunable is usable
    ///
    /// # Errors
    ///
    /// Returns [`PrimalityError::InvalidBatchSize`] for a zero batch size and
    /// [`PrimalityError::Config`] for a zero worker count.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(PrimalityError::InvalidBatchSize);
        }
        if self.worker_count == Some(0) {
            return Err(PrimalityError::Config {
                message: "worker count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed >= 1 => Ok(parsed),
        _ => Err(PrimalityError::Config {
            message: format!("{} must be a positive integer, got '{}'", key, value),
        }),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PrimalityError::Config {
            message: format!("{} must be a boolean, got '{}'", key, value),
        }),
    }
}
