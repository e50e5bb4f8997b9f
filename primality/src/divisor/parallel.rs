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
//! Batched parallel trial division
//!
//! The divisor range is partitioned into consecutive batches and one task per
//! batch is handed to a Rayon pool. Each task scans its batch in increasing
//! order and stops at the first divisor it finds. The calling thread blocks
//! until every task has finished, then aggregates.
//!
//! # Result Slots
//!
//! Found factors are recorded in an arena holding one slot per pool worker,
//! indexed by the worker's thread index. A slot is only written by the worker
//! that owns it, and the arena is only read after the join.
//!
//! # Cancellation
//!
//! With cancellation enabled (the default) the first task to find a factor
//! raises a shared flag and the remaining tasks stop scanning. This only
//! affects how much work is done, never whether a factor is reported.

use super::{DivisorRange, DivisorSearch};
use crate::config::{PrimalityConfig, DEFAULT_BATCH_SIZE};
use crate::error::{PrimalityError, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use rayon::{ThreadPool, ThreadPoolBuilder};
#[cfg(feature = "parallel")]
use std::sync::Arc;

/// Slot value meaning "no factor recorded"
///
/// Slots hold `factor - 1`. Divisors are at least 1, so a recorded factor is
/// at most `u64::MAX - 1` and never collides with the sentinel.
const NO_FACTOR: u64 = u64::MAX;

/// One result slot per worker
struct WorkerSlots {
    slots: Vec<AtomicU64>,
}

impl WorkerSlots {
    fn new(workers: usize) -> Self {
        WorkerSlots {
            slots: (0..workers.max(1)).map(|_| AtomicU64::new(NO_FACTOR)).collect(),
        }
    }

    /// Keep the smallest factor seen by `worker`
    fn record(&self, worker: usize, factor: u64) {
        debug_assert!(factor >= 1, "divisor ranges never contain 0");
        let slot = &self.slots[worker % self.slots.len()];
        slot.fetch_min(factor - 1, Ordering::Relaxed);
    }

    /// Smallest recorded factor across all workers
    ///
    /// Consumes the arena, so it can only run once every writer is done.
    fn smallest(self) -> Option<u64> {
        self.slots
            .into_iter()
            .map(AtomicU64::into_inner)
            .filter(|&slot| slot != NO_FACTOR)
            .min()
            .map(|slot| slot + 1)
    }
}

/// Trial division split into batches scanned concurrently
///
/// Uses the global Rayon pool unless built with a fixed worker count, in
/// which case it owns a dedicated pool.
///
/// # Example
///
/// ```rust
/// use primality::divisor::{DivisorSearch, ParallelDivisor};
///
/// let divisor = ParallelDivisor::new(64);
/// assert!(divisor.test_range(408_469, 2, 640).unwrap());
/// assert!(!divisor.test_range(408_467, 2, 640).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ParallelDivisor {
    batch_size: u64,
    cancel_on_factor: bool,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<ThreadPool>>,
}

impl ParallelDivisor {
    /// Create a parallel divisor on the global pool
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn new(batch_size: u64) -> Self {
        assert!(batch_size >= 1, "Batch size must be at least 1");
        ParallelDivisor {
            batch_size,
            cancel_on_factor: true,
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    /// Create a parallel divisor with a dedicated pool of `workers` threads
    ///
    /// Without the `parallel` feature the worker count is ignored and batches
    /// run on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`PrimalityError::InvalidBatchSize`] if `batch_size` is zero,
    /// [`PrimalityError::Config`] if `workers` is zero, or
    /// [`PrimalityError::ThreadPool`] if the pool cannot be started.
    pub fn with_workers(batch_size: u64, workers: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(PrimalityError::InvalidBatchSize);
        }
        if workers == 0 {
            return Err(PrimalityError::Config {
                message: "worker count must be at least 1".to_string(),
            });
        }

        #[cfg(feature = "parallel")]
        {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|index| format!("primality-worker-{}", index))
                .build()?;
            debug!(workers, batch_size, "started dedicated divisor pool");
            Ok(ParallelDivisor {
                batch_size,
                cancel_on_factor: true,
                pool: Some(Arc::new(pool)),
            })
        }
        #[cfg(not(feature = "parallel"))]
        {
            debug!(workers, "parallel feature disabled, batches run on the calling thread");
            Ok(Self::new(batch_size))
        }
    }

    /// Build a parallel divisor from a configuration
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`, or the pool build error.
    pub fn from_config(config: &PrimalityConfig) -> Result<Self> {
        config.validate()?;
        let divisor = match config.worker_count {
            Some(workers) => Self::with_workers(config.batch_size, workers)?,
            None => Self::new(config.batch_size),
        };
        Ok(divisor.with_cancellation(config.cancel_on_factor))
    }

    /// Enable or disable cross-batch cancellation
    pub fn with_cancellation(mut self, enabled: bool) -> Self {
        self.cancel_on_factor = enabled;
        self
    }

    /// Number of divisors per batch
    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Whether finding a factor stops the other batches early
    pub fn cancels_on_factor(&self) -> bool {
        self.cancel_on_factor
    }

    /// Number of workers batches are spread across
    ///
    /// Returns 1 if the `parallel` feature is disabled.
    pub fn worker_count(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            self.pool
                .as_ref()
                .map(|pool| pool.current_num_threads())
                .unwrap_or_else(rayon::current_num_threads)
        }
        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    #[cfg(feature = "parallel")]
    fn dispatch(&self, n: u64, range: &DivisorRange, stop: Option<&AtomicBool>) -> Option<u64> {
        let batch_size = self.batch_size;
        let batch_count = range.batch_count(batch_size);

        let run = || {
            let slots = WorkerSlots::new(rayon::current_num_threads());
            (0..batch_count).into_par_iter().for_each(|index| {
                let batch = range.batch(index, batch_size);
                if let Some(factor) = batch.scan(n, stop) {
                    if let Some(flag) = stop {
                        flag.store(true, Ordering::Relaxed);
                    }
                    trace!(n, factor, batch = index, "batch found factor");
                    slots.record(rayon::current_thread_index().unwrap_or(0), factor);
                }
            });
            // for_each returns only after every batch has completed
            slots.smallest()
        };

        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch(&self, n: u64, range: &DivisorRange, stop: Option<&AtomicBool>) -> Option<u64> {
        let slots = WorkerSlots::new(1);
        for batch in range.batches(self.batch_size) {
            if let Some(factor) = batch.scan(n, stop) {
                if let Some(flag) = stop {
                    flag.store(true, Ordering::Relaxed);
                }
                trace!(n, factor, batch = batch.index(), "batch found factor");
                slots.record(0, factor);
            }
        }
        slots.smallest()
    }
}

impl Default for ParallelDivisor {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl DivisorSearch for ParallelDivisor {
    fn name(&self) -> &str {
        "ParallelBatched"
    }

    /// Returns the smallest divisor recorded by any batch
    ///
    /// With cancellation disabled every batch runs to its own first divisor,
    /// so this is the smallest divisor in the range. With cancellation
    /// enabled it is some divisor from the range.
    fn search(&self, n: u64, range: &DivisorRange) -> Option<u64> {
        let stop = AtomicBool::new(false);
        let stop = self.cancel_on_factor.then_some(&stop);

        debug!(
            n,
            start = range.start(),
            end = range.end(),
            batch_size = self.batch_size,
            batches = range.batch_count(self.batch_size),
            workers = self.worker_count(),
            "dispatching divisor batches"
        );
        let factor = self.dispatch(n, range, stop);
        debug!(n, ?factor, "divisor batches joined");
        factor
    }
}

/// Whether `[start, end]` holds no divisor of `n`, scanned in parallel
/// batches of `batch_size` on the global pool
///
/// # Errors
///
/// Returns [`PrimalityError::InvalidBatchSize`] if `batch_size` is zero and
/// [`PrimalityError::InvalidRange`] if `start > end` or `start == 0`.
pub fn test_range_parallel(n: u64, start: u64, end: u64, batch_size: u64) -> Result<bool> {
    if batch_size == 0 {
        return Err(PrimalityError::InvalidBatchSize);
    }
    ParallelDivisor::new(batch_size).test_range(n, start, end)
}
