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
//! Trial division over explicit divisor ranges
//!
//! This module provides the closed divisor interval used by both trial
//! division strategies, the batch planner that partitions it, and the
//! [`DivisorSearch`] trait the strategies implement.
//!
//! # Strategies
//!
//! - **Serial**: One increasing scan on the calling thread, stopping at the
//!   first divisor found
//! - **Parallel**: The range is cut into fixed-size batches that are scanned
//!   concurrently; the caller blocks until every batch has finished
//!
//! Both strategies give the same answer for the same `(n, start, end)`.
//! Batch size and worker count only change how fast a factor is found.

use crate::error::{PrimalityError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

mod parallel;
mod serial;

pub use parallel::{test_range_parallel, ParallelDivisor};
pub use serial::{test_range, SerialDivisor};

/// Smallest `r` with `r * r >= n`
///
/// Computed in integer arithmetic so large `u64` values are not subject to
/// floating-point rounding.
pub fn ceil_sqrt(n: u64) -> u64 {
    let r = floor_sqrt(n);
    if (r as u128) * (r as u128) == n as u128 {
        r
    } else {
        r + 1
    }
}

fn floor_sqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while (r as u128) * (r as u128) > n as u128 {
        r -= 1;
    }
    while ((r + 1) as u128) * ((r + 1) as u128) <= n as u128 {
        r += 1;
    }
    r
}

/// Closed interval `[start, end]` of candidate divisors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisorRange {
    start: u64,
    end: u64,
}

impl DivisorRange {
    /// Create a divisor range
    ///
    /// # Errors
    ///
    /// Returns [`PrimalityError::InvalidRange`] if `start > end` or
    /// `start == 0`.
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start == 0 || start > end {
            return Err(PrimalityError::InvalidRange { start, end });
        }
        Ok(DivisorRange { start, end })
    }

    /// The range `[2, ceil(sqrt(n))]` searched when testing `n`
    ///
    /// Returns `None` for `n < 2`, which has no divisors to search.
    pub fn for_candidate(n: u64) -> Option<Self> {
        if n < 2 {
            return None;
        }
        Some(DivisorRange {
            start: 2,
            end: ceil_sqrt(n),
        })
    }

    /// First divisor in the range
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last divisor in the range (inclusive)
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of divisors in the range
    pub fn len(&self) -> u64 {
        // start >= 1, so this cannot overflow
        self.end - self.start + 1
    }

    /// Always false; a valid range holds at least one divisor
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of batches of `batch_size` needed to cover the range
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn batch_count(&self, batch_size: u64) -> u64 {
        assert!(batch_size >= 1, "Batch size must be at least 1");
        (self.end - self.start) / batch_size + 1
    }

    /// The `index`-th batch of `batch_size` divisors
    ///
    /// The last batch may be shorter than `batch_size`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `batch_count(batch_size)`.
    pub fn batch(&self, index: u64, batch_size: u64) -> Batch {
        assert!(
            index < self.batch_count(batch_size),
            "Batch index {} out of range",
            index
        );
        // index * batch_size <= end - start, so neither step overflows
        let start = self.start + index * batch_size;
        let end = start.saturating_add(batch_size - 1).min(self.end);
        Batch { index, start, end }
    }

    /// Iterate over the batches covering the range, in order
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn batches(&self, batch_size: u64) -> Batches {
        Batches {
            range: *self,
            batch_size,
            next: 0,
            count: self.batch_count(batch_size),
        }
    }
}

/// A contiguous slice of a [`DivisorRange`] scanned as one unit of work
///
/// Batches are only handed out by [`DivisorRange::batch`] and
/// [`DivisorRange::batches`], so every batch lies inside a validated range
/// and never contains the divisor 0.
///
/// # Example
///
/// ```rust
/// use primality::divisor::DivisorRange;
///
/// // A range that would divide by zero is rejected before any batch exists
/// assert!(DivisorRange::new(0, 3).is_err());
///
/// let batch = DivisorRange::new(2, 10).unwrap().batch(1, 4);
/// assert_eq!((batch.index(), batch.start(), batch.end()), (1, 6, 9));
/// assert_eq!(batch.scan(35, None), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    index: u64,
    start: u64,
    end: u64,
}

impl Batch {
    /// Position of this batch within its range
    pub fn index(&self) -> u64 {
        self.index
    }

    /// First divisor in the batch
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last divisor in the batch (inclusive)
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of divisors in the batch
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; batches are never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Scan the batch in increasing order and return the first divisor of `n`
    ///
    /// When `stop` is given the scan also ends as soon as the flag is raised,
    /// returning `None` for the unscanned remainder.
    pub fn scan(&self, n: u64, stop: Option<&AtomicBool>) -> Option<u64> {
        match stop {
            None => (self.start..=self.end).find(|&d| n % d == 0),
            Some(flag) => {
                for d in self.start..=self.end {
                    if flag.load(Ordering::Relaxed) {
                        return None;
                    }
                    if n % d == 0 {
                        return Some(d);
                    }
                }
                None
            }
        }
    }
}

/// Iterator over the batches of a [`DivisorRange`]
#[derive(Debug, Clone)]
pub struct Batches {
    range: DivisorRange,
    batch_size: u64,
    next: u64,
    count: u64,
}

impl Iterator for Batches {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.next >= self.count {
            return None;
        }
        let batch = self.range.batch(self.next, self.batch_size);
        self.next += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.count - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// A trial-division strategy over a [`DivisorRange`]
///
/// Implementations must return a divisor of `n` from the range whenever one
/// exists, and `None` only when the range holds no divisor of `n`.
pub trait DivisorSearch: Send + Sync {
    /// Get the name of this strategy
    fn name(&self) -> &str;

    /// Find a divisor of `n` in `range`
    fn search(&self, n: u64, range: &DivisorRange) -> Option<u64>;

    /// Whether `[start, end]` holds no divisor of `n`
    ///
    /// # Errors
    ///
    /// Returns [`PrimalityError::InvalidRange`] if `start > end` or
    /// `start == 0`.
    fn test_range(&self, n: u64, start: u64, end: u64) -> Result<bool> {
        let range = DivisorRange::new(start, end)?;
        Ok(self.search(n, &range).is_none())
    }

    /// A divisor of `n` in `[start, end]`, if there is one
    ///
    /// # Errors
    ///
    /// Returns [`PrimalityError::InvalidRange`] if `start > end` or
    /// `start == 0`.
    fn find_factor(&self, n: u64, start: u64, end: u64) -> Result<Option<u64>> {
        let range = DivisorRange::new(start, end)?;
        Ok(self.search(n, &range))
    }
}
