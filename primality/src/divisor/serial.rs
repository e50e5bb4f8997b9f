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
//! Serial trial division
//!
//! The reference strategy: divisors are tried in increasing order on the
//! calling thread and the scan stops at the first one that divides `n`.

use super::{DivisorRange, DivisorSearch};
use crate::error::Result;

/// Single-threaded trial division
///
/// # Example
///
/// ```rust
/// use primality::divisor::{DivisorSearch, SerialDivisor};
///
/// assert_eq!(SerialDivisor.find_factor(91, 2, 10).unwrap(), Some(7));
/// assert!(SerialDivisor.test_range(97, 2, 10).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialDivisor;

impl DivisorSearch for SerialDivisor {
    fn name(&self) -> &str {
        "Serial"
    }

    /// Always returns the smallest divisor in the range
    fn search(&self, n: u64, range: &DivisorRange) -> Option<u64> {
        (range.start()..=range.end()).find(|&d| n % d == 0)
    }
}

/// Whether `[start, end]` holds no divisor of `n`, scanned serially
///
/// # Errors
///
/// Returns [`crate::PrimalityError::InvalidRange`] if `start > end` or
/// `start == 0`.
pub fn test_range(n: u64, start: u64, end: u64) -> Result<bool> {
    SerialDivisor.test_range(n, start, end)
}
