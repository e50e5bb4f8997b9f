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
//! Table lookup for candidates that need no division work
//!
//! A candidate is trivial when it is even or below [`TRIVIAL_THRESHOLD`].
//! Even numbers other than 2 are composite, and everything below the
//! threshold is answered from [`TRIVIAL_PRIMES`].

use crate::error::{PrimalityError, Result};

/// Candidates below this value are answered from the table
pub const TRIVIAL_THRESHOLD: u64 = 256;

/// All primes below [`TRIVIAL_THRESHOLD`], in ascending order
pub const TRIVIAL_PRIMES: [u8; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Whether `n` can be answered without trial division
#[inline]
pub fn is_trivial(n: u64) -> bool {
    n % 2 == 0 || n < TRIVIAL_THRESHOLD
}

/// Answer primality for a trivial candidate
///
/// # Errors
///
/// Returns [`PrimalityError::OutOfRange`] if `n` is odd and at least
/// [`TRIVIAL_THRESHOLD`]; the table has no answer for it.
///
/// # Example
///
/// ```rust
/// use primality::trivial::trivial_test;
///
/// assert!(trivial_test(97).unwrap());
/// assert!(!trivial_test(1_000_000).unwrap());
/// assert!(trivial_test(257).is_err());
/// ```
pub fn trivial_test(n: u64) -> Result<bool> {
    if !is_trivial(n) {
        return Err(PrimalityError::OutOfRange { n });
    }
    Ok(lookup(n))
}

/// Table answer; the caller has already established `is_trivial(n)`
pub(crate) fn lookup(n: u64) -> bool {
    debug_assert!(is_trivial(n));
    if n != 2 && n % 2 == 0 {
        return false;
    }
    // Odd and trivial implies below the threshold, so the cast is lossless
    TRIVIAL_PRIMES.binary_search(&(n as u8)).is_ok()
}
