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
//! Strategy dispatch for primality tests
//!
//! [`PrimalityService::test_prime`] is the single entry point. Trivial
//! candidates (even, or below [`TRIVIAL_THRESHOLD`](crate::TRIVIAL_THRESHOLD))
//! are answered from the table whatever strategy was asked for. Everything
//! else is trial-divided over `[2, ceil(sqrt(n))]` by the requested strategy.

use crate::config::PrimalityConfig;
use crate::divisor::{DivisorRange, DivisorSearch, ParallelDivisor, SerialDivisor};
use crate::error::{PrimalityError, Result};
use crate::trivial;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Execution strategy for candidates that are not trivial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Trial division on the calling thread
    #[default]
    Serial,
    /// Trial division split into batches run on a worker pool
    ParallelBatched,
}

impl Strategy {
    /// Every selectable strategy
    pub const ALL: [Strategy; 2] = [Strategy::Serial, Strategy::ParallelBatched];

    /// Short lowercase name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Serial => "serial",
            Strategy::ParallelBatched => "parallel",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PrimalityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(Strategy::Serial),
            "parallel" | "parallel-batched" | "job" => Ok(Strategy::ParallelBatched),
            other => Err(PrimalityError::Config {
                message: format!("unknown strategy '{}' (expected 'serial' or 'parallel')", other),
            }),
        }
    }
}

/// Outcome of testing one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No divisor other than 1 and the candidate itself
    Prime,
    /// Not prime, with a witnessing factor; `None` for 0 and 1
    Composite(Option<u64>),
}

impl Verdict {
    /// Whether the candidate was prime
    pub fn is_prime(&self) -> bool {
        matches!(self, Verdict::Prime)
    }

    /// The witnessing factor of a composite candidate
    pub fn factor(&self) -> Option<u64> {
        match self {
            Verdict::Prime => None,
            Verdict::Composite(factor) => *factor,
        }
    }
}

/// Entry point unifying the trivial, serial and parallel paths
///
/// The service holds no per-call state; every call builds its own divisor
/// range and batches and discards them afterwards.
///
/// # Examples
///
/// ```
/// use primality::{PrimalityConfig, PrimalityService, Strategy};
///
/// let service = PrimalityService::new(PrimalityConfig::new(64)).unwrap();
/// assert!(service.test_prime(97, Strategy::ParallelBatched));
/// assert_eq!(service.find_factor(408_467, Strategy::Serial), Some(97));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrimalityService {
    serial: SerialDivisor,
    parallel: ParallelDivisor,
}

impl PrimalityService {
    /// Create a service from a configuration
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`, or the pool build error if a
    /// dedicated worker count is configured.
    pub fn new(config: PrimalityConfig) -> Result<Self> {
        Ok(Self::with_parallel(ParallelDivisor::from_config(&config)?))
    }

    /// Create a service around an existing parallel divisor
    pub fn with_parallel(parallel: ParallelDivisor) -> Self {
        PrimalityService {
            serial: SerialDivisor,
            parallel,
        }
    }

    /// The divisor used for [`Strategy::ParallelBatched`]
    pub fn parallel(&self) -> &ParallelDivisor {
        &self.parallel
    }

    fn searcher(&self, strategy: Strategy) -> &dyn DivisorSearch {
        match strategy {
            Strategy::Serial => &self.serial,
            Strategy::ParallelBatched => &self.parallel,
        }
    }

    /// Whether `n` is prime
    ///
    /// `strategy` is ignored for trivial candidates. Every strategy returns
    /// the same answer for the same `n`.
    pub fn test_prime(&self, n: u64, strategy: Strategy) -> bool {
        if trivial::is_trivial(n) {
            let is_prime = trivial::lookup(n);
            debug!(n, is_prime, "answered from trivial table");
            return is_prime;
        }

        // Non-trivial candidates are odd and at least 257
        let Some(range) = DivisorRange::for_candidate(n) else {
            return false;
        };
        let searcher = self.searcher(strategy);
        debug!(n, strategy = searcher.name(), end = range.end(), "trial division");
        searcher.search(n, &range).is_none()
    }

    /// Test `n` and keep the factor that disproves primality
    ///
    /// Agrees with [`test_prime`](Self::test_prime) on every `n`, and finds
    /// the witness in the same search rather than a second one.
    pub fn verdict(&self, n: u64, strategy: Strategy) -> Verdict {
        if trivial::is_trivial(n) && trivial::lookup(n) {
            return Verdict::Prime;
        }
        let Some(range) = DivisorRange::for_candidate(n) else {
            return Verdict::Composite(None);
        };
        match self.searcher(strategy).search(n, &range) {
            Some(factor) => Verdict::Composite(Some(factor)),
            // n >= 4 here, so an empty search means prime
            None => Verdict::Prime,
        }
    }

    /// A factor of `n` other than 1 and `n`, if `n` is composite
    ///
    /// Returns `None` for primes and for 0 and 1. [`Strategy::Serial`] always
    /// returns the smallest factor; [`Strategy::ParallelBatched`] does too
    /// unless cross-batch cancellation is enabled.
    pub fn find_factor(&self, n: u64, strategy: Strategy) -> Option<u64> {
        self.verdict(n, strategy).factor()
    }
}

/// Whether `n` is prime, using a default service
///
/// # Example
///
/// ```rust
/// use primality::{test_prime, Strategy};
///
/// for strategy in Strategy::ALL {
///     assert!(test_prime(2, strategy));
///     assert!(!test_prime(75, strategy));
/// }
/// ```
pub fn test_prime(n: u64, strategy: Strategy) -> bool {
    PrimalityService::default().test_prime(n, strategy)
}
