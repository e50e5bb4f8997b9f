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
//! # Primality
//!
//! Trial-division primality testing with interchangeable execution
//! strategies behind a single entry point.
//!
//! ## Features
//!
//! - **Trivial Table**: Small and even candidates are answered from a
//!   precomputed table of the primes below 256
//! - **Serial Trial Division**: Short-circuiting scan of `[2, ceil(sqrt(n))]`
//! - **Batched Parallel Trial Division**: The divisor range is split into
//!   batches scanned concurrently on a Rayon pool, then joined and aggregated
//! - **Consistent Semantics**: Every strategy returns the same answer for
//!   every input
//!
//! ## Example
//!
//! ```rust
//! use primality::{test_prime, Strategy};
//!
//! assert!(test_prime(408_469, Strategy::Serial));
//! assert!(!test_prime(408_467, Strategy::ParallelBatched));
//! assert!(!test_prime(1, Strategy::Serial));
//! ```

#![warn(missing_docs)]

/// Error types shared by every strategy
pub mod error;

/// Lookup table for small and even candidates
pub mod trivial;

/// Divisor ranges, batch planning and the trial-division strategies
pub mod divisor;

/// Tunables for the parallel strategy
pub mod config;

/// Strategy dispatch and the public entry point
pub mod service;

/// Log subscriber setup for the command-line binary
#[cfg(feature = "cli")]
pub mod logger;

pub use config::{PrimalityConfig, DEFAULT_BATCH_SIZE};
pub use divisor::{DivisorRange, DivisorSearch, ParallelDivisor, SerialDivisor};
pub use error::{PrimalityError, Result};
pub use service::{test_prime, PrimalityService, Strategy, Verdict};
pub use trivial::TRIVIAL_THRESHOLD;
