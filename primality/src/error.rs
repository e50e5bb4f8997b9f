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
//! Errors raised when a primality routine is called outside its contract
//!
//! Every computation here is pure, so the only failures are precondition
//! violations by the caller (or a bad configuration). None of them are
//! produced by [`crate::PrimalityService`] on its own dispatch paths.

use thiserror::Error;

/// Precondition and configuration failures
#[derive(Debug, Error)]
pub enum PrimalityError {
    /// The trivial table was asked about a candidate it cannot answer
    #[error("{n} is not trivial to test")]
    OutOfRange {
        /// The rejected candidate
        n: u64,
    },

    /// A divisor range was empty or started at zero
    #[error("invalid divisor range [{start}, {end}]")]
    InvalidRange {
        /// First divisor requested
        start: u64,
        /// Last divisor requested
        end: u64,
    },

    /// A batch size of zero would never make progress
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// A configuration value could not be parsed or accepted
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the value
        message: String,
    },

    /// The dedicated worker pool could not be started
    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, PrimalityError>;
