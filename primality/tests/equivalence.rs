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
//! Cross-strategy agreement tests
//!
//! Serial, parallel and table answers must agree on every candidate.

use primality::trivial::{is_trivial, trivial_test};
use primality::{test_prime, PrimalityConfig, PrimalityService, Strategy};

const SMALL_COMPOSITE: u64 = 75;
const MEDIUM_COMPOSITE: u64 = 666;
const LARGE_COMPOSITE: u64 = LARGE_PRIME - 2;
const XL_COMPOSITE: u64 = XL_PRIME - 2;
const SMALL_PRIME: u64 = 97;
const MEDIUM_PRIME: u64 = 563;
const LARGE_PRIME: u64 = 408_469;
const XL_PRIME: u64 = i32::MAX as u64;

/// Independent reference, deliberately naive
fn reference_is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[test]
fn test_named_values() {
    let expected = [
        (SMALL_COMPOSITE, false),
        (MEDIUM_COMPOSITE, false),
        (LARGE_COMPOSITE, false),
        (XL_COMPOSITE, false),
        (SMALL_PRIME, true),
        (MEDIUM_PRIME, true),
        (LARGE_PRIME, true),
        (XL_PRIME, true),
    ];

    for (n, is_prime) in expected {
        for strategy in Strategy::ALL {
            assert_eq!(test_prime(n, strategy), is_prime, "n={} strategy={}", n, strategy);
        }
    }
}

#[test]
fn test_all_strategies_agree_on_dense_range() {
    let service = PrimalityService::default();
    for n in 0..5_000u64 {
        let serial = service.test_prime(n, Strategy::Serial);
        let parallel = service.test_prime(n, Strategy::ParallelBatched);
        assert_eq!(serial, parallel, "strategies disagree at {}", n);
        assert_eq!(serial, reference_is_prime(n), "wrong answer at {}", n);
        if is_trivial(n) {
            assert_eq!(trivial_test(n).unwrap(), serial, "table disagrees at {}", n);
        }
    }
}

#[test]
fn test_all_strategies_agree_on_sparse_large_values() {
    let service = PrimalityService::new(PrimalityConfig::new(16)).unwrap();
    let candidates = [
        1_000_003u64,             // prime
        1_000_001,                // 101 * 9901
        999_999_937,              // largest prime below 10^9
        65_521 * 65_521,          // square of a prime
        4_294_967_291,            // largest prime below 2^32
        4_294_967_297,            // 641 * 6700417
        1_000_000_007 * 3,
    ];

    for n in candidates {
        let serial = service.test_prime(n, Strategy::Serial);
        assert_eq!(serial, service.test_prime(n, Strategy::ParallelBatched), "n={}", n);
        assert_eq!(serial, reference_is_prime(n), "n={}", n);
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let service = PrimalityService::default();
    for strategy in Strategy::ALL {
        let first = service.test_prime(LARGE_PRIME, strategy);
        for _ in 0..10 {
            assert_eq!(service.test_prime(LARGE_PRIME, strategy), first);
            assert!(!service.test_prime(LARGE_COMPOSITE, strategy));
        }
    }
}

#[test]
fn test_factor_witnesses_compositeness() {
    let service = PrimalityService::default();
    for n in [SMALL_COMPOSITE, MEDIUM_COMPOSITE, LARGE_COMPOSITE, XL_COMPOSITE] {
        for strategy in Strategy::ALL {
            let factor = service
                .find_factor(n, strategy)
                .unwrap_or_else(|| panic!("{} should have a factor", n));
            assert!(factor > 1 && factor < n);
            assert_eq!(n % factor, 0);
        }
    }
}
