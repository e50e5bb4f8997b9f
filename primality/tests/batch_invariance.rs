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
//! Batch size and worker count must never change the answer

use primality::divisor::{
    ceil_sqrt, test_range_parallel, DivisorSearch, ParallelDivisor, SerialDivisor,
};
use primality::{PrimalityConfig, PrimalityService, Strategy};

const BATCH_SIZES: [u64; 4] = [1, 16, 64, 1000];
const WORKER_COUNTS: [usize; 3] = [1, 4, 16];

const LARGE_PRIME: u64 = 408_469;
const LARGE_COMPOSITE: u64 = 408_467;
const XL_PRIME: u64 = i32::MAX as u64;

#[test]
fn test_batch_size_and_workers_do_not_change_result() {
    for n in [LARGE_PRIME, LARGE_COMPOSITE, XL_PRIME, XL_PRIME - 2] {
        let end = ceil_sqrt(n);
        let expected = SerialDivisor.test_range(n, 2, end).unwrap();

        for workers in WORKER_COUNTS {
            for batch_size in BATCH_SIZES {
                let divisor = ParallelDivisor::with_workers(batch_size, workers).unwrap();
                assert_eq!(
                    divisor.test_range(n, 2, end).unwrap(),
                    expected,
                    "n={} batch_size={} workers={}",
                    n,
                    batch_size,
                    workers
                );
            }
        }
    }
}

#[test]
fn test_cancellation_does_not_change_result() {
    for n in [LARGE_PRIME, LARGE_COMPOSITE, 65_521 * 65_521] {
        let end = ceil_sqrt(n);
        for batch_size in BATCH_SIZES {
            let cancelling = ParallelDivisor::with_workers(batch_size, 4).unwrap();
            let exhaustive = cancelling.clone().with_cancellation(false);
            assert_eq!(
                cancelling.test_range(n, 2, end).unwrap(),
                exhaustive.test_range(n, 2, end).unwrap(),
                "n={} batch_size={}",
                n,
                batch_size
            );
        }
    }
}

#[test]
fn test_exhaustive_search_finds_smallest_factor() {
    // 3 * 5 * 7 * 11 * 13 * 17 * 19 * 23 has a factor in nearly every early batch
    let n = 111_546_435u64;
    let end = ceil_sqrt(n);
    let smallest = SerialDivisor.find_factor(n, 2, end).unwrap();
    assert_eq!(smallest, Some(3));

    for workers in WORKER_COUNTS {
        for batch_size in BATCH_SIZES {
            let divisor = ParallelDivisor::with_workers(batch_size, workers)
                .unwrap()
                .with_cancellation(false);
            assert_eq!(divisor.find_factor(n, 2, end).unwrap(), smallest);
        }
    }
}

#[test]
fn test_factor_at_range_bound() {
    // The only divisor in range is the last value of the last batch
    let n = 65_521 * 65_521;
    let end = ceil_sqrt(n);
    assert_eq!(end, 65_521);

    for batch_size in BATCH_SIZES {
        assert!(!test_range_parallel(n, 2, end, batch_size).unwrap());
        assert!(test_range_parallel(n, 2, end - 1, batch_size).unwrap());
    }
}

#[test]
fn test_configured_services_agree() {
    for workers in WORKER_COUNTS {
        for batch_size in BATCH_SIZES {
            let config = PrimalityConfig::new(batch_size).with_workers(workers);
            let service = PrimalityService::new(config).unwrap();
            for n in [257u64, 289, 563, 1001, LARGE_PRIME, LARGE_COMPOSITE] {
                assert_eq!(
                    service.test_prime(n, Strategy::ParallelBatched),
                    service.test_prime(n, Strategy::Serial),
                    "n={} batch_size={} workers={}",
                    n,
                    batch_size,
                    workers
                );
            }
        }
    }
}
