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
//! Basic example demonstrating strategy dispatch
//!
//! This example tests a handful of candidates with every strategy and shows
//! how batch size and worker count are configured.

use primality::divisor::{ceil_sqrt, DivisorRange};
use primality::{PrimalityConfig, PrimalityService, Strategy, Verdict, TRIVIAL_THRESHOLD};
use std::time::Instant;

fn main() {
    println!("Primality - Basic Strategy Example");
    println!("==================================\n");

    let config = PrimalityConfig::new(64).with_workers(4);
    let service = match PrimalityService::new(config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Failed to build service: {}", e);
            return;
        }
    };
    println!(
        "Parallel divisor: batch size {}, {} workers\n",
        service.parallel().batch_size(),
        service.parallel().worker_count()
    );

    let candidates = [0u64, 1, 2, 75, 97, 255, 257, 408_467, 408_469, i32::MAX as u64];

    for n in candidates {
        let path = if n % 2 == 0 || n < TRIVIAL_THRESHOLD {
            "table".to_string()
        } else {
            let batches = DivisorRange::for_candidate(n).map(|r| r.batch_count(64)).unwrap_or(0);
            format!("divisors 2..={} in {} batches", ceil_sqrt(n), batches)
        };
        println!("n = {} ({})", n, path);

        for strategy in Strategy::ALL {
            let started = Instant::now();
            let verdict = service.verdict(n, strategy);
            let elapsed = started.elapsed();

            let outcome = match verdict {
                Verdict::Prime => "prime".to_string(),
                Verdict::Composite(Some(factor)) => format!("not prime (divisible by {})", factor),
                Verdict::Composite(None) => "not prime".to_string(),
            };
            println!("  [{:>8}] {} in {:?}", strategy, outcome, elapsed);
        }
    }
}
