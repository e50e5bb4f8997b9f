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
//! Benchmarks for parallel batch tuning
//!
//! Measures the impact of batch size, worker count and cross-batch
//! cancellation on a large prime (full scan) and a large composite.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use primality::divisor::{ceil_sqrt, DivisorSearch, ParallelDivisor};

const XL_PRIME: u64 = i32::MAX as u64;
// 46337 * 46349; the only divisor in range sits near its end
const LATE_FACTOR_COMPOSITE: u64 = 2_147_673_613;

fn bench_batch_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_size");
    let end = ceil_sqrt(XL_PRIME);

    for batch_size in [16u64, 64, 128, 1024, 8192].iter() {
        let divisor = ParallelDivisor::new(*batch_size);
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            batch_size,
            |b, _| {
                b.iter(|| divisor.test_range(black_box(XL_PRIME), 2, end));
            },
        );
    }

    group.finish();
}

fn bench_worker_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_count");
    let end = ceil_sqrt(XL_PRIME);

    for workers in [1usize, 2, 4, 8].iter() {
        let divisor = match ParallelDivisor::with_workers(128, *workers) {
            Ok(divisor) => divisor,
            Err(e) => {
                eprintln!("Skipping {} workers: {}", workers, e);
                continue;
            }
        };
        group.bench_with_input(BenchmarkId::from_parameter(workers), workers, |b, _| {
            b.iter(|| divisor.test_range(black_box(XL_PRIME), 2, end));
        });
    }

    group.finish();
}

fn bench_cancellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancellation");
    let end = ceil_sqrt(LATE_FACTOR_COMPOSITE);

    for enabled in [true, false].iter() {
        let divisor = ParallelDivisor::new(128).with_cancellation(*enabled);
        group.bench_with_input(BenchmarkId::from_parameter(enabled), enabled, |b, _| {
            b.iter(|| divisor.test_range(black_box(LATE_FACTOR_COMPOSITE), 2, end));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_size, bench_worker_count, bench_cancellation);
criterion_main!(benches);
