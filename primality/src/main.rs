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
//! Command-line primality check
//!
//! ```bash
//! primality 408469
//! primality 2147483647 --strategy parallel --batch-size 64 --workers 4
//! primality 408467 --compare
//! ```

use clap::Parser;
use primality::logger;
use primality::{PrimalityConfig, PrimalityService, Result, Strategy, Verdict};
use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "primality", version, about = "Test whether a number is prime")]
struct Cli {
    /// The candidate to test
    n: u64,

    /// Strategy for candidates the trivial table cannot answer
    #[arg(short, long, default_value = "serial")]
    strategy: Strategy,

    /// Divisors per parallel batch (overrides PRIMALITY_BATCH_SIZE)
    #[arg(long)]
    batch_size: Option<u64>,

    /// Size of a dedicated worker pool (overrides PRIMALITY_WORKERS)
    #[arg(long)]
    workers: Option<usize>,

    /// Let every batch run to completion after a factor is found
    #[arg(long)]
    no_cancel: bool,

    /// Run every strategy and report whether they agree
    #[arg(long)]
    compare: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Result<PrimalityConfig> {
        self.config_from(|key| env::var(key).ok())
    }

    /// Flags layered over `PRIMALITY_*` values read through `lookup`
    fn config_from<F>(&self, lookup: F) -> Result<PrimalityConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PrimalityConfig::from_lookup(lookup)?;
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(workers) = self.workers {
            config.worker_count = Some(workers);
        }
        if self.no_cancel {
            config.cancel_on_factor = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn timed_verdict(service: &PrimalityService, n: u64, strategy: Strategy) -> (Verdict, Duration) {
    let started = Instant::now();
    let verdict = service.verdict(n, strategy);
    (verdict, started.elapsed())
}

fn describe(n: u64, verdict: &Verdict) -> String {
    match verdict {
        Verdict::Prime => format!("'{}' is prime.", n),
        Verdict::Composite(Some(factor)) => {
            format!("'{}' is not prime (divisible by {}).", n, factor)
        }
        Verdict::Composite(None) => format!("'{}' is not prime.", n),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let service = match cli.config().and_then(PrimalityService::new) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };
    tracing::debug!(
        batch_size = service.parallel().batch_size(),
        workers = service.parallel().worker_count(),
        cancel = service.parallel().cancels_on_factor(),
        "service ready"
    );

    if !cli.compare {
        let (verdict, elapsed) = timed_verdict(&service, cli.n, cli.strategy);
        tracing::info!(
            n = cli.n,
            strategy = %cli.strategy,
            ?elapsed,
            is_prime = verdict.is_prime(),
            "tested"
        );
        println!("{}", describe(cli.n, &verdict));
        return ExitCode::SUCCESS;
    }

    let results: Vec<(Strategy, Verdict, Duration)> = Strategy::ALL
        .iter()
        .map(|&strategy| {
            let (verdict, elapsed) = timed_verdict(&service, cli.n, strategy);
            (strategy, verdict, elapsed)
        })
        .collect();

    for (strategy, verdict, elapsed) in &results {
        println!("{:>8}: {} [{:.3?}]", strategy, describe(cli.n, verdict), elapsed);
    }

    let agreed = results
        .windows(2)
        .all(|pair| pair[0].1.is_prime() == pair[1].1.is_prime());
    if agreed {
        ExitCode::SUCCESS
    } else {
        tracing::error!(n = cli.n, "strategies disagree");
        eprintln!("error: strategies disagree for {}", cli.n);
        ExitCode::FAILURE
    }
}
