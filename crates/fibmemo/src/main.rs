//! fibmemo - memoized Fibonacci over a selectable memo backend

use anyhow::{bail, Result};
use clap::Parser;
use splaymemo::{
    compute, Backend, Capacity, MemoBackend, MemoConfig, SharedMemo, MIN_FIB_CAPACITY,
};
use tracing::{debug, info, warn};

/// Largest index whose value fits in a u128
const MAX_INDEX: u64 = 186;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Memo backend: splay or lru
    #[arg(short, long, default_value_t = Backend::Splay)]
    backend: Backend,

    /// Cache capacity (number of entries, or "unbounded").
    /// An LRU below 3 entries evicts f(n - 2) before reading it and runs
    /// in exponential time.
    #[arg(short, long, default_value_t = Capacity::Unbounded)]
    capacity: Capacity,

    /// Run every index this many times against the same memo
    #[arg(short, long, default_value_t = 1)]
    repeat: usize,

    /// Clear the memo before each index; stats still cover the whole run
    #[arg(long)]
    cold: bool,

    /// Fibonacci indices to compute
    #[arg(required = true)]
    indices: Vec<u64>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    if let Some(n) = args.indices.iter().copied().find(|&n| n > MAX_INDEX) {
        bail!("index {n} overflows u128 (max {MAX_INDEX})");
    }

    let config = MemoConfig::new(args.backend, args.capacity);
    info!("Backend: {}", config.backend);
    info!("Capacity: {}", config.capacity);
    if config.thrashes_fibonacci() {
        warn!(
            capacity = %config.capacity,
            min = MIN_FIB_CAPACITY,
            "LRU capacity too small to hold f(n - 1) and f(n - 2), expect exponential recomputation"
        );
    }

    let backend: MemoBackend<u64, u128> = config.build();
    let mut memo: SharedMemo<_, u64, u128> = SharedMemo::new(backend);

    for round in 0..args.repeat {
        for &n in &args.indices {
            if args.cold {
                memo.clear_entries();
            }
            let value: u128 = compute(n, &mut memo);
            debug!(round, n, entries = memo.len(), "computed");
            println!("f({n}) = {value}");
        }
    }

    info!("Memo entries: {}", memo.len());
    info!("Stats: {}", memo.stats().snapshot());

    Ok(())
}
