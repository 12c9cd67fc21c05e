//! Backend latency comparison entry point.
//!
//! Seeds a secret from OS entropy, times both derivation backends over a
//! configurable number of trials against a fixed tuple, and reports the
//! latency distribution as structured log events.

use std::hint::black_box;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::RngCore;
use rand::rngs::OsRng;
use synseq_core::{Backend, FourTuple, MonotonicTicks, NetSecret, SECRET_BYTES, TickSource, sequence_number};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Latency comparison for the sequence number PRF backends
#[derive(Parser, Debug)]
#[command(name = "synseq-perf")]
#[command(about = "Compare derivation latency of the two PRF backends")]
#[command(version)]
struct Args {
    /// Number of timed derivations per backend
    #[arg(short, long, default_value_t = 1000)]
    trials: u32,

    /// Restrict the run to a single backend
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Md5,
    Siphash,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Md5 => Backend::Md5,
            BackendArg::Siphash => Backend::SipHash,
        }
    }
}

/// Per-backend latency summary over all trials.
struct Summary {
    mean_ns: f64,
    min_ns: u128,
    max_ns: u128,
}

/// Time `trials` derivations one call at a time, so per-call jitter
/// stays visible in min/max instead of averaging out.
fn time_backend(secret: &NetSecret, backend: Backend, tick: u32, trials: u32) -> Summary {
    let tuple = FourTuple::new(1, 2, 3, 4);
    let mut total_ns = 0u128;
    let mut min_ns = u128::MAX;
    let mut max_ns = 0u128;

    for _ in 0..trials {
        let start = Instant::now();
        black_box(sequence_number(black_box(&tuple), secret, backend, tick));
        let elapsed = start.elapsed().as_nanos();

        total_ns += elapsed;
        min_ns = min_ns.min(elapsed);
        max_ns = max_ns.max(elapsed);
    }

    Summary { mean_ns: total_ns as f64 / f64::from(trials.max(1)), min_ns, max_ns }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let secret = NetSecret::from_bytes(&bytes);

    let ticks = MonotonicTicks::new();
    let selected: Vec<Backend> = match args.backend {
        Some(backend) => vec![backend.into()],
        None => vec![Backend::Md5, Backend::SipHash],
    };

    for backend in selected {
        let summary = time_backend(&secret, backend, ticks.coarse_tick(), args.trials);
        info!(
            ?backend,
            trials = args.trials,
            mean_ns = summary.mean_ns,
            min_ns = summary.min_ns,
            max_ns = summary.max_ns,
            "derivation latency"
        );
    }
}
