use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use segsweep::geom2::rand::{draw_segments, ReplayToken, SegmentCfg};
use segsweep::{find_intersections_fast, find_intersections_slow, IntersectionResult, LineSegment};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

#[derive(Parser)]
#[command(name = "segsweep")]
#[command(about = "Planar line-segment intersection: sweep and all-pairs")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algo {
    /// Plane sweep
    Fast,
    /// All-pairs reference
    Slow,
}

impl Algo {
    fn name(self) -> &'static str {
        match self {
            Algo::Fast => "fast",
            Algo::Slow => "slow",
        }
    }

    fn find(self, segments: &[LineSegment], eps: f64) -> Vec<IntersectionResult> {
        match self {
            Algo::Fast => find_intersections_fast(segments, eps),
            Algo::Slow => find_intersections_slow(segments, eps),
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Intersect a JSON segment list and write results plus a provenance sidecar
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Algo::Fast)]
        algo: Algo,
        #[arg(long, default_value_t = segsweep::DEFAULT_EPS)]
        eps: f64,
    },
    /// Cross-check the sweep against the all-pairs scan on random inputs
    Check {
        #[arg(long, default_value_t = 64)]
        count: usize,
        #[arg(long, default_value_t = 100)]
        trials: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Draw integer coordinates in 0..=L instead of continuous ones
        #[arg(long)]
        lattice: Option<u32>,
        #[arg(long, default_value_t = segsweep::DEFAULT_EPS)]
        eps: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            out,
            algo,
            eps,
        } => run(input, out, algo, eps),
        Action::Check {
            count,
            trials,
            seed,
            lattice,
            eps,
        } => check(count, trials, seed, lattice, eps),
        Action::Report => report(),
    }
}

fn check_eps(eps: f64) -> Result<()> {
    if !(eps.is_finite() && eps > 0.0) {
        bail!("--eps must be finite and positive, got {eps}");
    }
    Ok(())
}

fn run(input: PathBuf, out: PathBuf, algo: Algo, eps: f64) -> Result<()> {
    check_eps(eps)?;
    tracing::info!(input = %input.display(), out = %out.display(), algo = algo.name(), eps, "run");
    let segments = io::read_segments(&input)?;
    let results = algo.find(&segments, eps);
    tracing::info!(segments = segments.len(), results = results.len(), "intersected");
    io::write_results(&out, &results)?;

    let payload = provenance::Payload::new(serde_json::json!({
        "algo": algo.name(),
        "eps": eps,
        "segments": segments.len(),
        "results": results.len()
    }))
    .with_input(input.to_string_lossy());
    let sidecar = provenance::write_sidecar(&out, payload)?;
    tracing::info!(sidecar = %sidecar.display(), "wrote provenance");
    Ok(())
}

fn check(count: usize, trials: u64, seed: u64, lattice: Option<u32>, eps: f64) -> Result<()> {
    check_eps(eps)?;
    tracing::info!(count, trials, seed, lattice = ?lattice, eps, "check");
    let cfg = SegmentCfg {
        count,
        lattice,
        ..SegmentCfg::default()
    };
    let mut tok = ReplayToken::new(seed, 0);
    let mut mismatches = 0u64;
    for _ in 0..trials {
        let segments = draw_segments(cfg, tok);
        let fast = find_intersections_fast(&segments, eps);
        let slow = find_intersections_slow(&segments, eps);
        if fast != slow {
            mismatches += 1;
            tracing::warn!(
                seed = tok.seed,
                index = tok.index,
                fast = fast.len(),
                slow = slow.len(),
                "mismatch"
            );
        }
        tok = tok.next();
    }
    if mismatches > 0 {
        bail!("{mismatches} of {trials} trials disagree");
    }
    tracing::info!(trials, "all trials agree");
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(serde_json::json!({}), &[], &[]);
    println!(
        "{}",
        serde_json::to_string_pretty(&obj).context("serializing provenance")?
    );
    Ok(())
}
