//! triage — headless runner for the vrad teleradiology triage simulator.
//!
//! Runs one simulation per invocation and prints a per-class summary plus the
//! tail of the job table.  `--out DIR` also writes the tables as CSV,
//! `--json` prints the summary and job table as JSON instead.
//!
//! ```text
//! triage --radiologists 4 --duration-hours 8 --cutoff 4 --out output/run1
//! RUST_LOG=debug triage --params params.json --seed 7
//! ```

mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use vrad_core::{SimulationParameters, Urgency};
use vrad_dispatch::{DispatchPolicy, GeneralistFirst, SpecialistsForUrgent};
use vrad_output::{CsvWriter, JobTableObserver};
use vrad_sim::{EngineBuilder, JobRow, LogObserver, RunSummary, SimulationResult};

use config::Overrides;

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Teleradiology triage discrete-event simulation
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// JSON file with simulation parameters; missing fields take defaults
    #[arg(long, value_name = "FILE.json")]
    params: Option<PathBuf>,

    /// Master RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Arrival window in hours
    #[arg(long)]
    duration_hours: Option<f64>,

    /// Number of radiologists on shift
    #[arg(long)]
    radiologists: Option<u32>,

    /// Draining cutoff multiplier (1, 2, 4 or 8)
    #[arg(long)]
    cutoff: Option<u32>,

    /// Share of radiologists who are specialists
    #[arg(long)]
    specialist_fraction: Option<f64>,

    /// Dispatch policy
    #[arg(long, value_enum, default_value_t = Policy::GeneralistFirst)]
    policy: Policy,

    /// Log every event
    #[arg(long, short)]
    verbose: bool,

    /// Write job_table.csv, unfinished_jobs.csv and class_summary.csv here
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Print the summary and full job table as JSON
    #[arg(long)]
    json: bool,

    /// Job-table rows to print
    #[arg(long, default_value_t = 10)]
    tail: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Policy {
    GeneralistFirst,
    SpecialistsForUrgent,
}

#[derive(Serialize)]
struct Report<'a> {
    params:     &'a SimulationParameters,
    summary:    &'a RunSummary,
    jobs:       Vec<JobRow>,
    unfinished: Vec<JobRow>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let overrides = Overrides {
        seed:                args.seed,
        duration_hours:      args.duration_hours,
        radiologists:        args.radiologists,
        cutoff:              args.cutoff,
        specialist_fraction: args.specialist_fraction,
        verbose:             args.verbose,
    };
    let params = config::resolve(args.params.as_deref(), &overrides)?;
    info!("{params:?}");

    let t0 = Instant::now();
    let result = match args.policy {
        Policy::GeneralistFirst => run_with(GeneralistFirst, params.clone(), args.out.as_deref())?,
        Policy::SpecialistsForUrgent => {
            run_with(SpecialistsForUrgent, params.clone(), args.out.as_deref())?
        }
    };
    let elapsed = t0.elapsed();

    if args.json {
        let report = Report {
            params:     &params,
            summary:    &result.summary,
            jobs:       result.job_table(),
            unfinished: result.unfinished_table(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&params, &result);
    print_tail(&result, args.tail);
    println!();
    println!("Simulated in {:.3} s", elapsed.as_secs_f64());
    if let Some(dir) = &args.out {
        println!("Tables written to {}", dir.display());
    }
    Ok(())
}

/// Build and run one engine, optionally streaming tables to `out`.
fn run_with<P: DispatchPolicy>(
    policy: P,
    params: SimulationParameters,
    out: Option<&Path>,
) -> Result<SimulationResult> {
    let verbose = params.verbose;
    let mut engine = EngineBuilder::new(params).policy(policy).build()?;

    let Some(dir) = out else {
        return Ok(engine.run(&mut LogObserver::new(verbose))?);
    };

    std::fs::create_dir_all(dir)?;
    let writer = CsvWriter::new(dir)?;
    let mut obs = (LogObserver::new(verbose), JobTableObserver::new(writer));
    let result = engine.run(&mut obs)?;
    if let Some(e) = obs.1.take_error() {
        bail!("writing tables to {}: {e}", dir.display());
    }
    Ok(result)
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_summary(params: &SimulationParameters, result: &SimulationResult) {
    let s = &result.summary;
    println!("=== triage — {} ===", s.policy);
    println!(
        "Radiologists: {} ({} specialists)  |  Window: {:.0} min  |  Cutoff: x{}  |  Seed: {}",
        params.num_radiologists,
        params.specialist_count(),
        params.sim_duration,
        params.cutoff_multiplier,
        params.seed,
    );
    println!(
        "Jobs: {} created, {} completed, {} unfinished  |  {} events  |  stopped at {} ({:?})",
        s.jobs_created,
        s.jobs_completed,
        s.jobs_unfinished,
        s.events_processed,
        s.final_time,
        s.termination,
    );
    println!("Utilisation: {:.1}%  |  Max wait list: {}", s.utilisation * 100.0, s.max_queue_len);
    println!();

    println!(
        "{:<10} {:>9} {:>10} {:>8} {:>9} {:>10} {:>10} {:>9}",
        "Urgency", "Completed", "Unfinished", "Target", "Breaches", "Mean wait", "Mean total", "Max queue"
    );
    println!("{}", "-".repeat(82));
    for urgency in Urgency::ALL {
        let c = s.class(urgency);
        println!(
            "{:<10} {:>9} {:>10} {:>8.0} {:>9} {:>10} {:>10} {:>9}",
            urgency.to_string(),
            c.completed,
            c.unfinished,
            c.target_time,
            c.sla_breaches,
            fmt_opt(c.mean_wait_time),
            fmt_opt(c.mean_total_time),
            c.max_queue_len,
        );
    }
}

fn print_tail(result: &SimulationResult, n: usize) {
    if n == 0 {
        return;
    }
    println!();
    println!(
        "{:>7} {:>7} {:>6} {:>12} {:>12} {:>12} {:>10} {:>10} {:>10}",
        "img_id", "urgency", "rad_id", "created", "starts", "finished", "wait", "w_rad", "total"
    );
    for row in result.job_table_tail(n) {
        println!(
            "{:>7} {:>7} {:>6} {:>12.3} {:>12} {:>12} {:>10} {:>10} {:>10}",
            row.img_id,
            row.urgency,
            row.rad_id.map(|r| r.to_string()).unwrap_or_default(),
            row.time_created,
            fmt_opt(row.time_rad_job_starts),
            fmt_opt(row.time_job_finished),
            fmt_opt(row.wait_time),
            fmt_opt(row.time_w_rad),
            fmt_opt(row.total_time),
        );
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".to_string())
}
