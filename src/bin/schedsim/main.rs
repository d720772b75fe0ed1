//! schedsim - Compare CPU scheduling policies on a generated or loaded
//! process set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;

use schedsim::{
    generate_processes, parse_quantum, parse_seed, read_workload, render_gantt, render_text,
    run_policies, ClockMode, PolicyKind, PolicyReport, Process, Rng, SimConfig,
};

/// Which policies to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Every policy, in report order (default).
    #[default]
    All,
    /// Round Robin.
    Rr,
    /// Non-preemptive Shortest Job First.
    Sjf,
    /// Non-preemptive Priority.
    Priority,
    /// Three-tier Multilevel Queue.
    Mlq,
}

impl PolicyArg {
    fn kinds(self) -> Vec<PolicyKind> {
        match self {
            PolicyArg::All => PolicyKind::ALL.to_vec(),
            PolicyArg::Rr => vec![PolicyKind::RoundRobin],
            PolicyArg::Sjf => vec![PolicyKind::ShortestJobFirst],
            PolicyArg::Priority => vec![PolicyKind::Priority],
            PolicyArg::Mlq => vec![PolicyKind::MultilevelQueue],
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Simulate classic CPU scheduling policies and report their metrics.
#[derive(Parser)]
#[command(name = "schedsim")]
struct Cli {
    /// Number of processes to generate.
    #[arg(
        short = 'n',
        long,
        default_value_t = schedsim::config::DEFAULT_NR_PROCESSES,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with = "workload"
    )]
    processes: u32,

    /// Round Robin quantum, also used by the top Multilevel Queue tier.
    ///
    /// Overrides a quantum given by the workload file, which overrides
    /// the SCHEDSIM_QUANTUM env var. Default: 3.
    #[arg(short, long)]
    quantum: Option<String>,

    /// PRNG seed for generated processes (u32 integer or "entropy" for OS
    /// randomness).
    ///
    /// Falls back to SCHEDSIM_SEED env var, then default (42).
    #[arg(long, conflicts_with = "workload")]
    seed: Option<String>,

    /// Load processes from a JSON workload file instead of generating them.
    #[arg(short, long, value_name = "PATH")]
    workload: Option<PathBuf>,

    /// Policy to run.
    #[arg(short, long, value_enum, default_value_t = PolicyArg::All)]
    policy: PolicyArg,

    /// Run Multilevel Queue tiers back to back on one clock.
    ///
    /// By default every tier starts its own clock at 0.
    #[arg(long)]
    shared_clock: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print a Gantt chart of each schedule (text format only).
    #[arg(long)]
    gantt: bool,

    /// Print trace events to stderr.
    #[arg(long)]
    dump_trace: bool,
}

/// Full run output for `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    seed: Option<u32>,
    time_quantum: u64,
    clock_mode: ClockMode,
    processes: &'a [Process],
    reports: &'a [PolicyReport],
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = SimConfig {
        nr_processes: cli.processes,
        ..SimConfig::from_env().context("invalid SCHEDSIM_* environment")?
    };
    if cli.shared_clock {
        config.clock_mode = ClockMode::Shared;
    }

    let (processes, seed) = match &cli.workload {
        Some(path) => {
            let workload = read_workload(path)
                .with_context(|| format!("failed to load workload {}", path.display()))?;
            if let Some(q) = workload.time_quantum {
                config.time_quantum = q;
            }
            (workload.processes, None)
        }
        None => {
            if let Some(seed) = &cli.seed {
                config.seed = parse_seed(Some(seed.as_str())).context("invalid --seed")?;
            }
            let processes = generate_processes(config.nr_processes, &mut Rng::new(config.seed));
            (processes, Some(config.seed))
        }
    };
    if let Some(q) = &cli.quantum {
        config.time_quantum = parse_quantum(q).context("invalid --quantum")?;
    }

    info!(
        nr_processes = processes.len(),
        quantum = config.time_quantum,
        seed = ?seed,
        "SIMULATE"
    );

    let schedules = run_policies(&cli.policy.kinds(), &processes, &config)
        .context("simulation failed")?;
    let reports = schedules
        .iter()
        .map(PolicyReport::new)
        .collect::<schedsim::Result<Vec<_>>>()
        .context("failed to compute metrics")?;

    if cli.dump_trace {
        for schedule in &schedules {
            eprintln!("--- {} ---", schedule.policy());
            schedule.trace().dump();
        }
    }

    match cli.format {
        OutputFormat::Text => {
            print!("{}", render_text(&reports));
            if cli.gantt {
                for schedule in &schedules {
                    print!("\n{} Gantt:\n{}", schedule.policy(), render_gantt(schedule));
                }
            }
        }
        OutputFormat::Json => {
            let report = JsonReport {
                seed,
                time_quantum: config.time_quantum,
                clock_mode: config.clock_mode,
                processes: &processes,
                reports: &reports,
            };
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
