//! Process scheduling simulator CLI.
//!
//! This binary loads a set of process programs and either:
//! 1. **Lists them:** Prints each process's instructions and the active policies, leaving the
//!    trace as an exercise (default).
//! 2. **Solves them:** With `-c`, runs the scheduler and prints the tick-by-tick trace, and
//!    with `-p` the CPU and I/O utilization afterwards.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use procsim_core::config::Config;
use procsim_core::program::Workload;
use procsim_core::report::TableReporter;
use procsim_core::{SimError, Simulator};

/// Seed used by the command line when neither `--seed` nor a config file gives one.
const CLI_DEFAULT_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[command(
    name = "process-run",
    author,
    version,
    about = "Simulate processes sharing one CPU, tick by tick",
    long_about = "Simulate processes sharing one CPU, tick by tick.\n\n\
        Each process is a list of CPU and I/O instructions. Without -c the program listing \
        and policies are printed so the trace can be worked out by hand; with -c the trace \
        is computed.\n\nExamples:\n  \
        process-run -l 5:100,5:100 -c\n  \
        process-run -P c3,i,c2:c4 -S SWITCH_ON_END -c -p\n  \
        process-run -l 3:0,5:100 -I IO_RUN_IMMEDIATE -L 3 -c"
)]
struct Cli {
    /// The random seed; negative values are accepted and reinterpreted bit for bit.
    #[arg(short = 's', long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Explicit programs, one per process, separated by ':' (e.g. c7,i,c1,i:c3).
    #[arg(short = 'P', long, default_value = "")]
    program: String,

    /// Randomized processes X1:Y1,X2:Y2,... where X is the number of instructions and
    /// Y the percent chance (0 to 100) that an instruction uses the CPU rather than issuing an I/O.
    #[arg(short = 'l', long = "processlist", default_value = "")]
    process_list: String,

    /// How long an I/O takes, in ticks [default: 5].
    #[arg(short = 'L', long = "iolength")]
    io_length: Option<u64>,

    /// When to switch between processes: SWITCH_ON_IO, SWITCH_ON_END [default: SWITCH_ON_IO].
    #[arg(short = 'S', long = "switch")]
    switch: Option<String>,

    /// What happens when an I/O ends: IO_RUN_LATER, IO_RUN_IMMEDIATE [default: IO_RUN_LATER].
    #[arg(short = 'I', long = "iodone")]
    io_done: Option<String>,

    /// Compute the answers (run the simulation).
    #[arg(short = 'c')]
    solve: bool,

    /// Print statistics at the end; only useful with -c.
    #[arg(short = 'p', long = "printstats")]
    print_stats: bool,

    /// JSON configuration file; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log scheduler decisions to stderr.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Layers defaults, the optional config file, and explicit flags, in that order.
fn build_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => {
            let mut config = Config::default();
            config.loader.seed = CLI_DEFAULT_SEED;
            config
        }
    };

    if let Some(seed) = cli.seed {
        config.loader.seed = u64::from_ne_bytes(seed.to_ne_bytes());
    }
    if let Some(io_length) = cli.io_length {
        config.scheduler.io_length = io_length;
    }
    if let Some(switch) = &cli.switch {
        config.scheduler.switch_policy = switch.parse()?;
    }
    if let Some(io_done) = &cli.io_done {
        config.scheduler.io_done_policy = io_done.parse()?;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let config = build_config(cli)?;
    debug!(?config, "effective configuration");
    let workload = Workload::select(&cli.program, &cli.process_list)?;
    let sim = Simulator::new(config, &workload)?;

    if !cli.solve {
        sim.write_listing(&mut io::stdout().lock())?;
        return Ok(());
    }

    let mut reporter = TableReporter::new(io::stdout().lock());
    let stats = sim.run(&mut reporter)?;
    if cli.print_stats {
        stats.write_to(&mut reporter.into_inner())?;
    }
    Ok(())
}
