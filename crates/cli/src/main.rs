//! Issue/retire simulator CLI.
//!
//! This binary is the command line entry point for the simulator. It performs:
//! 1. **Run:** Load a program, simulate it under the chosen hazard model, and print the trace.
//! 2. **Check:** Parse a program and echo it in canonical form.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use issuesim_core::common::error::SimError;
use issuesim_core::config::Config;
use issuesim_core::core::{HazardMode, IssueOrder};
use issuesim_core::isa::parse::format_program;
use issuesim_core::sim::loader;
use issuesim_core::sim::{Simulator, TraceFormat, TraceReporter};

#[derive(Parser, Debug)]
#[command(
    name = "issuesim",
    author,
    version,
    about = "Cycle-by-cycle instruction issue/retire simulator",
    long_about = "Simulate the issue and retirement of a register-transfer program.\n\nProgram lines look like `R1 = R0 + R0`, `R3 = Load`, optionally followed by `; deps: 1, 2`.\n\nExamples:\n  issuesim run prog.txt\n  issuesim run prog.txt --width 2 --mode explicit\n  issuesim run prog.txt --config machine.json --format json\n  issuesim check prog.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a program and print its cycle trace.
    Run(RunArgs),

    /// Parse a program and print it in canonical form.
    Check {
        /// Program text file.
        program: PathBuf,

        /// JSON configuration file supplying the latency table.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Implicit,
    Explicit,
}

impl From<ModeArg> for HazardMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Implicit => Self::Implicit,
            ModeArg::Explicit => Self::Explicit,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    InOrder,
    FirstFit,
}

impl From<OrderArg> for IssueOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::InOrder => Self::InOrder,
            OrderArg::FirstFit => Self::FirstFit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for TraceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Options of the `run` subcommand.
#[derive(Args, Debug)]
struct RunArgs {
    /// Program text file.
    program: PathBuf,

    /// JSON configuration file; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hazard model.
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Instructions issued per cycle.
    #[arg(short, long)]
    width: Option<usize>,

    /// Issue scan order (defaults to in-order for implicit, first-fit for explicit).
    #[arg(short, long, value_enum)]
    order: Option<OrderArg>,

    /// Do not issue in a cycle where an instruction retired.
    #[arg(long)]
    settle: bool,

    /// Keep dependency lists empty instead of deriving them in explicit mode.
    #[arg(long)]
    no_derive: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = FormatArg::Table)]
    format: FormatArg,

    /// Print the final register values after the table.
    #[arg(long)]
    registers: bool,

    /// Print run statistics after the table.
    #[arg(long)]
    stats: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Check { program, config } => cmd_check(&program, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config, SimError> {
    path.map_or_else(|| Ok(Config::default()), Config::from_file)
}

/// Loads the program, applies flag overrides to the configuration, runs the
/// simulation, and prints the trace in the requested format.
fn cmd_run(args: &RunArgs) -> Result<(), SimError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.scheduler.mode = mode.into();
    }
    if let Some(width) = args.width {
        config.scheduler.issue_width = width;
    }
    if let Some(order) = args.order {
        config.scheduler.issue_order = Some(order.into());
    }
    config.scheduler.settle_after_retire |= args.settle;
    if args.no_derive {
        config.scheduler.derive_dependencies = false;
    }

    let program = loader::load_program(&args.program, &config.latency)?;
    let trace = Simulator::new(&config, program)?.run()?;
    let reporter = TraceReporter::new(&trace.program, config.scheduler.issue_width);

    match TraceFormat::from(args.format) {
        TraceFormat::Table => {
            print!("{}", reporter.render_table(&trace.events));
            if args.registers {
                println!();
                print!("{}", trace.registers.dump());
            }
            if args.stats {
                println!();
                trace.stats.print();
            }
        }
        TraceFormat::Json => {
            let json = reporter.render_json(&trace).map_err(SimError::Render)?;
            println!("{json}");
        }
    }
    Ok(())
}

fn cmd_check(path: &Path, config: Option<&Path>) -> Result<(), SimError> {
    let config = load_config(config)?;
    let program = loader::load_program(path, &config.latency)?;
    print!("{}", format_program(&program));
    Ok(())
}
