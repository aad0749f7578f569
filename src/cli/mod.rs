//! Command-line surface: flags, logging setup and the run pipeline.

use crate::core::error::MakeError;
use crate::core::executor;
use crate::core::graph::DependencyGraph;
use crate::core::types::{ParseOptions, RunReport, DEFAULT_RULE_FILE};
use crate::transport::{CommandRunner, DryRunner, LocalRunner};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter when `--verbose` is not set.
pub const LOG_ENV: &str = "MKRUN_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "mkrun",
    version,
    about = "Run a rule-file target after everything it depends on"
)]
pub struct Cli {
    /// Rule file to read
    #[arg(short, long, env = "MKRUN_FILE", default_value = DEFAULT_RULE_FILE)]
    pub file: PathBuf,

    /// Target to build
    #[arg(short, long)]
    pub target: String,

    /// Print the commands that would run without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Reject rule files that define a target more than once
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_options(&self) -> ParseOptions {
        if self.strict {
            ParseOptions::strict()
        } else {
            ParseOptions::default()
        }
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces debug output; otherwise `MKRUN_LOG` is honored and the
/// default only shows warnings.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Run the pipeline selected by the flags.
pub fn dispatch(cli: &Cli) -> Result<RunReport, MakeError> {
    if cli.dry_run {
        cmd_run(&cli.file, &cli.target, &cli.parse_options(), &mut DryRunner::stdout())
    } else {
        cmd_run(&cli.file, &cli.target, &cli.parse_options(), &mut LocalRunner::stdout())
    }
}

/// Load the rule file and run `target` through `runner`.
pub fn cmd_run<R: CommandRunner + ?Sized>(
    file: &Path,
    target: &str,
    options: &ParseOptions,
    runner: &mut R,
) -> Result<RunReport, MakeError> {
    let graph = load_graph(file, options)?;
    executor::run(&graph, target, runner)
}

/// Read and parse a rule file.
pub fn load_graph(file: &Path, options: &ParseOptions) -> Result<DependencyGraph, MakeError> {
    let graph = DependencyGraph::from_file(file, options)?;
    info!(
        file = %file.display(),
        targets = graph.len(),
        duplicates = %options.duplicates,
        "loaded rule file"
    );
    Ok(graph)
}
