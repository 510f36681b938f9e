//! reportcard: LaTeX report card generator.
//!
//! # Usage
//!
//! ```text
//! reportcard section --temp <dir> <name> [--arg V]... [--raw-arg V]... [--seq JSON]... [--raw-seq JSON]...
//! reportcard generate --temp <dir> --trial <id> <section.tex>...
//! reportcard basic --temp <dir> <trial> <name> <creator> <type> <robot> <description> <time> <total> <figure>
//! reportcard doctor
//! ```
//!
//! Global flags: `--config <file>`, `--template-dir <dir>`, `--typesetter <program>`,
//! `--json`, `--strict`, `--verbose`.

mod commands;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use commands::{basic::BasicArgs, doctor::DoctorArgs, generate::GenerateArgs, section::SectionArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "reportcard",
    version,
    about = "Render LaTeX report cards from templates and computed values",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: ~/.reportcard/config.yaml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Template directory; overrides `template_dir` from the config.
    #[arg(long, global = true, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// LaTeX engine; overrides `typesetter.program` from the config.
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub typesetter: Option<String>,

    /// Print the outcome (path + diagnostics) as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Exit non-zero when any diagnostic was recorded.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one section template into the temp directory (no typesetting).
    Section(SectionArgs),

    /// Compose rendered sections into the final report card and typeset it.
    Generate(GenerateArgs),

    /// Render and typeset the fixed nine-field basic report card.
    Basic(BasicArgs),

    /// Check the template directory and the LaTeX toolchain.
    Doctor(DoctorArgs),
}

// ---------------------------------------------------------------------------
// Sequence arguments, parsed from a JSON array on the command line
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `--seq '["a","b"]'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeqArg(pub Vec<String>);

impl FromStr for SeqArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_str::<Vec<String>>(s)
            .map(SeqArg)
            .map_err(|e| format!("expected a JSON array of strings, e.g. '[\"a\",\"b\"]': {e}"))
    }
}

impl fmt::Display for SeqArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl From<SeqArg> for Vec<String> {
    fn from(s: SeqArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// Filter used when `RUST_LOG` is unset. Commands print diagnostics
/// themselves, so library warnings stay quiet unless `--verbose`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "error"
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    match cli.command {
        Commands::Section(args) => args.run(&cli.global),
        Commands::Generate(args) => args.run(&cli.global),
        Commands::Basic(args) => args.run(&cli.global),
        Commands::Doctor(args) => args.run(&cli.global),
    }
}
