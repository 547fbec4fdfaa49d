//! Argument definitions for the `themelion` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "themelion",
    version,
    about = "Aggregate learning content into the virtual:content module",
    long_about = "Aggregate languages, rooms, roadmaps and topic documents into one\n\
                  content catalog and emit it as the virtual:content module.\n\n\
                  The project root is taken from --root, then THEMELION_ROOT,\n\
                  then the current directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate, validate and write the generated module.
    Build(BuildArgs),

    /// Aggregate and validate without writing anything.
    Check(CheckArgs),

    /// Build once, then rebuild on every source change.
    Watch(WatchArgs),

    /// List registered languages.
    Languages(RootArgs),

    /// List rooms with their implementation progress.
    Rooms(RootArgs),
}

#[derive(Args)]
pub struct RootArgs {
    /// Project root (default: THEMELION_ROOT or the current directory).
    #[arg(long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Output file (default: output.module from themelion.toml).
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Shape of the generated file.
    #[arg(long = "format", value_enum, default_value = "module")]
    pub format: FormatArg,

    /// Treat integrity warnings as errors; nothing is written on errors.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Treat integrity warnings as errors.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Output file rewritten on every change.
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Shape of the generated file.
    #[arg(long = "format", value_enum, default_value = "module")]
    pub format: FormatArg,

    /// Quiet period used to coalesce bursts of filesystem events.
    #[arg(long = "debounce-ms", value_name = "MS", default_value_t = 100)]
    pub debounce_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Module,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
