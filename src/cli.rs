use crate::{constants::*, io::adapters::InputFormat};
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    fmt,
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string reported by `--version` and in the run banner.
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| env!("CARGO_PKG_VERSION").to_string());

#[derive(Parser, Debug)]
#[command(name="svfuse",
          version=&**FULL_VERSION,
          about="Structural variant call consolidation",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Consolidate(ConsolidateArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Consolidate(_) => "consolidate",
        }
    }
}

/// One caller output file together with the format it is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub format: InputFormat,
    pub path: PathBuf,
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.format, self.path.display())
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct ConsolidateArgs {
    /// Caller output to consolidate as FORMAT:PATH, e.g. (gridss:calls.vcf.gz)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FORMAT:PATH",
        num_args = 1..,
        required = true,
        value_parser = parse_input_spec
    )]
    pub inputs: Vec<InputSpec>,

    /// Write output to a file [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,

    #[command(flatten)]
    pub consolidate_args: ConsolidateArgsInner,
}

#[derive(Parser, Debug, Clone)]
pub struct ConsolidateArgsInner {
    /// Maximum gap between breakpoint nodes that are merged
    #[arg(
        help_heading("Advanced"),
        long,
        default_value_t = DEFAULT_MAX_NODE_DIST
    )]
    pub max_node_dist: u64,

    /// Maximum distance between far endpoints of redundant events
    #[arg(
        help_heading("Advanced"),
        long,
        default_value_t = DEFAULT_MAX_REDUNDANT_DIST
    )]
    pub max_redundant_dist: u64,

    /// Do not assemble inversion pairs into complex inversions
    #[arg(
        help_heading("Advanced"),
        long,
        default_value_t = DEFAULT_NO_COMPLEX
    )]
    pub no_complex: bool,

    /// Abort on the first malformed input record instead of skipping it
    #[arg(
        help_heading("Advanced"),
        long,
        default_value_t = DEFAULT_STRICT
    )]
    pub strict: bool,
}

impl ConsolidateArgsInner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }
}

impl Default for ConsolidateArgsInner {
    fn default() -> Self {
        Self {
            max_node_dist: DEFAULT_MAX_NODE_DIST,
            max_redundant_dist: DEFAULT_MAX_REDUNDANT_DIST,
            no_complex: DEFAULT_NO_COMPLEX,
            strict: DEFAULT_STRICT,
        }
    }
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Zero `-v` flags log at info level, one at debug, two or more at trace.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Checks if the provided file path exists.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

/// Parses `FORMAT:PATH`, splitting at the first colon so paths may contain colons.
fn parse_input_spec(s: &str) -> Result<InputSpec> {
    let (format, path) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected FORMAT:PATH, got `{}`", s))?;
    let format = format.parse::<InputFormat>().map_err(|e| {
        let known: Vec<&str> = InputFormat::ALL.iter().map(|f| f.name()).collect();
        anyhow!("{e} (expected one of: {})", known.join(", "))
    })?;
    Ok(InputSpec {
        format,
        path: check_file_exists(path)?,
    })
}
