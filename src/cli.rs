//! Command-line surface (SPEC_FULL.md §6).

use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::ArgsError;

/// Compile-time constants this build was produced with.
pub const BUILDCONF: &str = concat!(
    "base = ", "10", "\n",
    "min_fang_pairs = ", "1", "\n",
    "max_fang_pairs = ", "8", "\n",
    "partition_method = ", "semi-constant-semi-global", "\n",
);

#[derive(Parser, Debug)]
#[command(name = "vampire-hunt", about = "Searches an integer interval for vampire numbers")]
pub struct Cli {
    /// Lower bound of the scan interval.
    #[arg(short = 'l', long = "lower-bound")]
    pub lower_bound: Option<u64>,

    /// Upper bound of the scan interval.
    #[arg(short = 'u', long = "upper-bound")]
    pub upper_bound: Option<u64>,

    /// Shorthand for the interval [BASE^(K-1), BASE^K - 1].
    #[arg(short = 'n', conflicts_with_all = ["lower_bound", "upper_bound"])]
    pub length: Option<u32>,

    /// Worker thread count.
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Override automatic task slicing.
    #[arg(short = 's', long = "manual-task-size")]
    pub manual_task_size: Option<u64>,

    /// Checkpoint file to create or resume from.
    #[arg(short = 'c', long = "checkpoint")]
    pub checkpoint: Option<PathBuf>,

    /// Print one line per finalized task to stderr.
    #[arg(long)]
    pub progress: bool,

    /// Resolve the interval and configuration, then exit without scanning.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the compile-time configuration and exit.
    #[arg(long)]
    pub buildconf: bool,

    /// Prefix each printed vampire with its running index within its
    /// fang-pair column.
    #[arg(long = "show-index")]
    pub show_index: bool,

    /// Print each vampire's numeric value.
    #[arg(long = "show-value")]
    pub show_value: bool,

    /// Print the difference from the previously printed vampire in the
    /// same fang-pair column.
    #[arg(long = "show-integral")]
    pub show_integral: bool,

    /// Print the cumulative digest in the final summary.
    #[arg(long = "checksum")]
    pub emit_checksum: bool,
}

impl Cli {
    /// Resolves parsed arguments into a frozen [`Config`], prompting on
    /// stdin for the two bounds if neither `-n` nor `-l`/`-u` nor a
    /// checkpoint path were given.
    pub fn into_config(self) -> Result<Config, ArgsError> {
        let threads = match self.threads {
            Some(0) => return Err(ArgsError::ZeroThreads),
            Some(t) => t,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        };

        let (min, max) = if let Some(k) = self.length {
            let lo = crate::interval::pow(k.saturating_sub(1).max(1));
            let hi = crate::interval::pow(k) - 1;
            (lo, hi)
        } else if let (Some(lo), Some(hi)) = (self.lower_bound, self.upper_bound) {
            (lo, hi)
        } else if self.lower_bound.is_some() || self.upper_bound.is_some() {
            return Err(ArgsError::PartialBounds);
        } else {
            prompt_for_bounds()?
        };

        Ok(Config {
            min,
            max,
            threads,
            manual_task_size: self.manual_task_size,
            checkpoint_path: self.checkpoint,
            progress: self.progress,
            dry_run: self.dry_run,
            show_index: self.show_index,
            show_value: self.show_value,
            show_integral: self.show_integral,
            emit_checksum: self.emit_checksum,
        })
    }
}

fn prompt_for_bounds() -> Result<(u64, u64), ArgsError> {
    eprint!("enter lower and upper bound: ");
    let stdin = std::io::stdin();
    let mut line = String::new();
    let read = stdin
        .lock()
        .read_line(&mut line)
        .map_err(|_| ArgsError::MissingInteractiveBounds)?;
    if read == 0 {
        return Err(ArgsError::MissingInteractiveBounds);
    }
    let mut tokens = line.split_whitespace();
    let lo = parse(tokens.next())?;
    let hi = parse(tokens.next())?;
    Ok((lo, hi))
}

fn parse(token: Option<&str>) -> Result<u64, ArgsError> {
    let token = token.ok_or(ArgsError::MissingInteractiveBounds)?;
    token
        .parse()
        .map_err(|_| ArgsError::NotAnInteger(token.to_owned()))
}
