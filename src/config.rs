//! Frozen run configuration, resolved once at startup from parsed CLI
//! arguments and never mutated afterwards (SPEC_FULL.md §3, §9).

use std::path::PathBuf;

use crate::types::Vamp;

#[derive(Debug, Clone)]
pub struct Config {
    pub min: Vamp,
    pub max: Vamp,
    pub threads: usize,
    pub manual_task_size: Option<Vamp>,
    pub checkpoint_path: Option<PathBuf>,
    pub progress: bool,
    pub dry_run: bool,
    /// Print each vampire's running index within its fang-pair column.
    pub show_index: bool,
    /// Print each vampire's numeric value.
    pub show_value: bool,
    /// Print the difference from the previous vampire printed in the
    /// same fang-pair column.
    pub show_integral: bool,
    /// Print the cumulative digest in the final summary.
    pub emit_checksum: bool,
}
