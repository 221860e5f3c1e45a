//! Task-board: slices a length class into tasks, hands them out under
//! an intake lock, and finalizes them strictly in ascending order under
//! an output lock (SPEC_FULL.md §4.5).

use std::path::PathBuf;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::checkpoint;
use crate::task::{Task, TaskResult, MAX_FANG_PAIRS, MIN_FANG_PAIRS};
use crate::types::Vamp;

/// Caps the size of a single task's sub-interval so no worker's result
/// buffer grows unboundedly even on a very sparse length class.
pub const MAX_TASK_SIZE: Vamp = 50_000_000;

/// Computes how many tasks to slice `[lmin, lmax]` into: roughly four
/// per thread plus two, capped at [`MAX_TASK_SIZE`] per task, or an
/// explicit override.
pub fn task_count(lmin: Vamp, lmax: Vamp, threads: usize, manual_task_size: Option<Vamp>) -> usize {
    let span = lmax - lmin + 1;
    let task_size = manual_task_size
        .unwrap_or_else(|| (span / (4 * threads as Vamp + 2)).max(1))
        .min(MAX_TASK_SIZE)
        .max(1);
    ((span + task_size - 1) / task_size) as usize
}

/// Chains one more product into a running digest: `H(prev || product)`,
/// not a single streaming hash over the concatenation of every
/// product. This lets a board pick up where a previous length class
/// (or a resumed checkpoint) left off just by being handed the last 32
/// digest bytes, with no need to replay earlier products.
fn chain(prev: [u8; 32], product: Vamp) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(prev);
    hasher.update(product.to_be_bytes());
    hasher.finalize().into()
}

struct Intake {
    tasks: Vec<Task>,
    todo: usize,
}

struct Output {
    results: Vec<Option<TaskResult>>,
    /// `lmax` of each task, in task order, so a finalized task can be
    /// checkpointed without the output lock needing access to `Intake`.
    task_lmax: Vec<Vamp>,
    done: usize,
    common_count: [u64; MAX_FANG_PAIRS],
    /// Last-printed product per fang-pair column, for the `show_integral` delta.
    common_prev: [Vamp; MAX_FANG_PAIRS],
    digest: [u8; 32],
    checkpoint_path: Option<PathBuf>,
    progress: bool,
    show_index: bool,
    show_value: bool,
    show_integral: bool,
}

/// Shared state for one length class's worth of tasks. Exactly two
/// mutexes guard it, matching the concurrency contract: the intake
/// lock only ever protects popping the next task index, the output
/// lock only ever protects installing a result and draining completed
/// tasks in order.
pub struct TaskBoard {
    intake: Mutex<Intake>,
    output: Mutex<Output>,
}

impl TaskBoard {
    pub fn new(lmin: Vamp, lmax: Vamp, threads: usize, manual_task_size: Option<Vamp>) -> Self {
        Self::resuming(
            lmin,
            lmax,
            threads,
            manual_task_size,
            [0; MAX_FANG_PAIRS],
            [0; MAX_FANG_PAIRS],
            [0u8; 32],
        )
    }

    /// Like [`TaskBoard::new`], but seeded with accumulated state from
    /// a previous length class or a resumed checkpoint.
    pub fn resuming(
        lmin: Vamp,
        lmax: Vamp,
        threads: usize,
        manual_task_size: Option<Vamp>,
        common_count: [u64; MAX_FANG_PAIRS],
        common_prev: [Vamp; MAX_FANG_PAIRS],
        digest: [u8; 32],
    ) -> Self {
        let n = task_count(lmin, lmax, threads, manual_task_size);
        let span = lmax - lmin + 1;
        let task_size = (span + n as Vamp - 1) / n as Vamp;

        let mut tasks = Vec::with_capacity(n);
        let mut cursor = lmin;
        for i in 0..n {
            let hi = if i == n - 1 {
                lmax
            } else {
                (cursor + task_size - 1).min(lmax)
            };
            tasks.push(Task::new(cursor, hi));
            cursor = hi + 1;
        }

        let task_lmax = tasks.iter().map(|t| t.lmax).collect();
        let results = (0..n).map(|_| None).collect();

        TaskBoard {
            intake: Mutex::new(Intake { tasks, todo: 0 }),
            output: Mutex::new(Output {
                results,
                task_lmax,
                done: 0,
                common_count,
                common_prev,
                digest,
                checkpoint_path: None,
                progress: false,
                show_index: false,
                show_value: false,
                show_integral: false,
            }),
        }
    }

    pub fn with_checkpoint(self, path: Option<PathBuf>, progress: bool) -> Self {
        {
            let mut output = self.output.lock().unwrap();
            output.checkpoint_path = path;
            output.progress = progress;
        }
        self
    }

    /// Selects which per-vampire tokens [`TaskBoard::install`]'s drain
    /// pass prints to stdout (SPEC_FULL.md §6 "Stdout format").
    pub fn with_display(self, show_index: bool, show_value: bool, show_integral: bool) -> Self {
        {
            let mut output = self.output.lock().unwrap();
            output.show_index = show_index;
            output.show_value = show_value;
            output.show_integral = show_integral;
        }
        self
    }

    /// Intake: pops the next task's bounds, or `None` once exhausted.
    pub fn get_task(&self) -> Option<(usize, Vamp, Vamp)> {
        let mut intake = self.intake.lock().unwrap();
        if intake.todo >= intake.tasks.len() {
            return None;
        }
        let index = intake.todo;
        let task = intake.tasks[index].clone();
        intake.todo += 1;
        Some((index, task.lmin, task.lmax))
    }

    /// Output: installs a completed task's result, then drains every
    /// completed task still pending in ascending index order.
    pub fn install(&self, index: usize, result: TaskResult) {
        let mut output = self.output.lock().unwrap();
        output.results[index] = Some(result);
        self.drain(&mut output);
    }

    /// Finalizes every task whose result has landed, in ascending
    /// index order: prints its vampires, folds it into the running
    /// digest and bucket counts, and appends one checkpoint line per
    /// task — not once per length class — so a crash mid-class loses
    /// at most the in-flight tasks, never the whole class.
    fn drain(&self, output: &mut Output) {
        while output.done < output.results.len() {
            let Some(result) = output.results[output.done].take() else {
                break;
            };

            let mut local_count = output.common_count;
            let print = output.show_index || output.show_value || output.show_integral;
            for (product, clipped) in &result.pairs {
                for column in (MIN_FANG_PAIRS - 1)..(*clipped as usize) {
                    local_count[column] += 1;
                    if print {
                        print_record(output, &local_count, column, *product);
                    }
                }
                output.digest = chain(output.digest, *product);
            }

            for (slot, delta) in output.common_count.iter_mut().zip(result.count.iter()) {
                *slot += delta;
            }

            if let Some(path) = &output.checkpoint_path {
                let digest_hex = hex::encode(output.digest);
                let lmax = output.task_lmax[output.done];
                let _ = checkpoint::save(path, lmax, &output.common_count, &digest_hex);
            }

            output.done += 1;

            if output.progress {
                eprintln!("done {}/{}", output.done, output.results.len());
            }
        }
    }

    pub fn is_drained(&self) -> bool {
        let output = self.output.lock().unwrap();
        output.done == output.results.len()
    }

    pub fn common_count(&self) -> [u64; MAX_FANG_PAIRS] {
        self.output.lock().unwrap().common_count
    }

    pub fn common_prev(&self) -> [Vamp; MAX_FANG_PAIRS] {
        self.output.lock().unwrap().common_prev
    }

    pub fn digest_bytes(&self) -> [u8; 32] {
        self.output.lock().unwrap().digest
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest_bytes())
    }
}

/// Prints one vampire's record for a single fang-pair column: tab-indented
/// by `column`, then `index`/`value`/`integral` tokens selected by the
/// board's display flags, matching the original engine's `array_print`.
fn print_record(output: &mut Output, local_count: &[u64; MAX_FANG_PAIRS], column: usize, product: Vamp) {
    let mut line = "\t".repeat(column);
    if output.show_index {
        line.push_str(&local_count[column].to_string());
        line.push(' ');
    }
    if output.show_value {
        line.push_str(&product.to_string());
        line.push(' ');
    }
    if output.show_integral {
        line.push_str(&(product - output.common_prev[column]).to_string());
        line.push(' ');
        output.common_prev[column] = product;
    }
    println!("{line}");
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        use std::fmt::Write;
        let mut out = String::with_capacity(bytes.as_ref().len() * 2);
        for byte in bytes.as_ref() {
            write!(out, "{byte:02x}").unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_whole_range_without_gaps() {
        let board = TaskBoard::new(1000, 1999, 4, None);
        let mut seen = Vec::new();
        while let Some((index, lmin, lmax)) = board.get_task() {
            seen.push((index, lmin, lmax));
        }
        seen.sort_by_key(|(i, ..)| *i);
        assert_eq!(seen.first().unwrap().1, 1000);
        assert_eq!(seen.last().unwrap().2, 1999);
        for w in seen.windows(2) {
            assert_eq!(w[0].2 + 1, w[1].1);
        }
    }

    #[test]
    fn drains_strictly_in_order_even_when_installed_out_of_order() {
        let board = TaskBoard::new(0, 999, 2, Some(250));
        let mut indices = Vec::new();
        while let Some((index, ..)) = board.get_task() {
            indices.push(index);
        }
        assert_eq!(indices, vec![0, 1, 2, 3]);

        // install out of order: drain must not advance past the lowest
        // index still missing.
        board.install(2, TaskResult::default());
        assert!(!board.is_drained());
        board.install(1, TaskResult::default());
        assert!(!board.is_drained());
        board.install(0, TaskResult::default());
        assert!(!board.is_drained()); // index 3 still missing
        board.install(3, TaskResult::default());
        assert!(board.is_drained());
    }

    #[test]
    fn digest_chains_deterministically() {
        let a = chain([0; 32], 1260);
        let b = chain([0; 32], 1260);
        assert_eq!(a, b);
        let c = chain(a, 6880);
        assert_ne!(a, c);
    }

    #[test]
    fn common_prev_tracks_last_printed_product_per_column() {
        let board = TaskBoard::new(1000, 1999, 1, None).with_display(false, true, true);
        board.get_task();
        let mut result = TaskResult::default();
        result.pairs.push((1260, 1));
        result.count[0] = 1;
        board.install(0, result);
        assert_eq!(board.common_prev()[0], 1260);
    }

    #[test]
    fn checkpoints_once_per_finalized_task_not_once_per_class() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::remove_file(file.path()).ok();
        crate::checkpoint::touch(file.path(), 0, 999).unwrap();

        let board =
            TaskBoard::new(0, 999, 2, Some(250)).with_checkpoint(Some(file.path().to_path_buf()), false);
        let mut seen = Vec::new();
        while let Some((index, ..)) = board.get_task() {
            seen.push(index);
        }
        for index in seen {
            board.install(index, TaskResult::default());
        }

        let contents = std::fs::read_to_string(file.path()).unwrap();
        // one header line plus one line per task (4 tasks for this slicing).
        assert_eq!(contents.lines().count(), 5);
    }
}
