//! Driver: walks length classes and runs the task-board/pool over each
//! (SPEC_FULL.md §2.1, mirroring the original's `main` loop).

use crate::board::TaskBoard;
use crate::cache::DigitCache;
use crate::config::Config;
use crate::error::DriverError;
use crate::interval::{self, Interval};
use crate::partition;
use crate::pool;
use crate::task::MAX_FANG_PAIRS;
use crate::types::Vamp;

#[derive(Debug, Clone)]
pub struct Summary {
    pub total_vampires: u64,
    pub common_count: [u64; MAX_FANG_PAIRS],
    pub digest_hex: String,
}

/// Caps how far a single length class may run, matching the
/// original's one-class-at-a-time walk so the task-board never spans
/// a factor-length boundary.
fn class_ceiling(lmin: Vamp, max: Vamp) -> Vamp {
    let class_top = interval::pow(interval::length(lmin)) - 1;
    class_top.min(max)
}

pub fn run(config: &Config) -> Result<Summary, DriverError> {
    let mut interval = Interval::new(config.min, config.max)?;

    if interval.is_empty() {
        return Ok(Summary {
            total_vampires: 0,
            common_count: [0; MAX_FANG_PAIRS],
            digest_hex: "0".repeat(64),
        });
    }

    let mut common_count = [0u64; MAX_FANG_PAIRS];
    let mut common_prev = [0 as Vamp; MAX_FANG_PAIRS];
    let mut digest = [0u8; 32];

    if let Some(path) = &config.checkpoint_path {
        if let Some((_, resume)) = crate::checkpoint::resolve(Some(path), interval.min, interval.max)? {
            if let Some(resume) = resume {
                interval.set_complete(resume.complete)?;
                common_count = resume.count;
                if let Some(hex) = &resume.checksum_hex {
                    digest = decode_hex(hex);
                }
            }
        }
    }

    let max_length = interval::length(interval.max);
    let cache = DigitCache::build(partition::plan(max_length, partition::DEFAULT_CACHE_BUDGET));

    let mut complete = interval.complete;

    while complete < interval.max as i128 {
        let lmin = (complete + 1) as Vamp;
        let lmax = class_ceiling(lmin, interval.max);

        let fang_length = interval::length(lmin) / 2;
        let fmax = interval::pow(fang_length) - 1;

        if lmax >= lmin && !config.dry_run {
            let board = TaskBoard::resuming(
                lmin,
                lmax,
                config.threads,
                config.manual_task_size,
                common_count,
                common_prev,
                digest,
            )
            .with_checkpoint(config.checkpoint_path.clone(), config.progress)
            .with_display(config.show_index, config.show_value, config.show_integral);

            pool::run(&board, &cache, fmax, config.threads);
            common_count = board.common_count();
            common_prev = board.common_prev();
            digest = board.digest_bytes();
        }

        complete = lmax as i128;
    }

    Ok(Summary {
        total_vampires: common_count[0],
        common_count,
        digest_hex: digest.iter().map(|b| format!("{b:02x}")).collect(),
    })
}

fn decode_hex(hex: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, chunk) in hex.as_bytes().chunks(2).take(32).enumerate() {
        if let Ok(s) = std::str::from_utf8(chunk) {
            if let Ok(b) = u8::from_str_radix(s, 16) {
                out[i] = b;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(min: u64, max: u64) -> Config {
        Config {
            min,
            max,
            threads: 1,
            manual_task_size: None,
            checkpoint_path: None,
            progress: false,
            dry_run: false,
            show_index: false,
            show_value: false,
            show_integral: false,
            emit_checksum: false,
        }
    }

    #[test]
    fn single_known_vampire() {
        let summary = run(&config(1260, 1260)).unwrap();
        assert_eq!(summary.total_vampires, 1);
    }

    #[test]
    fn seven_four_digit_vampires() {
        // The seven 4-digit vampire numbers: 1260, 1395, 1435, 1530, 1827, 2187, 6880.
        let summary = run(&config(1000, 9999)).unwrap();
        assert_eq!(summary.total_vampires, 7);
    }

    #[test]
    #[ignore = "scans all 900000 six-digit numbers; run explicitly with --ignored"]
    fn six_digit_vampire_count() {
        let summary = run(&config(100_000, 999_999)).unwrap();
        assert_eq!(summary.total_vampires, 148);
    }

    #[test]
    fn no_vampires_below_100() {
        let summary = run(&config(0, 99)).unwrap();
        assert_eq!(summary.total_vampires, 0);
    }

    #[test]
    fn empty_odd_length_interval() {
        let summary = run(&config(16, 19)).unwrap();
        assert_eq!(summary.total_vampires, 0);
    }

    #[test]
    fn thread_count_does_not_change_result() {
        let mut single = config(0, 1_000_000);
        single.threads = 1;
        let mut multi = config(0, 1_000_000);
        multi.threads = 8;

        let a = run(&single).unwrap();
        let b = run(&multi).unwrap();
        assert_eq!(a.total_vampires, b.total_vampires);
        assert_eq!(a.common_count, b.common_count);
        assert_eq!(a.digest_hex, b.digest_hex);
    }
}
