//! Worker pool: a fixed-size set of OS threads draining one task-board.
//!
//! Collapses to a plain loop on the calling thread when `threads <= 1`,
//! so a single-threaded run never pays for a mutex it doesn't need.

use crate::board::TaskBoard;
use crate::cache::DigitCache;
use crate::kernel;
use crate::task;
use crate::types::Vamp;

fn worker_loop(board: &TaskBoard, cache: &DigitCache, fmax: Vamp) {
    while let Some((index, lmin, lmax)) = board.get_task() {
        let mut raw = Vec::new();
        kernel::search(lmin, lmax, fmax, cache, &mut raw);
        let result = task::summarize(raw);
        board.install(index, result);
    }
}

/// Runs every task currently on `board` to completion using `threads`
/// workers (or none, if the board is already empty).
pub fn run(board: &TaskBoard, cache: &DigitCache, fmax: Vamp, threads: usize) {
    if threads <= 1 {
        worker_loop(board, cache, fmax);
        return;
    }
    std::thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| worker_loop(board, cache, fmax));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition;

    #[test]
    fn single_and_multi_threaded_agree() {
        let cache = DigitCache::build(partition::plan(4, partition::DEFAULT_CACHE_BUDGET));

        let board1 = TaskBoard::new(1000, 9999, 1, None);
        run(&board1, &cache, 99, 1);
        assert!(board1.is_drained());
        let single = board1.common_count();

        let board8 = TaskBoard::new(1000, 9999, 8, None);
        run(&board8, &cache, 99, 8);
        assert!(board8.is_drained());
        let multi = board8.common_count();

        assert_eq!(single, multi);
        assert_eq!(board1.digest_hex(), board8.digest_hex());
    }
}
