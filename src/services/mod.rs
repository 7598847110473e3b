pub mod distance;
pub mod games;
pub mod highscores;
pub mod runs;

use std::ops::Range;

/// Index range for `[start, stop)` over `len` items, where negative bounds
/// count back from the end and out-of-range bounds clamp.
pub fn slice_window(len: usize, start: i64, stop: i64) -> Range<usize> {
    let clamp = |bound: i64| -> usize {
        let len = len as i64;
        let bound = if bound < 0 { bound + len } else { bound };
        bound.clamp(0, len) as usize
    };
    let (start, stop) = (clamp(start), clamp(stop));
    start..stop.max(start)
}
