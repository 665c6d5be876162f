use std::num::NonZeroUsize;
use std::ops::Range;

/// Number of workers to use when none is configured.
///
/// Falls back to a single worker if the available parallelism cannot be queried.
pub fn default_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Splits `0..n` into at most `workers` contiguous ranges.
///
/// The ranges are in increasing order, do not overlap, cover `0..n` exactly
/// and differ in length by at most one. No range is empty, so `n == 0` gives
/// no ranges at all.
pub fn partition(n: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let chunks = workers.get().min(n);
    let (base, extra) = (n / chunks, n % chunks);
    let mut start = 0;
    (0..chunks)
        .map(|chunk| {
            let len = base + usize::from(chunk < extra);
            let range = start..start + len;
            start = range.end;
            range
        })
        .collect()
}

/// Cuts `slots` into the disjoint mutable slices matching `ranges`.
///
/// `ranges` must be contiguous and start at `0`, as returned by [`partition`].
pub(crate) fn split_mut<'a, T>(slots: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut rest = slots;
    ranges
        .iter()
        .map(|range| {
            let remaining = std::mem::take(&mut rest);
            let (head, tail) = remaining.split_at_mut(range.len());
            rest = tail;
            head
        })
        .collect()
}
