//! Contiguous chunking of an index range.

use std::ops::Range;

/// Splits `0..len` into `divisions` contiguous ranges in ascending order.
///
/// Every range but the last spans `len / divisions` items; the last one also
/// takes the remainder. When `len < divisions` the leading ranges are empty.
pub(crate) fn chunk_ranges(len: usize, divisions: usize) -> Vec<Range<usize>> {
    let divisions = divisions.max(1);
    let chunk = len / divisions;
    (0..divisions)
        .map(|index| {
            let start = index * chunk;
            let end = if index + 1 == divisions {
                len
            } else {
                start + chunk
            };
            start..end
        })
        .collect()
}
