//! Coarse cell to full-precision range expansion.

use georange_types::range::HashRange;

/// Expand one cell code at `bits` into the range of `full_bits` codes it
/// covers, or `None` when the upper bound overflows `u64`.
///
/// Only the numerically last cell can overflow: its exclusive upper bound
/// would be `2^64`, which wraps to zero. That range is dropped.
///
/// `bits` must not exceed `full_bits`.
pub fn expand_cell(code: u64, bits: u32, full_bits: u32) -> Option<HashRange> {
    let shift = full_bits.saturating_sub(bits);
    let min = code.checked_shl(shift).unwrap_or(0);
    let max = code.wrapping_add(1).checked_shl(shift).unwrap_or(0);

    if min >= max {
        log::trace!(
            "dropping cell {:#x} at {} bits: range [{:#x}, {:#x}) overflows",
            code,
            bits,
            min,
            max
        );
        return None;
    }
    Some(HashRange::new(min, max))
}

/// Like [`expand_cell`], but the numerically last cell is cut short instead of
/// dropped: it keeps every code below `u64::MAX`, so only that single final
/// code is lost.
pub fn expand_cell_saturating(code: u64, bits: u32, full_bits: u32) -> Option<HashRange> {
    expand_cell(code, bits, full_bits).or_else(|| {
        let min = code.checked_shl(full_bits.saturating_sub(bits)).unwrap_or(0);
        (min < u64::MAX).then(|| {
            log::trace!("keeping cell {:#x} at {} bits up to the last code", code, bits);
            HashRange::new(min, u64::MAX)
        })
    })
}

/// Expand every cell, discarding the ones that overflow. Output order follows
/// the input.
pub fn expand<I>(cells: I, bits: u32, full_bits: u32) -> Vec<HashRange>
where
    I: IntoIterator<Item = u64>,
{
    cells
        .into_iter()
        .filter_map(|code| expand_cell(code, bits, full_bits))
        .collect()
}

/// [`expand`] with [`expand_cell_saturating`].
pub fn expand_saturating<I>(cells: I, bits: u32, full_bits: u32) -> Vec<HashRange>
where
    I: IntoIterator<Item = u64>,
{
    cells
        .into_iter()
        .filter_map(|code| expand_cell_saturating(code, bits, full_bits))
        .collect()
}
