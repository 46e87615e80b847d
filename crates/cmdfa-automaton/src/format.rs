//! Formatting helpers shared by the dump and the match tracer.

/// Minimum width needed to display numbers up to `count - 1`.
pub fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

/// Final-state marker column.
pub(crate) const FINAL_MARK: &str = "◉";
