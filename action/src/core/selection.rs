//! Truncation policy applied to discovered documents.

/// Documents retained for processing plus what was cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    /// Retained entries, in enumeration order.
    pub retained: Vec<T>,
    /// How many entries were found before truncation.
    pub found: usize,
}

impl<T> Selection<T> {
    pub fn overflow(&self) -> usize {
        self.found - self.retained.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.overflow() > 0
    }
}

/// Keep the first `max` entries without reordering.
pub fn truncate_to_max<T>(mut found: Vec<T>, max: usize) -> Selection<T> {
    let count = found.len();
    found.truncate(max);
    Selection {
        retained: found,
        found: count,
    }
}
