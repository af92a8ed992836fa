//! Delta coding for densely increasing id columns.
//!
//! Each row becomes `value - prev - 1` with `prev` starting at -1, so a run
//! of adjacent ids turns into a run of zeros that [`super::rle`] folds into
//! one line. Arithmetic is modulo 2^32: a decreasing step (e.g. two
//! consecutive items both mapping to air) wraps to a large unsigned value,
//! and readers undo it with wrapping addition.

/// Per-column delta state. Start a fresh one for every column.
#[derive(Debug, Clone, Copy)]
pub struct Delta {
    prev: u32,
}

impl Delta {
    /// `prev = -1`.
    pub const fn new() -> Self {
        Self { prev: u32::MAX }
    }

    pub fn next(&mut self, value: u32) -> u32 {
        let delta = value.wrapping_sub(self.prev).wrapping_sub(1);
        self.prev = value;
        delta
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::new()
    }
}

/// Delta-code a column with fresh state.
pub fn deltas<I>(values: I) -> impl Iterator<Item = u32>
where
    I: IntoIterator<Item = u32>,
{
    let mut delta = Delta::new();
    values.into_iter().map(move |v| delta.next(v))
}
