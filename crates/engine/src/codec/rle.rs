//! Run-length coding for `u32+rle` section bodies.
//!
//! A run of one value is a bare hex line. A run of `k >= 2` equal values is
//! `~<k> <value>`. The header's logical size tells readers when to stop, so
//! the body needs no terminator.

use super::hex::push_hex;

/// Streaming run-length encoder. Feed values with [`push`](Self::push) and
/// flush the trailing run with [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct RunLength {
    count: usize,
    value: u32,
    items: usize,
}

impl RunLength {
    pub const fn new() -> Self {
        Self {
            count: 0,
            value: 0,
            items: 0,
        }
    }

    pub fn push(&mut self, out: &mut String, value: u32) {
        self.items += 1;
        if self.count == 0 {
            self.count = 1;
            self.value = value;
        } else if value == self.value {
            self.count += 1;
        } else {
            self.flush(out);
            self.count = 1;
            self.value = value;
        }
    }

    /// Flush the pending run and return the number of values consumed.
    pub fn finish(self, out: &mut String) -> usize {
        self.flush(out);
        self.items
    }

    fn flush(&self, out: &mut String) {
        match self.count {
            0 => {}
            1 => {
                push_hex(out, self.value);
                out.push('\n');
            }
            n => {
                out.push('~');
                push_hex(out, n as u64);
                out.push(' ');
                push_hex(out, self.value);
                out.push('\n');
            }
        }
    }
}

/// Encode a whole column, returning how many values it contained.
pub fn encode<I>(out: &mut String, values: I) -> usize
where
    I: IntoIterator<Item = u32>,
{
    let mut rle = RunLength::new();
    for value in values {
        rle.push(out, value);
    }
    rle.finish(out)
}
