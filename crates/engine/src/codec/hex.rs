//! Lowercase, unpadded hexadecimal: the only number format in the output.

use std::fmt::Write;

/// Append `value` as lowercase hex: no prefix, no leading zeros, `0` for zero.
///
/// Only unsigned inputs are accepted; signed quantities must be mapped onto
/// `u32`/`u64` by the caller (see [`super::delta`]).
#[inline]
pub fn push_hex(out: &mut String, value: impl Into<u64>) {
    // Formatting into a String is infallible.
    let _ = write!(out, "{:x}", value.into());
}

/// Append `items` as space-separated hex.
pub fn push_hex_row(out: &mut String, items: &[u32]) {
    for (i, &item) in items.iter().enumerate() {
        if i != 0 {
            out.push(' ');
        }
        push_hex(out, item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(value: u64) -> String {
        let mut s = String::new();
        push_hex(&mut s, value);
        s
    }

    #[test]
    fn test_zero_is_single_digit() {
        assert_eq!(hex(0), "0");
    }

    #[test]
    fn test_lowercase_no_padding() {
        assert_eq!(hex(0xA), "a");
        assert_eq!(hex(0x3f80_0000), "3f800000");
        assert_eq!(hex(u64::MAX), "ffffffffffffffff");
        assert_eq!(hex(u32::MAX as u64), "ffffffff");
    }

    #[test]
    fn test_row() {
        let mut s = String::new();
        push_hex_row(&mut s, &[0, 10, 255]);
        assert_eq!(s, "0 a ff");

        s.clear();
        push_hex_row(&mut s, &[]);
        assert_eq!(s, "");
    }
}
