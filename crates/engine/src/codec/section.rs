//! Section framing.
//!
//! ```text
//! ;<name>;<type-tag>;<size-hex>
//! <body line>        (size lines, fewer for u32+rle)
//! ```
//!
//! `name` may carry a `#` followed by a human-readable field description;
//! it has no machine meaning. `size` is always the logical item count.

use super::hex::{push_hex, push_hex_row};
use super::rle;
use crate::error::EncodeError;

/// Closed set of body encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Str,
    U32,
    U64,
    U32List,
    U32Rle,
}

impl TypeTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeTag::Str => "str",
            TypeTag::U32 => "u32",
            TypeTag::U64 => "u64",
            TypeTag::U32List => "[u32]",
            TypeTag::U32Rle => "u32+rle",
        }
    }
}

/// Writes sections into a borrowed scratch buffer.
///
/// Every typed writer takes the declared size up front, writes the header,
/// streams the body and then checks that the iterator produced exactly that
/// many items.
pub struct Encoder<'a> {
    out: &'a mut String,
}

impl<'a> Encoder<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }

    /// Raw header line. Prefer the typed writers below.
    pub fn head(&mut self, name: &str, tag: TypeTag, size: usize) {
        tracing::trace!(section = name, tag = tag.as_str(), size, "section");
        self.out.push(';');
        self.out.push_str(name);
        self.out.push(';');
        self.out.push_str(tag.as_str());
        self.out.push(';');
        push_hex(self.out, size as u64);
        self.out.push('\n');
    }

    /// A bare text line (version and tag files have no section framing).
    pub fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn hex_line(&mut self, value: impl Into<u64>) {
        push_hex(self.out, value);
        self.out.push('\n');
    }

    /// A line of hex ids, each followed by a space (tag member lists).
    pub fn hex_terms_line(&mut self, values: &[u32]) {
        for &value in values {
            push_hex(self.out, value);
            self.out.push(' ');
        }
        self.out.push('\n');
    }

    pub fn strings<I, S>(&mut self, name: &str, size: usize, items: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.head(name, TypeTag::Str, size);
        let mut written = 0;
        for item in items {
            self.line(item.as_ref());
            written += 1;
        }
        check(name, size, written)
    }

    pub fn u32s<I>(&mut self, name: &str, size: usize, items: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = u32>,
    {
        self.head(name, TypeTag::U32, size);
        let mut written = 0;
        for item in items {
            self.hex_line(item);
            written += 1;
        }
        check(name, size, written)
    }

    pub fn u64s<I>(&mut self, name: &str, size: usize, items: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = u64>,
    {
        self.head(name, TypeTag::U64, size);
        let mut written = 0;
        for item in items {
            self.hex_line(item);
            written += 1;
        }
        check(name, size, written)
    }

    /// `[u32]` rows: space-separated hex, one row per line. Empty rows are empty lines.
    pub fn lists<I, R>(&mut self, name: &str, size: usize, rows: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u32]>,
    {
        self.head(name, TypeTag::U32List, size);
        let mut written = 0;
        for row in rows {
            push_hex_row(self.out, row.as_ref());
            self.out.push('\n');
            written += 1;
        }
        check(name, size, written)
    }

    pub fn rle<I>(&mut self, name: &str, size: usize, values: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = u32>,
    {
        self.head(name, TypeTag::U32Rle, size);
        let written = rle::encode(self.out, values);
        check(name, size, written)
    }
}

fn check(section: &str, declared: usize, written: usize) -> Result<(), EncodeError> {
    if declared == written {
        Ok(())
    } else {
        Err(EncodeError::SizeMismatch {
            section: section.to_owned(),
            declared,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_format() {
        let mut buf = String::new();
        Encoder::new(&mut buf).head("block_state", TypeTag::U32Rle, 0x4a0);
        assert_eq!(buf, ";block_state;u32+rle;4a0\n");
    }

    #[test]
    fn test_header_keeps_description() {
        let mut buf = String::new();
        Encoder::new(&mut buf).head("settings#a b c", TypeTag::U32List, 2);
        let (name, rest) = buf[1..].trim_end().split_once(';').unwrap();
        assert_eq!(name, "settings#a b c");
        assert_eq!(rest, "[u32];2");
    }

    #[test]
    fn test_string_section() {
        let mut buf = String::new();
        Encoder::new(&mut buf)
            .strings("fluid", 2, ["empty", "water"])
            .unwrap();
        assert_eq!(buf, ";fluid;str;2\nempty\nwater\n");
    }

    #[test]
    fn test_list_section_with_empty_row() {
        let mut buf = String::new();
        let rows: [&[u32]; 2] = [&[], &[0, 0xb, 1]];
        Encoder::new(&mut buf).lists("p", 2, rows).unwrap();
        assert_eq!(buf, ";p;[u32];2\n\n0 b 1\n");
    }

    #[test]
    fn test_u64_section() {
        let mut buf = String::new();
        Encoder::new(&mut buf)
            .u64s("float64_table", 2, [0u64, 0x3ff0_0000_0000_0000])
            .unwrap();
        assert_eq!(buf, ";float64_table;u64;2\n0\n3ff0000000000000\n");
    }

    #[test]
    fn test_rle_size_is_logical() {
        let mut buf = String::new();
        Encoder::new(&mut buf).rle("c", 6, [5, 5, 5, 7, 7, 9]).unwrap();
        assert_eq!(buf, ";c;u32+rle;6\n~3 5\n~2 7\n9\n");
    }

    #[test]
    fn test_size_mismatch_is_reported() {
        let mut buf = String::new();
        let err = Encoder::new(&mut buf).rle("c", 3, [1, 2]).unwrap_err();
        assert_eq!(
            err,
            EncodeError::SizeMismatch {
                section: "c".into(),
                declared: 3,
                written: 2,
            }
        );
    }

    #[test]
    fn test_terms_line_has_trailing_space() {
        let mut buf = String::new();
        Encoder::new(&mut buf).hex_terms_line(&[1, 0x1f]);
        assert_eq!(buf, "1 1f \n");
    }
}
