//! Structural interning.
//!
//! Every table assigns dense ids from 0 in first-seen order and never
//! reassigns them. Seeded entries count toward the id space.

pub mod table;
pub mod value;

pub use table::{Id, InternTable};
pub use value::{Aabb, F32Bits, F64Bits};

/// f32 table seeded with `0.0 -> 0`, `1.0 -> 1`.
pub fn float32_table() -> InternTable<F32Bits> {
    InternTable::seeded([F32Bits::from(0.0f32), F32Bits::from(1.0f32)])
}

/// f64 table seeded with `0.0 -> 0`, `1.0 -> 1`.
pub fn float64_table() -> InternTable<F64Bits> {
    InternTable::seeded([F64Bits::from(0.0f64), F64Bits::from(1.0f64)])
}

/// Integer-tuple table whose id 0 is the empty tuple.
pub fn tuple_table_with_empty() -> InternTable<Vec<u32>> {
    InternTable::seeded([Vec::new()])
}

/// Collapse a per-state id list to a single entry when every entry is equal.
///
/// Readers expand a 1-tuple back to the block's state count.
pub fn collapse_uniform(ids: &mut Vec<u32>) {
    if let Some((&first, rest)) = ids.split_first() {
        if rest.iter().all(|&id| id == first) {
            ids.truncate(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_seeds() {
        let mut f32s = float32_table();
        assert_eq!(f32s.intern(F32Bits::from(1.0f32)), 1);
        assert_eq!(f32s.intern(F32Bits::from(0.0f32)), 0);
        assert_eq!(f32s.intern(F32Bits::from(0.6f32)), 2);
        assert_eq!(f32s.len(), 3);

        let mut f64s = float64_table();
        assert_eq!(f64s.intern(F64Bits::from(0.5)), 2);
        assert_eq!(f64s.intern(F64Bits::from(1.0)), 1);
    }

    #[test]
    fn test_negative_zero_is_distinct() {
        let mut f64s = float64_table();
        assert_eq!(f64s.intern(F64Bits::from(-0.0)), 2);
    }

    #[test]
    fn test_empty_tuple_seed() {
        let mut t = tuple_table_with_empty();
        assert_eq!(t.intern_ref::<[u32]>(&[]), 0);
        assert_eq!(t.intern_ref(&[0u32][..]), 1);
    }

    #[test]
    fn test_collapse_uniform() {
        let mut ids = vec![3, 3, 3, 3];
        collapse_uniform(&mut ids);
        assert_eq!(ids, [3]);

        let mut ids = vec![3, 4, 3];
        collapse_uniform(&mut ids);
        assert_eq!(ids, [3, 4, 3]);

        let mut ids = vec![7];
        collapse_uniform(&mut ids);
        assert_eq!(ids, [7]);

        let mut ids: Vec<u32> = vec![];
        collapse_uniform(&mut ids);
        assert!(ids.is_empty());
    }
}
