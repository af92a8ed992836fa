//! Interning keys for floating-point data.
//!
//! Floats are keyed by their IEEE-754 bit pattern, so `-0.0` and `0.0` are
//! distinct entries and every NaN payload is its own key.

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct F32Bits(pub u32);

impl F32Bits {
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f32 {
        f32::from_bits(self.0)
    }
}

impl From<f32> for F32Bits {
    fn from(v: f32) -> Self {
        Self(v.to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct F64Bits(pub u64);

impl F64Bits {
    pub const fn bits(self) -> u64 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl From<f64> for F64Bits {
    fn from(v: f64) -> Self {
        Self(v.to_bits())
    }
}

/// Axis-aligned box. A shape is an ordered `Vec<Aabb>`.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Aabb {
    /// The unit cube.
    pub const FULL: Aabb = Aabb::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);

    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// `(minX, minY, minZ, maxX, maxY, maxZ)`, the order coordinates are interned in.
    pub const fn extrema(&self) -> [f64; 6] {
        [
            self.min_x, self.min_y, self.min_z, self.max_x, self.max_y, self.max_z,
        ]
    }

    fn bits(&self) -> [u64; 6] {
        self.extrema().map(f64::to_bits)
    }
}

impl From<[f64; 6]> for Aabb {
    fn from([min_x, min_y, min_z, max_x, max_y, max_z]: [f64; 6]) -> Self {
        Self::new(min_x, min_y, min_z, max_x, max_y, max_z)
    }
}

impl PartialEq for Aabb {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Aabb {}

impl Hash for Aabb {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::InternTable;

    #[test]
    fn test_bits_roundtrip() {
        assert_eq!(F32Bits::from(1.0f32).bits(), 0x3f80_0000);
        assert_eq!(F32Bits::from(0.6f32).value(), 0.6f32);
        assert_eq!(F64Bits::from(1.0).bits(), 0x3ff0_0000_0000_0000);
    }

    #[test]
    fn test_shapes_intern_structurally() {
        let slab = Aabb::new(0.0, 0.0, 0.0, 1.0, 0.5, 1.0);
        let mut shapes = InternTable::<Vec<Aabb>>::new();
        let empty = shapes.intern(Vec::new());
        let full = shapes.intern(vec![Aabb::FULL]);
        let bottom = shapes.intern_ref(&[slab][..]);
        assert_eq!((empty, full, bottom), (0, 1, 2));
        assert_eq!(shapes.intern(vec![Aabb::from([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])]), 1);
        assert_eq!(shapes.intern(vec![slab, Aabb::FULL]), 3);
        assert_eq!(shapes.intern(vec![Aabb::FULL, slab]), 4);
    }
}
