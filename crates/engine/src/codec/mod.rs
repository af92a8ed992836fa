pub mod delta;
pub mod hex;
pub mod rle;
pub mod section;
