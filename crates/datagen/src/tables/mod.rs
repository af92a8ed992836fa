//! One module per output file (the block-state file is split across
//! `block_state` and `physics`). Each `write` appends that file's sections,
//! in their fixed order, to the encoder.

pub mod block_state;
pub mod entity;
pub mod fluid_state;
pub mod item;
pub mod packet;
pub mod physics;
pub mod registries;
pub mod tags;
pub mod version;
