//! Game-agnostic encoding core for the datagen text tables.
//!
//! Nothing in here knows what a block is. Game layers intern their values
//! through [`intern`] and stream the resulting tables through
//! [`codec::section::Encoder`], which owns the wire format: section headers,
//! hex numbers, run-length and delta-coded columns.

pub mod codec;
pub mod error;
pub mod intern;

pub use error::EncodeError;
