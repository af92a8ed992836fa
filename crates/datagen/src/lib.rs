//! Game layer of the extractor: the host query surface, one projector per
//! output file, and the driver that writes them through a sink.

pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod sink;
pub mod tables;
