//! Runs every projector in file order and hands each finished file to a sink.
//!
//! One scratch buffer is threaded through the whole run. It is cleared, not
//! freed, between files.

use std::time::Instant;

use anyhow::{Context, Result};
use datagen_engine::codec::section::Encoder;

use crate::error::ExtractError;
use crate::host::{Host, TagRegistry};
use crate::sink::Sink;
use crate::tables;

/// Initial scratch capacity.
pub const SCRATCH_CAPACITY: usize = 0x10000;

/// Output files, in the order they are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Version,
    Registries,
    Packet,
    FluidState,
    BlockState,
    Entity,
    Item,
    BlockTags,
    ItemTags,
    EntityTags,
    GameEventTags,
}

impl Dataset {
    pub const ALL: [Dataset; 11] = [
        Dataset::Version,
        Dataset::Registries,
        Dataset::Packet,
        Dataset::FluidState,
        Dataset::BlockState,
        Dataset::Entity,
        Dataset::Item,
        Dataset::BlockTags,
        Dataset::ItemTags,
        Dataset::EntityTags,
        Dataset::GameEventTags,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Dataset::Version => "version",
            Dataset::Registries => "registries",
            Dataset::Packet => "packet",
            Dataset::FluidState => "fluid_state",
            Dataset::BlockState => "block_state",
            Dataset::Entity => "entity",
            Dataset::Item => "item",
            Dataset::BlockTags => "block_tags",
            Dataset::ItemTags => "item_tags",
            Dataset::EntityTags => "entity_tags",
            Dataset::GameEventTags => "game_event_tags",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub bytes: usize,
}

/// Append one dataset's sections to `out`.
pub fn render(host: &dyn Host, dataset: Dataset, out: &mut String) -> Result<(), ExtractError> {
    let mut enc = Encoder::new(out);
    match dataset {
        Dataset::Version => tables::version::write(host, &mut enc),
        Dataset::Registries => tables::registries::write(host, &mut enc),
        Dataset::Packet => tables::packet::write(host, &mut enc),
        Dataset::FluidState => tables::fluid_state::write(host, &mut enc),
        Dataset::BlockState => tables::block_state::write(host, &mut enc),
        Dataset::Entity => tables::entity::write(host, &mut enc),
        Dataset::Item => tables::item::write(host, &mut enc),
        Dataset::BlockTags => tables::tags::write(host, TagRegistry::Block, &mut enc),
        Dataset::ItemTags => tables::tags::write(host, TagRegistry::Item, &mut enc),
        Dataset::EntityTags => tables::tags::write(host, TagRegistry::EntityType, &mut enc),
        Dataset::GameEventTags => tables::tags::write(host, TagRegistry::GameEvent, &mut enc),
    }
}

/// Produce every dataset into `sink`. The first failure aborts the run.
pub fn run(host: &dyn Host, sink: &mut dyn Sink, scratch: &mut String) -> Result<RunSummary> {
    let start = Instant::now();
    let mut summary = RunSummary::default();

    for dataset in Dataset::ALL {
        let file = dataset.file_name();
        scratch.clear();
        render(host, dataset, scratch).with_context(|| format!("generating {}", file))?;
        sink.write(&file, scratch.as_bytes())
            .with_context(|| format!("writing {}", file))?;

        tracing::info!("Wrote {} ({} bytes)", file, scratch.len());
        summary.files += 1;
        summary.bytes += scratch.len();
    }

    tracing::info!(
        "Generated {} files, {} bytes in {:.1}ms",
        summary.files,
        summary.bytes,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(summary)
}
