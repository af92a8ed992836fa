//! `block_state.txt`.
//!
//! The property graph is interned in layers: key and value names, then
//! `[key, value...]` rows, then per-block sets of those rows. Blocks map to
//! a set id (0 is the seeded empty set), followed by the delta-coded
//! default-state and block-item columns. The physics sections follow, see
//! [`super::physics`].

use datagen_engine::codec::delta;
use datagen_engine::codec::section::Encoder;
use datagen_engine::intern::{Id, InternTable};

use super::physics;
use crate::error::ExtractError;
use crate::host::Host;

pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    let props = PropertyTables::collect(host);
    props.write(enc)?;

    let blocks = host.block_count();
    enc.rle(
        "block_to_default_block_state",
        blocks as usize,
        delta::deltas((0..blocks).map(|b| host.default_state(b))),
    )?;

    let air = host.air_block();
    let items = host.item_count();
    enc.rle(
        "block_item_to_block",
        items as usize,
        delta::deltas((0..items).map(|i| host.item(i).block.unwrap_or(air))),
    )?;

    physics::write(host, enc)
}

// ── Property graph ───────────────────────────────────────────────────────

struct PropertyTables {
    keys: InternTable<String>,
    values: InternTable<String>,
    /// `[key_id, value_id...]` per distinct property.
    kvs: InternTable<Vec<u32>>,
    /// Ordered kv ids per distinct property list.
    sets: InternTable<Vec<u32>>,
    per_block: Vec<Id>,
}

impl PropertyTables {
    fn collect(host: &dyn Host) -> Self {
        let mut keys = InternTable::<String>::new();
        let mut values = InternTable::<String>::new();
        let mut kvs = InternTable::new();
        let mut sets = InternTable::seeded([Vec::new()]);
        let mut per_block = Vec::with_capacity(host.block_count() as usize);

        for block in 0..host.block_count() {
            let properties = host.block_properties(block);
            if properties.is_empty() {
                per_block.push(0);
                continue;
            }

            let mut set = Vec::with_capacity(properties.len());
            for property in properties {
                let mut row = Vec::with_capacity(property.values.len() + 1);
                row.push(keys.intern_ref(property.name.as_str()));
                for value in &property.values {
                    row.push(values.intern_ref(value.as_str()));
                }
                set.push(kvs.intern(row));
            }
            per_block.push(sets.intern(set));
        }

        tracing::debug!(
            "Properties: {} keys, {} values, {} kv rows, {} sets",
            keys.len(),
            values.len(),
            kvs.len(),
            sets.len()
        );
        Self {
            keys,
            values,
            kvs,
            sets,
            per_block,
        }
    }

    fn write(&self, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
        enc.strings("block_state_property_key", self.keys.len(), self.keys.iter())?;
        enc.strings("block_state_property_value", self.values.len(), self.values.iter())?;
        enc.lists("block_state_property", self.kvs.len(), self.kvs.iter())?;
        enc.lists("block_state_properties", self.sets.len(), self.sets.iter())?;
        enc.rle("block_state", self.per_block.len(), self.per_block.iter().copied())?;
        Ok(())
    }
}
