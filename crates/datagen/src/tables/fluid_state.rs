//! `fluid_state.txt`: flat per-fluid-state columns, then the interned
//! per-block arrays of fluid-state ids.

use datagen_engine::codec::hex::push_hex;
use datagen_engine::codec::section::Encoder;
use datagen_engine::intern::{self, Id, InternTable};

use crate::error::ExtractError;
use crate::host::{FluidStateId, Host, HostError};

pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    let count = host.fluid_state_count();
    let size = count as usize;

    let names = (0..count)
        .map(|id| state_name(host, id))
        .collect::<Result<Vec<_>, _>>()?;
    enc.strings("fluid_state", size, &names)?;

    let state = |id| host.fluid_state(id);
    enc.u32s("fluid_to_block", size, (0..count).map(|id| state(id).legacy_block))?;
    enc.u32s("fluid_state_level", size, (0..count).map(|id| u32::from(state(id).amount)))?;
    enc.u32s(
        "fluid_state_falling",
        size,
        (0..count).map(|id| {
            let s = state(id);
            u32::from(!s.empty && s.falling)
        }),
    )?;
    enc.u32s("fluid_state_to_fluid", size, (0..count).map(|id| state(id).fluid))?;

    let arrays = BlockFluids::collect(host);
    enc.lists("fluid_state_array", arrays.table.len(), arrays.table.iter())?;
    enc.rle("block_to_fluid_state", arrays.per_block.len(), arrays.per_block.iter().copied())?;
    Ok(())
}

/// `<fluid>[_s][_f]_<amount>`; the empty state is just the fluid path.
fn state_name(host: &dyn Host, id: FluidStateId) -> Result<String, HostError> {
    let state = host.fluid_state(id);
    let path = host
        .fluid_path(state.fluid)
        .ok_or(HostError::UnknownFluid {
            state: id,
            fluid: state.fluid,
        })?;

    let mut name = path.to_owned();
    if !state.empty {
        if state.source {
            name.push_str("_s");
        }
        if state.falling {
            name.push_str("_f");
        }
        name.push('_');
        push_hex(&mut name, state.amount);
    }
    Ok(name)
}

/// Per-block fluid-state arrays, collapsed to one entry when uniform.
struct BlockFluids {
    table: InternTable<Vec<u32>>,
    per_block: Vec<Id>,
}

impl BlockFluids {
    fn collect(host: &dyn Host) -> Self {
        let mut table = InternTable::new();
        let mut per_block = Vec::with_capacity(host.block_count() as usize);
        for block in 0..host.block_count() {
            let mut ids: Vec<u32> = host
                .block_states(block)
                .map(|state| host.state_fluid(state))
                .collect();
            intern::collapse_uniform(&mut ids);
            per_block.push(table.intern(ids));
        }
        tracing::debug!("Fluid arrays: {} distinct over {} blocks", table.len(), per_block.len());
        Self { table, per_block }
    }
}
