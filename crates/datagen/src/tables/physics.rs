//! Physics sections of `block_state.txt`: interned floats and shapes,
//! per-block settings, per-state flag and light columns, and the static
//! bounds records that downstream collision code reads instead of asking
//! the host.
//!
//! Float tables are shared inside one run: `f32` by every settings field,
//! `f64` by every shape coordinate. Collision and occlusion shapes share one
//! shape table.

use datagen_engine::codec::section::Encoder;
use datagen_engine::intern::{self, Aabb, F32Bits, F64Bits, Id, InternTable};

use crate::error::ExtractError;
use crate::host::{BlockId, Direction, Host, HostError, StateId, SupportType};

// Section names carry their field layout after `#`; readers match on the full string.
pub const SETTINGS_TABLE: &str = "block_settings_table#hardness blast_resistance slipperiness velocity_multiplier jump_velocity_multiplier";
pub const STATE_FLAGS: &str = "block_state_flags#(has_sided_transparency lava_ignitable material_replaceable opaque tool_required exceeds_cube redstone_power_source has_comparator_output)";
pub const BOUNDS_TABLE: &str = "block_state_static_bounds_table#(opacity(4) solid_block translucent full_cube opaque_full_cube) side_solid_full side_solid_center side_solid_rigid collision_shape culling_shape";

/// Sturdy mask with every face set.
const ALL_FACES: u32 = 0x3f;

pub fn write(host: &dyn Host, enc: &mut Encoder<'_>) -> Result<(), ExtractError> {
    check_sturdy_reference(host)?;

    let mut f32s = intern::float32_table();
    let settings = Settings::collect(host, &mut f32s);

    let shapes = Shapes::collect(host);
    let mut f64s = intern::float64_table();
    let shape_rows = shapes.rows(&mut f64s);

    let bounds = Bounds::collect(host, &shapes)?;

    tracing::debug!(
        "Physics: {} f32, {} f64, {} shapes, {} settings, {} bounds records, {} bounds arrays",
        f32s.len(),
        f64s.len(),
        shapes.table.len(),
        settings.table.len(),
        bounds.records.len(),
        bounds.map.len()
    );

    enc.u32s("float32_table", f32s.len(), f32s.iter().map(|f| f.bits()))?;
    enc.u64s("float64_table", f64s.len(), f64s.iter().map(|f| f.bits()))?;
    enc.lists("shape_table", shape_rows.len(), &shape_rows)?;

    enc.lists(SETTINGS_TABLE, settings.table.len(), settings.table.iter())?;
    enc.rle("block_settings", settings.per_block.len(), settings.per_block.iter().copied())?;

    let states = host.block_state_count();
    enc.rle(STATE_FLAGS, states as usize, (0..states).map(|s| state_flags(host, s)))?;
    enc.rle(
        "block_state_luminance",
        states as usize,
        (0..states).map(|s| u32::from(host.state_attributes(s).light_emission)),
    )?;

    enc.lists(BOUNDS_TABLE, bounds.records.len(), bounds.records.iter())?;
    enc.lists("block_state_static_bounds_map", bounds.map.len(), bounds.map.iter())?;
    enc.rle(
        "block_state_static_bounds",
        bounds.per_block.len(),
        bounds.per_block.iter().copied(),
    )?;
    Ok(())
}

/// The host's reference full cube must be sturdy on all faces for every
/// support type, otherwise its sturdy answers cannot be trusted.
fn check_sturdy_reference(host: &dyn Host) -> Result<(), HostError> {
    let Some(state) = host.sturdy_reference() else {
        return Ok(());
    };
    let full = sturdy_mask(host, state, SupportType::Full);
    let center = sturdy_mask(host, state, SupportType::Center);
    let rigid = sturdy_mask(host, state, SupportType::Rigid);
    if [full, center, rigid] != [ALL_FACES; 3] {
        return Err(HostError::SturdyCheck {
            state,
            full,
            center,
            rigid,
        });
    }
    Ok(())
}

fn sturdy_mask(host: &dyn Host, state: StateId, support: SupportType) -> u32 {
    Direction::ALL
        .into_iter()
        .filter(|&face| host.is_face_sturdy(state, face, support))
        .fold(0, |mask, face| mask | 1 << face.data_3d())
}

/// `analog | signal<<1 | large<<2 | tool<<3 | occlude<<4 | replace<<5 | lava<<6 | light<<7`.
fn state_flags(host: &dyn Host, state: StateId) -> u32 {
    let a = host.state_attributes(state);
    u32::from(a.analog_output)
        | u32::from(a.signal_source) << 1
        | u32::from(a.large_collision_shape) << 2
        | u32::from(a.requires_correct_tool) << 3
        | u32::from(a.can_occlude) << 4
        | u32::from(a.can_be_replaced) << 5
        | u32::from(a.ignited_by_lava) << 6
        | u32::from(a.use_shape_for_light_occlusion) << 7
}

// ── Settings ─────────────────────────────────────────────────────────────

struct Settings {
    /// `(hardness, blast, friction, speed, jump)` as f32 ids.
    table: InternTable<[u32; 5]>,
    per_block: Vec<Id>,
}

impl Settings {
    fn collect(host: &dyn Host, f32s: &mut InternTable<F32Bits>) -> Self {
        let mut table = InternTable::new();
        let mut per_block = Vec::with_capacity(host.block_count() as usize);
        for block in 0..host.block_count() {
            let s = host.block_settings(block);
            let mut f = |v: f32| f32s.intern(F32Bits::from(v));
            let hardness = f(s.hardness);
            let friction = f(s.friction);
            let speed = f(s.speed_factor);
            let jump = f(s.jump_factor);
            let blast = f(s.explosion_resistance);
            per_block.push(table.intern([hardness, blast, friction, speed, jump]));
        }
        Self { table, per_block }
    }
}

// ── Shapes ───────────────────────────────────────────────────────────────

struct Shapes {
    table: InternTable<Vec<Aabb>>,
}

impl Shapes {
    /// Collision shapes of every state of every non-dynamic block, plus the
    /// occlusion shape of each state that can occlude.
    fn collect(host: &dyn Host) -> Self {
        let mut table = InternTable::<Vec<Aabb>>::new();
        for block in static_blocks(host) {
            for state in host.block_states(block) {
                table.intern_ref(host.collision_shape(state));
                if host.state_attributes(state).can_occlude {
                    table.intern_ref(host.occlusion_shape(state));
                }
            }
        }
        Self { table }
    }

    /// One row per shape: six f64 ids per box. Coordinates are interned in
    /// shape order, box order, then `(minX, minY, minZ, maxX, maxY, maxZ)`.
    fn rows(&self, f64s: &mut InternTable<F64Bits>) -> Vec<Vec<u32>> {
        self.table
            .iter()
            .map(|shape| {
                shape
                    .iter()
                    .flat_map(Aabb::extrema)
                    .map(|c| f64s.intern(F64Bits::from(c)))
                    .collect()
            })
            .collect()
    }

    fn id(&self, state: StateId, kind: &'static str, shape: &[Aabb]) -> Result<Id, HostError> {
        self.table
            .get(shape)
            .ok_or(HostError::UninternedShape { state, kind })
    }
}

fn static_blocks(host: &dyn Host) -> impl Iterator<Item = BlockId> + '_ {
    (0..host.block_count()).filter(|&b| !host.has_dynamic_shape(b))
}

// ── Static bounds ────────────────────────────────────────────────────────

struct Bounds {
    /// `(flags, sturdy_full, sturdy_center, sturdy_rigid, collision, occlusion)`;
    /// id 0 is the empty record.
    records: InternTable<Vec<u32>>,
    /// Record ids per block, collapsed when uniform; id 0 (empty) marks a
    /// dynamic block.
    map: InternTable<Vec<u32>>,
    per_block: Vec<Id>,
}

impl Bounds {
    fn collect(host: &dyn Host, shapes: &Shapes) -> Result<Self, HostError> {
        let mut records = intern::tuple_table_with_empty();
        let mut map = intern::tuple_table_with_empty();
        let mut per_block = Vec::with_capacity(host.block_count() as usize);

        for block in 0..host.block_count() {
            if host.has_dynamic_shape(block) {
                per_block.push(0);
                continue;
            }
            let mut ids = Vec::with_capacity(host.block_states(block).len());
            for state in host.block_states(block) {
                ids.push(records.intern(record(host, shapes, state)?));
            }
            intern::collapse_uniform(&mut ids);
            per_block.push(map.intern(ids));
        }
        Ok(Self {
            records,
            map,
            per_block,
        })
    }
}

fn record(host: &dyn Host, shapes: &Shapes, state: StateId) -> Result<Vec<u32>, HostError> {
    let a = host.state_attributes(state);
    let flags = u32::from(a.solid_render)
        | u32::from(a.collision_full_block) << 1
        | u32::from(a.propagates_skylight) << 2
        | u32::from(a.redstone_conductor) << 3
        | u32::from(a.light_block) << 4;
    let collision = shapes.id(state, "collision", host.collision_shape(state))?;
    let occlusion = shapes.id(state, "occlusion", host.occlusion_shape(state))?;
    Ok(vec![
        flags,
        sturdy_mask(host, state, SupportType::Full),
        sturdy_mask(host, state, SupportType::Center),
        sturdy_mask(host, state, SupportType::Rigid),
        collision,
        occlusion,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::snapshot::SnapshotHost;

    fn host(json: &str) -> SnapshotHost {
        SnapshotHost::from_json(json).unwrap()
    }

    fn render(host: &SnapshotHost) -> String {
        let mut buf = String::new();
        write(host, &mut Encoder::new(&mut buf)).unwrap();
        buf
    }

    const ALL: &str = r#"["down", "up", "north", "south", "west", "east"]"#;

    #[test]
    fn test_identical_settings_hit_seeds() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [
                    { "settings": { "hardness": 1, "explosion_resistance": 1, "friction": 1 } },
                    { "settings": { "hardness": 1, "explosion_resistance": 1, "friction": 1 } }
                 ],
                 "states": [{}, {}] }"#,
        );
        let out = render(&host);
        assert!(out.starts_with(";float32_table;u32;2\n0\n3f800000\n"));
        assert!(out.contains(&format!(";{SETTINGS_TABLE};[u32];1\n1 1 1 1 1\n")));
        assert!(out.contains(";block_settings;u32+rle;2\n~2 0\n"));
    }

    #[test]
    fn test_f32_first_seen_order() {
        // hardness 2, friction 0.6, blast 3: friction is seen before blast.
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{ "settings": { "hardness": 2, "explosion_resistance": 3 } }],
                 "states": [{}] }"#,
        );
        let mut f32s = intern::float32_table();
        let settings = Settings::collect(&host, &mut f32s);
        let values: Vec<f32> = f32s.iter().map(|f| f.value()).collect();
        assert_eq!(values, [0.0, 1.0, 2.0, 0.6, 3.0]);
        assert_eq!(settings.table.iter().next(), Some(&[2, 4, 3, 1, 1]));
    }

    #[test]
    fn test_full_output_for_plain_blocks() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{}, {}], "states": [{}, {}] }"#,
        );
        let expected = format!(
            ";float32_table;u32;3\n0\n3f800000\n3f19999a\n\
             ;float64_table;u64;2\n0\n3ff0000000000000\n\
             ;shape_table;[u32];1\n\n\
             ;{SETTINGS_TABLE};[u32];1\n0 0 2 1 1\n\
             ;block_settings;u32+rle;2\n~2 0\n\
             ;{STATE_FLAGS};u32+rle;2\n~2 0\n\
             ;block_state_luminance;u32+rle;2\n~2 0\n\
             ;{BOUNDS_TABLE};[u32];2\n\n0 0 0 0 0 0\n\
             ;block_state_static_bounds_map;[u32];2\n\n1\n\
             ;block_state_static_bounds;u32+rle;2\n~2 1\n"
        );
        assert_eq!(render(&host), expected);
    }

    #[test]
    fn test_shape_rows_share_f64_ids() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{ "states": 2 }],
                 "states": [
                    { "collision": [[0, 0, 0, 1, 0.5, 1]] },
                    { "can_occlude": true,
                      "collision": [[0, 0, 0, 1, 1, 1]],
                      "occlusion": [[0, 0, 0, 1, 0.5, 1], [0, 0.5, 0, 0.5, 1, 0.5]] }
                 ] }"#,
        );
        let shapes = Shapes::collect(&host);
        assert_eq!(shapes.table.len(), 3);
        let mut f64s = intern::float64_table();
        let rows = shapes.rows(&mut f64s);
        assert_eq!(
            rows,
            [
                vec![0, 0, 0, 1, 2, 1],
                vec![0, 0, 0, 1, 1, 1],
                vec![0, 0, 0, 1, 2, 1, 0, 2, 0, 2, 1, 2],
            ]
        );
        assert_eq!(f64s.len(), 3);
    }

    #[test]
    fn test_state_flag_bits() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{ "states": 3 }],
                 "states": [
                    { "analog_output": true, "use_shape_for_light_occlusion": true },
                    { "can_occlude": true, "requires_correct_tool": true },
                    { "signal_source": true, "large_collision_shape": true,
                      "can_be_replaced": true, "ignited_by_lava": true }
                 ] }"#,
        );
        let flags: Vec<_> = (0..3).map(|s| state_flags(&host, s)).collect();
        assert_eq!(flags, [0x81, 0x18, 0x66]);
    }

    #[test]
    fn test_bounds_record_fields() {
        let host = host(&format!(
            r#"{{ "version": {{ "name": "t", "protocol": 1 }},
                  "blocks": [{{}}, {{ "states": 2 }}],
                  "states": [
                    {{}},
                    {{ "solid_render": true, "collision_full_block": true, "redstone_conductor": true,
                       "light_block": 15, "can_occlude": true,
                       "sturdy": {{ "full": {ALL}, "center": {ALL}, "rigid": ["up"] }},
                       "collision": [[0, 0, 0, 1, 1, 1]], "occlusion": [[0, 0, 0, 1, 1, 1]] }},
                    {{ "propagates_skylight": true }}
                  ] }}"#
        ));
        let shapes = Shapes::collect(&host);
        let bounds = Bounds::collect(&host, &shapes).unwrap();
        let records: Vec<_> = bounds.records.iter().cloned().collect();
        assert_eq!(
            records,
            [
                vec![],
                vec![0, 0, 0, 0, 0, 0],
                vec![0xfb, 0x3f, 0x3f, 0x2, 1, 1],
                vec![0x4, 0, 0, 0, 0, 0],
            ]
        );
        let map: Vec<_> = bounds.map.iter().cloned().collect();
        assert_eq!(map, [vec![], vec![1], vec![2, 3]]);
        assert_eq!(bounds.per_block, [1, 2]);
    }

    #[test]
    fn test_uniform_blocks_share_one_entry() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{ "states": 3 }, { "states": 2 }],
                 "states": [{}, {}, {}, {}, {}] }"#,
        );
        let bounds = Bounds::collect(&host, &Shapes::collect(&host)).unwrap();
        assert_eq!(bounds.map.iter().nth(1), Some(&vec![1]));
        assert_eq!(bounds.per_block, [1, 1]);
    }

    #[test]
    fn test_dynamic_block_maps_to_empty() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{}, { "states": 4, "dynamic_shape": true }],
                 "states": [{}, { "collision": [[0, 0, 0, 1, 2, 1]] }, {}, {}, {}] }"#,
        );
        let shapes = Shapes::collect(&host);
        assert_eq!(shapes.table.len(), 1, "dynamic block shapes are not collected");
        let bounds = Bounds::collect(&host, &shapes).unwrap();
        assert_eq!(bounds.per_block, [1, 0]);
    }

    #[test]
    fn test_uncollected_occlusion_is_fatal() {
        let host = host(
            r#"{ "version": { "name": "t", "protocol": 1 },
                 "blocks": [{}],
                 "states": [{ "collision": [[0, 0, 0, 1, 1, 1]], "occlusion": [[0, 0, 0, 1, 0.5, 1]] }] }"#,
        );
        let err = Bounds::collect(&host, &Shapes::collect(&host)).err().unwrap();
        assert_eq!(
            err,
            HostError::UninternedShape {
                state: 0,
                kind: "occlusion"
            }
        );
    }

    #[test]
    fn test_sturdy_reference_checked() {
        let json = |rigid: &str| {
            format!(
                r#"{{ "version": {{ "name": "t", "protocol": 1 }},
                      "blocks": [{{}}], "states": [{{ "sturdy": {{ "full": {ALL}, "center": {ALL}, "rigid": {rigid} }} }}],
                      "sturdy_reference": 0 }}"#
            )
        };
        assert!(check_sturdy_reference(&host(&json(ALL))).is_ok());
        let err = check_sturdy_reference(&host(&json(r#"["up"]"#))).unwrap_err();
        assert_eq!(
            err,
            HostError::SturdyCheck {
                state: 0,
                full: 0x3f,
                center: 0x3f,
                rigid: 0x2
            }
        );
    }
}
