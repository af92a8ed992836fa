//! The read-only query surface the extractor needs from the game host.
//!
//! Every enumeration is id-ascending; the extractor never mutates anything
//! it is handed. [`snapshot::SnapshotHost`] is the implementation backed by
//! a JSON dump of the host's registries.

pub mod snapshot;

use std::ops::Range;

use serde::Deserialize;
use thiserror::Error;

pub use datagen_engine::intern::Aabb;

pub type BlockId = u32;
pub type StateId = u32;
pub type FluidId = u32;
pub type FluidStateId = u32;
pub type ItemId = u32;
pub type EntityTypeId = u32;

// ── Value types ──────────────────────────────────────────────────────────

/// Game version line pair for `version.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo<'a> {
    pub name: &'a str,
    pub protocol: u32,
}

/// One built-in registry: its key path and the path of every entry in id order.
/// `None` marks an entry the host could not name.
#[derive(Debug, Clone)]
pub struct RegistryView<'a> {
    pub name: &'a str,
    pub entries: Vec<Option<&'a str>>,
}

/// A flow/phase pair and the packets it declares as `(index, path)` pairs.
#[derive(Debug, Clone)]
pub struct ProtocolTemplate<'a> {
    pub flow: &'a str,
    pub phase: &'a str,
    pub packets: Vec<(u32, &'a str)>,
}

/// A block property and the canonical names of its values, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Property {
    pub name: String,
    pub values: Vec<String>,
}

/// Per-block physics scalars.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlockSettings {
    /// Destroy speed of the default state in an empty world at the origin.
    pub hardness: f32,
    pub explosion_resistance: f32,
    pub friction: f32,
    pub speed_factor: f32,
    pub jump_factor: f32,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            hardness: 0.0,
            explosion_resistance: 0.0,
            friction: 0.6,
            speed_factor: 1.0,
            jump_factor: 1.0,
        }
    }
}

/// Scalar predicates and light values of one block state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StateAttributes {
    pub solid_render: bool,
    pub collision_full_block: bool,
    pub propagates_skylight: bool,
    pub redstone_conductor: bool,
    pub can_occlude: bool,
    pub can_be_replaced: bool,
    pub ignited_by_lava: bool,
    pub use_shape_for_light_occlusion: bool,
    pub signal_source: bool,
    pub large_collision_shape: bool,
    pub analog_output: bool,
    pub requires_correct_tool: bool,
    pub light_emission: u8,
    /// Opacity: how much light the state blocks.
    pub light_block: u8,
}

/// The six faces, ordered by their 3-D data value (the bit position in sturdy masks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub const fn data_3d(self) -> u32 {
        self as u32
    }
}

/// Support categories used by placement logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportType {
    Full,
    Center,
    Rigid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidStateInfo {
    pub fluid: FluidId,
    pub amount: u8,
    pub source: bool,
    pub falling: bool,
    pub empty: bool,
    /// Block state produced by placing this fluid state in the world.
    pub legacy_block: StateId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInfo {
    pub max_stack_size: u32,
    /// Target block when this is a block item.
    pub block: Option<BlockId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EntityDimensions {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub fixed: bool,
}

/// Registries that carry named tag sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagRegistry {
    Block,
    Item,
    EntityType,
    GameEvent,
}

/// A named tag and the registry ids of its members, in host order.
#[derive(Debug, Clone)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub members: Vec<u32>,
}

// ── Errors ───────────────────────────────────────────────────────────────

/// Host integrity violations. All of them abort the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("registry `{registry}` has no key for entry {id}")]
    MissingKey { registry: String, id: u32 },

    #[error("protocol template `{template}` has no packet at index {index}")]
    MissingPacket { template: String, index: u32 },

    #[error("protocol template `{template}` lists packet index {index} outside 0..{len}")]
    PacketIndexOutOfRange {
        template: String,
        index: u32,
        len: usize,
    },

    #[error("fluid state {state} refers to unknown fluid {fluid}")]
    UnknownFluid { state: FluidStateId, fluid: FluidId },

    #[error("block state {state}: {kind} shape was never collected")]
    UninternedShape { state: StateId, kind: &'static str },

    #[error(
        "reference state {state} is not sturdy on every face (full {full:#x}, center {center:#x}, rigid {rigid:#x})"
    )]
    SturdyCheck {
        state: StateId,
        full: u32,
        center: u32,
        rigid: u32,
    },

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

// ── Query interface ──────────────────────────────────────────────────────

/// Read-only view of a bootstrapped game host.
///
/// Ids passed in always come from the matching `*_count` range; implementations
/// may panic on anything else.
pub trait Host {
    fn version(&self) -> VersionInfo<'_>;

    /// Every built-in registry, in the host's registry-of-registries order.
    fn registries(&self) -> Vec<RegistryView<'_>>;

    /// Protocol templates in output order.
    fn protocol_templates(&self) -> Vec<ProtocolTemplate<'_>>;

    // -- blocks --

    fn block_count(&self) -> u32;

    fn block_properties(&self, block: BlockId) -> &[Property];

    /// Global state ids of the block's possible states, contiguous and ascending.
    fn block_states(&self, block: BlockId) -> Range<StateId>;

    fn default_state(&self, block: BlockId) -> StateId;

    fn has_dynamic_shape(&self, block: BlockId) -> bool;

    fn block_settings(&self, block: BlockId) -> BlockSettings;

    fn air_block(&self) -> BlockId;

    /// A state that must be sturdy on every face under every support type.
    /// Hosts that name one get a sanity check of their sturdy-face answers.
    fn sturdy_reference(&self) -> Option<StateId> {
        None
    }

    // -- block states --

    fn block_state_count(&self) -> u32;

    fn state_attributes(&self, state: StateId) -> StateAttributes;

    fn is_face_sturdy(&self, state: StateId, face: Direction, support: SupportType) -> bool;

    fn collision_shape(&self, state: StateId) -> &[Aabb];

    fn occlusion_shape(&self, state: StateId) -> &[Aabb];

    fn state_fluid(&self, state: StateId) -> FluidStateId;

    // -- fluids --

    fn fluid_path(&self, fluid: FluidId) -> Option<&str>;

    fn fluid_state_count(&self) -> u32;

    fn fluid_state(&self, state: FluidStateId) -> FluidStateInfo;

    // -- items and entities --

    fn item_count(&self) -> u32;

    fn item(&self, item: ItemId) -> ItemInfo;

    fn entity_type_count(&self) -> u32;

    fn entity_dimensions(&self, entity: EntityTypeId) -> EntityDimensions;

    // -- tags --

    fn tags(&self, registry: TagRegistry) -> Vec<Tag<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_data_values() {
        let values: Vec<_> = Direction::ALL.iter().map(|d| d.data_3d()).collect();
        assert_eq!(values, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_default_settings() {
        let s = BlockSettings::default();
        assert_eq!(s.friction, 0.6);
        assert_eq!((s.speed_factor, s.jump_factor), (1.0, 1.0));
    }
}
