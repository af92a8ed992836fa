//! A [`Host`] backed by a JSON dump of the game's registries.
//!
//! Block states live in one global, id-ordered list; each block claims the
//! next `states` entries of it. Omitted fields take the host's defaults.

use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{
    Aabb, BlockId, BlockSettings, Direction, EntityDimensions, EntityTypeId, FluidId,
    FluidStateId, FluidStateInfo, Host, HostError, ItemId, ItemInfo, Property, ProtocolTemplate,
    RegistryView, StateAttributes, StateId, SupportType, Tag, TagRegistry, VersionInfo,
};

// ── Snapshot structs (serde) ─────────────────────────────────────────────

#[derive(Deserialize, Debug)]
pub struct Snapshot {
    pub version: VersionSnapshot,
    #[serde(default)]
    pub registries: Vec<RegistrySnapshot>,
    #[serde(default)]
    pub protocols: Vec<ProtocolSnapshot>,
    #[serde(default)]
    pub blocks: Vec<BlockSnapshot>,
    #[serde(default)]
    pub states: Vec<StateSnapshot>,
    /// Block id of air, the target of every non-block item.
    #[serde(default)]
    pub air_block: BlockId,
    /// Global state id of a full cube (vanilla uses mud).
    #[serde(default)]
    pub sturdy_reference: Option<StateId>,
    #[serde(default)]
    pub fluids: Vec<String>,
    #[serde(default)]
    pub fluid_states: Vec<FluidStateSnapshot>,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
    #[serde(default)]
    pub entity_types: Vec<EntityDimensions>,
    #[serde(default)]
    pub tags: TagsSnapshot,
}

#[derive(Deserialize, Debug)]
pub struct VersionSnapshot {
    pub name: String,
    pub protocol: u32,
}

#[derive(Deserialize, Debug)]
pub struct RegistrySnapshot {
    pub name: String,
    pub entries: Vec<Option<String>>,
}

#[derive(Deserialize, Debug)]
pub struct ProtocolSnapshot {
    pub flow: String,
    pub phase: String,
    pub packets: Vec<PacketSnapshot>,
}

#[derive(Deserialize, Debug)]
pub struct PacketSnapshot {
    pub index: u32,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct BlockSnapshot {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default = "one")]
    pub states: u32,
    /// Offset of the default state within this block's states.
    #[serde(default)]
    pub default_state: u32,
    #[serde(default)]
    pub dynamic_shape: bool,
    #[serde(default)]
    pub settings: BlockSettings,
}

#[derive(Deserialize, Debug, Default)]
pub struct StateSnapshot {
    #[serde(flatten)]
    pub attributes: StateAttributes,
    #[serde(default)]
    pub sturdy: SturdySnapshot,
    #[serde(default)]
    pub collision: Vec<[f64; 6]>,
    #[serde(default)]
    pub occlusion: Vec<[f64; 6]>,
    #[serde(default)]
    pub fluid_state: FluidStateId,
}

/// Faces that are sturdy under each support type.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SturdySnapshot {
    pub full: Vec<Direction>,
    pub center: Vec<Direction>,
    pub rigid: Vec<Direction>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct FluidStateSnapshot {
    pub fluid: FluidId,
    pub amount: u8,
    pub source: bool,
    pub falling: bool,
    pub empty: bool,
    pub legacy_block: StateId,
}

#[derive(Deserialize, Debug)]
pub struct ItemSnapshot {
    #[serde(default = "default_stack")]
    pub max_stack_size: u32,
    #[serde(default)]
    pub block: Option<BlockId>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct TagsSnapshot {
    pub block: Vec<TagSnapshot>,
    pub item: Vec<TagSnapshot>,
    pub entity_type: Vec<TagSnapshot>,
    pub game_event: Vec<TagSnapshot>,
}

#[derive(Deserialize, Debug)]
pub struct TagSnapshot {
    pub name: String,
    #[serde(default)]
    pub members: Vec<u32>,
}

fn one() -> u32 {
    1
}

fn default_stack() -> u32 {
    64
}

// ── Host implementation ──────────────────────────────────────────────────

/// A validated snapshot with per-state data unpacked for querying.
pub struct SnapshotHost {
    snapshot: Snapshot,
    state_ranges: Vec<Range<StateId>>,
    collision: Vec<Vec<Aabb>>,
    occlusion: Vec<Vec<Aabb>>,
    /// Sturdy masks per state, indexed `[full, center, rigid]`.
    sturdy: Vec<[u8; 3]>,
}

impl SnapshotHost {
    /// Read and validate a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        let host = Self::from_json(&text)
            .with_context(|| format!("loading snapshot {}", path.display()))?;
        tracing::info!(
            "Snapshot {}: {} blocks, {} states, {} items",
            path.display(),
            host.snapshot.blocks.len(),
            host.snapshot.states.len(),
            host.snapshot.items.len(),
        );
        Ok(host)
    }

    pub fn from_json(text: &str) -> Result<Self, HostError> {
        let snapshot: Snapshot =
            serde_json::from_str(text).map_err(|e| HostError::Snapshot(e.to_string()))?;
        Self::new(snapshot)
    }

    pub fn new(snapshot: Snapshot) -> Result<Self, HostError> {
        let mut state_ranges = Vec::with_capacity(snapshot.blocks.len());
        let mut next = 0u32;
        for (id, block) in snapshot.blocks.iter().enumerate() {
            if block.states == 0 {
                return Err(HostError::Snapshot(format!("block {id} has no states")));
            }
            if block.default_state >= block.states {
                return Err(HostError::Snapshot(format!(
                    "block {id}: default state {} outside its {} states",
                    block.default_state, block.states
                )));
            }
            state_ranges.push(next..next + block.states);
            next += block.states;
        }
        if next as usize != snapshot.states.len() {
            return Err(HostError::Snapshot(format!(
                "blocks claim {next} states but {} are listed",
                snapshot.states.len()
            )));
        }

        let block_count = snapshot.blocks.len() as u32;
        for (id, item) in snapshot.items.iter().enumerate() {
            if let Some(block) = item.block.filter(|&b| b >= block_count) {
                return Err(HostError::Snapshot(format!(
                    "item {id} targets unknown block {block}"
                )));
            }
        }
        if block_count > 0 && snapshot.air_block >= block_count {
            return Err(HostError::Snapshot(format!(
                "air block {} is not a block",
                snapshot.air_block
            )));
        }
        // Without fluid states, every block state stays on the implicit id 0.
        let fluid_states = (snapshot.fluid_states.len() as u32).max(1);
        if let Some((id, s)) = snapshot
            .states
            .iter()
            .enumerate()
            .find(|(_, s)| s.fluid_state >= fluid_states)
        {
            return Err(HostError::Snapshot(format!(
                "state {id} has unknown fluid state {}",
                s.fluid_state
            )));
        }
        if let Some((id, s)) = snapshot
            .fluid_states
            .iter()
            .enumerate()
            .find(|(_, s)| s.legacy_block >= next)
        {
            return Err(HostError::Snapshot(format!(
                "fluid state {id} places unknown block state {}",
                s.legacy_block
            )));
        }
        check_tags(&snapshot)?;
        if let Some(state) = snapshot.sturdy_reference.filter(|&s| s >= next) {
            return Err(HostError::Snapshot(format!(
                "sturdy reference {state} is not a block state"
            )));
        }

        let boxes = |list: &[[f64; 6]]| list.iter().copied().map(Aabb::from).collect::<Vec<_>>();
        let collision = snapshot.states.iter().map(|s| boxes(&s.collision)).collect();
        let occlusion = snapshot.states.iter().map(|s| boxes(&s.occlusion)).collect();
        let sturdy = snapshot
            .states
            .iter()
            .map(|s| {
                [
                    face_mask(&s.sturdy.full),
                    face_mask(&s.sturdy.center),
                    face_mask(&s.sturdy.rigid),
                ]
            })
            .collect();

        Ok(Self {
            snapshot,
            state_ranges,
            collision,
            occlusion,
            sturdy,
        })
    }
}

/// Every tag member must be an id of the tag's registry. Game events have no
/// table of their own, so their size comes from the `game_event` registry.
fn check_tags(snapshot: &Snapshot) -> Result<(), HostError> {
    let game_events = snapshot
        .registries
        .iter()
        .find(|r| r.name == "game_event")
        .map_or(0, |r| r.entries.len());
    let registries = [
        ("block", &snapshot.tags.block, snapshot.blocks.len()),
        ("item", &snapshot.tags.item, snapshot.items.len()),
        ("entity_type", &snapshot.tags.entity_type, snapshot.entity_types.len()),
        ("game_event", &snapshot.tags.game_event, game_events),
    ];
    for (registry, tags, len) in registries {
        for tag in tags {
            if let Some(member) = tag.members.iter().find(|&&m| m as usize >= len) {
                return Err(HostError::Snapshot(format!(
                    "{registry} tag {} lists unknown id {member}",
                    tag.name
                )));
            }
        }
    }
    Ok(())
}

fn face_mask(faces: &[Direction]) -> u8 {
    faces.iter().fold(0, |mask, face| mask | 1 << face.data_3d())
}

impl Host for SnapshotHost {
    fn version(&self) -> VersionInfo<'_> {
        VersionInfo {
            name: &self.snapshot.version.name,
            protocol: self.snapshot.version.protocol,
        }
    }

    fn registries(&self) -> Vec<RegistryView<'_>> {
        self.snapshot
            .registries
            .iter()
            .map(|r| RegistryView {
                name: &r.name,
                entries: r.entries.iter().map(Option::as_deref).collect(),
            })
            .collect()
    }

    fn protocol_templates(&self) -> Vec<ProtocolTemplate<'_>> {
        self.snapshot
            .protocols
            .iter()
            .map(|p| ProtocolTemplate {
                flow: &p.flow,
                phase: &p.phase,
                packets: p.packets.iter().map(|e| (e.index, e.name.as_str())).collect(),
            })
            .collect()
    }

    fn block_count(&self) -> u32 {
        self.snapshot.blocks.len() as u32
    }

    fn block_properties(&self, block: BlockId) -> &[Property] {
        &self.snapshot.blocks[block as usize].properties
    }

    fn block_states(&self, block: BlockId) -> Range<StateId> {
        self.state_ranges[block as usize].clone()
    }

    fn default_state(&self, block: BlockId) -> StateId {
        self.state_ranges[block as usize].start + self.snapshot.blocks[block as usize].default_state
    }

    fn has_dynamic_shape(&self, block: BlockId) -> bool {
        self.snapshot.blocks[block as usize].dynamic_shape
    }

    fn block_settings(&self, block: BlockId) -> BlockSettings {
        self.snapshot.blocks[block as usize].settings
    }

    fn air_block(&self) -> BlockId {
        self.snapshot.air_block
    }

    fn sturdy_reference(&self) -> Option<StateId> {
        self.snapshot.sturdy_reference
    }

    fn block_state_count(&self) -> u32 {
        self.snapshot.states.len() as u32
    }

    fn state_attributes(&self, state: StateId) -> StateAttributes {
        self.snapshot.states[state as usize].attributes
    }

    fn is_face_sturdy(&self, state: StateId, face: Direction, support: SupportType) -> bool {
        let masks = self.sturdy[state as usize];
        let mask = match support {
            SupportType::Full => masks[0],
            SupportType::Center => masks[1],
            SupportType::Rigid => masks[2],
        };
        mask & (1 << face.data_3d()) != 0
    }

    fn collision_shape(&self, state: StateId) -> &[Aabb] {
        &self.collision[state as usize]
    }

    fn occlusion_shape(&self, state: StateId) -> &[Aabb] {
        &self.occlusion[state as usize]
    }

    fn state_fluid(&self, state: StateId) -> FluidStateId {
        self.snapshot.states[state as usize].fluid_state
    }

    fn fluid_path(&self, fluid: FluidId) -> Option<&str> {
        self.snapshot.fluids.get(fluid as usize).map(String::as_str)
    }

    fn fluid_state_count(&self) -> u32 {
        self.snapshot.fluid_states.len() as u32
    }

    fn fluid_state(&self, state: FluidStateId) -> FluidStateInfo {
        let s = &self.snapshot.fluid_states[state as usize];
        FluidStateInfo {
            fluid: s.fluid,
            amount: s.amount,
            source: s.source,
            falling: s.falling,
            empty: s.empty,
            legacy_block: s.legacy_block,
        }
    }

    fn item_count(&self) -> u32 {
        self.snapshot.items.len() as u32
    }

    fn item(&self, item: ItemId) -> ItemInfo {
        let i = &self.snapshot.items[item as usize];
        ItemInfo {
            max_stack_size: i.max_stack_size,
            block: i.block,
        }
    }

    fn entity_type_count(&self) -> u32 {
        self.snapshot.entity_types.len() as u32
    }

    fn entity_dimensions(&self, entity: EntityTypeId) -> EntityDimensions {
        self.snapshot.entity_types[entity as usize]
    }

    fn tags(&self, registry: TagRegistry) -> Vec<Tag<'_>> {
        let tags = match registry {
            TagRegistry::Block => &self.snapshot.tags.block,
            TagRegistry::Item => &self.snapshot.tags.item,
            TagRegistry::EntityType => &self.snapshot.tags.entity_type,
            TagRegistry::GameEvent => &self.snapshot.tags.game_event,
        };
        tags.iter()
            .map(|t| Tag {
                name: &t.name,
                members: t.members.clone(),
            })
            .collect()
    }
}
