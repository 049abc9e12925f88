use glam::{IVec2, Vec2};

use crate::world_core::biome::Biome;
use crate::world_core::chunk::world_to_chunk;
use crate::world_core::config::{RealmConfig, StreamingConfig, WorldGenPatch, WorldSettings};
use crate::world_core::hex::{hexes_in_radius, world_to_axial, Axial};
use crate::world_core::save::WorldSave;
use crate::world_core::seed::WorldSeed;
use crate::world_runtime::chunk_manager::{ChunkManager, ChunkStats};

pub struct RuntimeStats {
    pub chunks: ChunkStats,
    pub party_chunk: IVec2,
    pub party_position: Vec2,
    pub revealed_tiles: usize,
    pub evicted_chunks: usize,
}

/// Seed for the tactical grid when a battle starts at the party's position.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleGrid {
    pub origin: Axial,
    pub hexes: Vec<Axial>,
    pub terrain: Option<Biome>,
}

/// One explorable world: its seed, generation settings, tile cache and the
/// party walking around in it. Several can coexist without sharing state.
pub struct WorldRuntime {
    chunks: ChunkManager,
    streaming: StreamingConfig,
    party_position: Vec2,
    last_revealed: usize,
    last_evicted: usize,
}

impl WorldRuntime {
    pub fn new(config: &RealmConfig) -> Self {
        let seed = WorldSeed::from_text(config.world.seed.as_str());
        log::info!("world seed {:?} -> {:#018x}", seed.text(), seed.value());
        let chunks = ChunkManager::new(seed, config.generation.clone())
            .with_max_chunks(config.streaming.max_chunks);
        Self {
            chunks,
            streaming: config.streaming.clone(),
            party_position: Vec2::ZERO,
            last_revealed: 0,
            last_evicted: 0,
        }
    }

    pub fn from_save(save: &WorldSave, streaming: StreamingConfig) -> Self {
        let config = RealmConfig {
            world: WorldSettings {
                seed: save.seed.clone(),
            },
            generation: save.generation.clone(),
            streaming,
        };
        let mut runtime = Self::new(&config);
        runtime.party_position = Vec2::from(save.party_position);
        runtime
    }

    pub fn to_save(&self) -> WorldSave {
        WorldSave {
            seed: self.chunks.seed().text().to_string(),
            generation: self.chunks.config().clone(),
            party_position: self.party_position.to_array(),
        }
    }

    /// Moves the party, streams chunks around it, reveals what it can see and
    /// drops what is far behind.
    pub fn update(&mut self, party_position: Vec2) {
        self.party_position = party_position;
        self.chunks
            .ensure_radius(party_position, self.streaming.view_radius);
        self.last_revealed = self
            .chunks
            .discover_radius(party_position, self.streaming.sight_radius);
        self.last_evicted = self
            .chunks
            .unload_beyond(party_position, self.streaming.keep_radius);
    }

    pub fn party_position(&self) -> Vec2 {
        self.party_position
    }

    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }

    pub fn chunks_mut(&mut self) -> &mut ChunkManager {
        &mut self.chunks
    }

    pub fn streaming(&self) -> &StreamingConfig {
        &self.streaming
    }

    /// Must complete before new tile requests; cached tiles are dropped.
    pub fn apply_generation_patch(&mut self, patch: &WorldGenPatch) {
        if patch.is_empty() {
            return;
        }
        self.chunks.update_config(patch);
    }

    pub fn begin_battle(&self) -> BattleGrid {
        let origin = world_to_axial(self.party_position, self.streaming.hex_size);
        let tile_x = self.party_position.x.floor() as i32;
        let tile_y = self.party_position.y.floor() as i32;
        let terrain = self.chunks.peek_tile(tile_x, tile_y).map(|t| t.biome);
        log::info!(
            "battle at ({:.1}, {:.1}) -> hex ({}, {})",
            self.party_position.x,
            self.party_position.y,
            origin.q,
            origin.r
        );
        BattleGrid {
            origin,
            hexes: hexes_in_radius(origin, self.streaming.battle_radius),
            terrain,
        }
    }

    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            chunks: self.chunks.stats(),
            party_chunk: world_to_chunk(
                self.party_position.x.floor() as i32,
                self.party_position.y.floor() as i32,
            ),
            party_position: self.party_position,
            revealed_tiles: self.last_revealed,
            evicted_chunks: self.last_evicted,
        }
    }
}
