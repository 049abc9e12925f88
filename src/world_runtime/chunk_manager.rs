use std::collections::{HashMap, HashSet};

use glam::{IVec2, Vec2};
use rayon::prelude::*;

use crate::world_core::chunk::{
    self, chunk_center, local_index, Settlement, Tile, WorldChunk, CHUNK_SIZE,
};
use crate::world_core::chunk_generator::ChunkGenerator;
use crate::world_core::config::{WorldGenConfig, WorldGenPatch};
use crate::world_core::layer::Layer;
use crate::world_core::seed::WorldSeed;

/// Rough per-tile footprint used by [`ChunkManager::stats`].
pub const BYTES_PER_TILE_ESTIMATE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkStats {
    pub total_chunks: usize,
    pub generated_chunks: usize,
    pub total_tiles: usize,
    pub estimated_memory_bytes: usize,
}

/// Lazily generated tile cache, keyed by chunk coordinate.
///
/// Chunks are created the first time any of their tiles is requested and
/// filled in one pass. Eviction is distance based ([`Self::unload_beyond`]);
/// access recency only drives the optional `max_chunks` cap, which is
/// enforced every time a chunk is created.
pub struct ChunkManager {
    generator: ChunkGenerator,
    chunks: HashMap<IVec2, WorldChunk>,
    clock: u64,
    max_chunks: Option<usize>,
}

impl ChunkManager {
    pub fn new(seed: WorldSeed, config: WorldGenConfig) -> Self {
        Self {
            generator: ChunkGenerator::new(seed, config),
            chunks: HashMap::new(),
            clock: 0,
            max_chunks: None,
        }
    }

    pub fn with_max_chunks(mut self, max_chunks: Option<usize>) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    pub fn seed(&self) -> &WorldSeed {
        self.generator.seed()
    }

    pub fn config(&self) -> &WorldGenConfig {
        self.generator.config()
    }

    pub fn world_to_chunk(&self, x: i32, y: i32) -> IVec2 {
        chunk::world_to_chunk(x, y)
    }

    pub fn ensure_chunk(&mut self, coord: IVec2) -> &WorldChunk {
        self.ensure_chunk_mut(coord)
    }

    /// Ensures every chunk whose center lies within `radius + CHUNK_SIZE` of
    /// `center`, generating the missing ones in parallel. Returns the chunk
    /// coordinates in range.
    pub fn ensure_radius(&mut self, center: Vec2, radius: f32) -> Vec<IVec2> {
        let reach = radius.max(0.0) + CHUNK_SIZE as f32;
        let coords = chunks_within(center, reach);

        let missing: Vec<IVec2> = coords
            .iter()
            .copied()
            .filter(|coord| !self.chunks.get(coord).is_some_and(|c| c.generated))
            .collect();

        let generator = &self.generator;
        let generated: Vec<(IVec2, Vec<Tile>)> = missing
            .par_iter()
            .map(|&coord| (coord, generator.generate(coord)))
            .collect();

        if !generated.is_empty() {
            log::debug!(
                "generated {} chunks around ({:.1}, {:.1})",
                generated.len(),
                center.x,
                center.y
            );
        }

        for (coord, tiles) in generated {
            let chunk = self
                .chunks
                .entry(coord)
                .or_insert_with(|| WorldChunk::empty(coord));
            chunk.tiles = tiles;
            chunk.generated = true;
        }

        let tick = self.tick();
        for coord in &coords {
            if let Some(chunk) = self.chunks.get_mut(coord) {
                chunk.last_accessed = tick;
            }
        }

        self.enforce_cap(&coords);
        coords
    }

    /// Always succeeds; generates the owning chunk on demand.
    pub fn get_tile(&mut self, x: i32, y: i32) -> &Tile {
        let chunk = self.ensure_chunk_mut(chunk::world_to_chunk(x, y));
        &chunk.tiles[local_index(x, y)]
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> &mut Tile {
        let chunk = self.ensure_chunk_mut(chunk::world_to_chunk(x, y));
        &mut chunk.tiles[local_index(x, y)]
    }

    /// Looks up without generating anything.
    pub fn has_tile(&self, x: i32, y: i32) -> bool {
        self.peek_tile(x, y).is_some()
    }

    pub fn peek_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.chunks
            .get(&chunk::world_to_chunk(x, y))
            .filter(|c| c.generated)
            .and_then(|c| c.tile(x, y))
    }

    pub fn chunk(&self, coord: IVec2) -> Option<&WorldChunk> {
        self.chunks.get(&coord)
    }

    pub fn loaded_chunks(&self) -> Vec<IVec2> {
        let mut coords: Vec<IVec2> = self.chunks.keys().copied().collect();
        coords.sort_by_key(|c| (c.y, c.x));
        coords
    }

    /// Drops every chunk whose center is farther than
    /// `keep_radius + 2 * CHUNK_SIZE` from `center`. Returns the eviction count.
    pub fn unload_beyond(&mut self, center: Vec2, keep_radius: f32) -> usize {
        let limit = keep_radius + 2.0 * CHUNK_SIZE as f32;
        let before = self.chunks.len();
        self.chunks
            .retain(|coord, _| chunk_center(*coord).distance(center) <= limit);
        let evicted = before - self.chunks.len();
        if evicted > 0 {
            log::debug!("unloaded {evicted} chunks beyond {limit:.1} tiles");
        }
        evicted
    }

    pub fn stats(&self) -> ChunkStats {
        let total_tiles: usize = self.chunks.values().map(|c| c.tiles.len()).sum();
        ChunkStats {
            total_chunks: self.chunks.len(),
            generated_chunks: self.chunks.values().filter(|c| c.generated).count(),
            total_tiles,
            estimated_memory_bytes: total_tiles * BYTES_PER_TILE_ESTIMATE,
        }
    }

    /// Applies `patch` and invalidates every chunk. Nothing is regenerated
    /// until the next access.
    pub fn update_config(&mut self, patch: &WorldGenPatch) {
        let next = self.config().apply(patch);
        self.replace_config(next);
    }

    pub fn replace_config(&mut self, config: WorldGenConfig) {
        let seed = self.seed().clone();
        self.generator = ChunkGenerator::new(seed, config);
        log::info!("world generation config replaced");
        self.invalidate_all();
    }

    pub fn invalidate_all(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.invalidate();
        }
        log::info!("invalidated {} chunks", self.chunks.len());
    }

    /// Marks every tile within `radius` of `center` discovered, generating as
    /// needed. Returns how many tiles were newly revealed.
    pub fn discover_radius(&mut self, center: Vec2, radius: f32) -> usize {
        let radius = radius.max(0.0);
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;

        let mut revealed = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if Vec2::new(x as f32, y as f32).distance(center) > radius {
                    continue;
                }
                let tile = self.tile_mut(x, y);
                if !tile.discovered {
                    tile.discovered = true;
                    revealed += 1;
                }
            }
        }
        revealed
    }

    /// Returns the previous settlement, if any.
    pub fn attach_settlement(
        &mut self,
        x: i32,
        y: i32,
        settlement: Settlement,
    ) -> Option<Settlement> {
        self.tile_mut(x, y).settlement.replace(settlement)
    }

    /// Already generated tiles within `radius` of `center`. Never generates.
    pub fn tiles_in_radius(&self, center: Vec2, radius: f32) -> impl Iterator<Item = &Tile> + '_ {
        let chunk_reach = radius + CHUNK_SIZE as f32;
        self.chunks
            .values()
            .filter(move |c| c.generated && chunk_center(c.coord).distance(center) <= chunk_reach)
            .flat_map(|c| c.tiles.iter())
            .filter(move |t| Vec2::new(t.x as f32, t.y as f32).distance(center) <= radius)
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn ensure_chunk_mut(&mut self, coord: IVec2) -> &mut WorldChunk {
        let tick = self.tick();
        let inserted = !self.chunks.contains_key(&coord);
        let chunk = self
            .chunks
            .entry(coord)
            .or_insert_with(|| WorldChunk::empty(coord));
        if !chunk.generated {
            chunk.tiles = self.generator.generate(coord);
            chunk.generated = true;
            log::debug!("generated chunk ({}, {})", coord.x, coord.y);
        }
        chunk.last_accessed = tick;

        if inserted {
            self.enforce_cap(&[coord]);
        }
        // `coord` is never evicted by the cap check above.
        self.chunks
            .entry(coord)
            .or_insert_with(|| WorldChunk::empty(coord))
    }

    fn enforce_cap(&mut self, protected: &[IVec2]) {
        let Some(cap) = self.max_chunks else {
            return;
        };
        if self.chunks.len() <= cap {
            return;
        }

        let protected: HashSet<IVec2> = protected.iter().copied().collect();
        let mut candidates: Vec<(u64, IVec2)> = self
            .chunks
            .values()
            .filter(|c| !protected.contains(&c.coord))
            .map(|c| (c.last_accessed, c.coord))
            .collect();
        candidates.sort_unstable_by_key(|&(tick, coord)| (tick, coord.y, coord.x));

        let excess = self.chunks.len() - cap;
        let mut evicted = 0;
        for (_, coord) in candidates.into_iter().take(excess) {
            self.chunks.remove(&coord);
            evicted += 1;
        }

        log::warn!(
            "chunk cap {cap} exceeded, evicted {evicted} least recently used chunks ({} resident)",
            self.chunks.len()
        );
    }
}

fn chunks_within(center: Vec2, reach: f32) -> Vec<IVec2> {
    let min = chunk::world_to_chunk(
        (center.x - reach).floor() as i32,
        (center.y - reach).floor() as i32,
    );
    let max = chunk::world_to_chunk(
        (center.x + reach).ceil() as i32,
        (center.y + reach).ceil() as i32,
    );

    let mut coords = Vec::new();
    for cy in min.y..=max.y {
        for cx in min.x..=max.x {
            let coord = IVec2::new(cx, cy);
            if chunk_center(coord).distance(center) <= reach {
                coords.push(coord);
            }
        }
    }
    coords
}
