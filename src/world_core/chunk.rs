use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::world_core::biome::Biome;

/// Tiles per chunk side.
pub const CHUNK_SIZE: i32 = 32;
pub const TILES_PER_CHUNK: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementSize {
    Village,
    Town,
    City,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub size: SettlementSize,
    pub faction: String,
    pub population: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub biome: Biome,
    pub elevation: f32,
    pub temperature: f32,
    pub moisture: f32,
    pub river: bool,
    pub road: bool,
    pub settlement: Option<Settlement>,
    /// Fog of war: undiscovered tiles are generated but not shown.
    pub discovered: bool,
}

/// A 32x32 block of tiles, generated in one pass on first access.
#[derive(Debug, Clone)]
pub struct WorldChunk {
    pub coord: IVec2,
    /// Row-major by local position; empty until generated.
    pub tiles: Vec<Tile>,
    pub generated: bool,
    pub last_accessed: u64,
}

impl WorldChunk {
    pub fn empty(coord: IVec2) -> Self {
        Self {
            coord,
            tiles: Vec::new(),
            generated: false,
            last_accessed: 0,
        }
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        let idx = self.local_index(x, y)?;
        self.tiles.get(idx)
    }

    pub fn invalidate(&mut self) {
        self.tiles.clear();
        self.generated = false;
    }

    fn local_index(&self, x: i32, y: i32) -> Option<usize> {
        if world_to_chunk(x, y) != self.coord {
            return None;
        }
        Some(local_index(x, y))
    }
}

/// Owning chunk of a tile; floor division so negative coordinates work.
pub fn world_to_chunk(x: i32, y: i32) -> IVec2 {
    IVec2::new(x.div_euclid(CHUNK_SIZE), y.div_euclid(CHUNK_SIZE))
}

/// Row-major index of a tile inside its own chunk.
pub fn local_index(x: i32, y: i32) -> usize {
    let lx = x.rem_euclid(CHUNK_SIZE);
    let ly = y.rem_euclid(CHUNK_SIZE);
    (ly * CHUNK_SIZE + lx) as usize
}

pub fn chunk_center(coord: IVec2) -> Vec2 {
    let half = CHUNK_SIZE as f32 * 0.5;
    Vec2::new(
        coord.x as f32 * CHUNK_SIZE as f32 + half,
        coord.y as f32 * CHUNK_SIZE as f32 + half,
    )
}
