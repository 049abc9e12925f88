use glam::IVec2;
use rayon::prelude::*;

use crate::world_core::chunk::{Tile, CHUNK_SIZE, TILES_PER_CHUNK};
use crate::world_core::config::WorldGenConfig;
use crate::world_core::layer::Layer;
use crate::world_core::seed::WorldSeed;
use crate::world_core::terrain::TerrainGenerator;

pub struct ChunkGenerator {
    terrain: TerrainGenerator,
}

impl ChunkGenerator {
    pub fn new(seed: WorldSeed, config: WorldGenConfig) -> Self {
        Self {
            terrain: TerrainGenerator::new(seed, config),
        }
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn seed(&self) -> &WorldSeed {
        self.terrain.seed()
    }

    pub fn config(&self) -> &WorldGenConfig {
        self.terrain.config()
    }
}

impl Layer<IVec2, Vec<Tile>> for ChunkGenerator {
    /// All tiles of a chunk in row-major local order.
    fn generate(&self, coord: IVec2) -> Vec<Tile> {
        let origin = coord * CHUNK_SIZE;
        let side = CHUNK_SIZE as usize;
        (0..TILES_PER_CHUNK)
            .into_par_iter()
            .map(|idx| {
                let x = origin.x + (idx % side) as i32;
                let y = origin.y + (idx / side) as i32;
                self.terrain.generate(IVec2::new(x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkGenerator;
    use crate::world_core::chunk::{local_index, world_to_chunk, TILES_PER_CHUNK};
    use crate::world_core::config::WorldGenConfig;
    use crate::world_core::layer::Layer;
    use crate::world_core::seed::WorldSeed;
    use glam::IVec2;

    #[test]
    fn tiles_are_laid_out_row_major_inside_the_chunk() {
        let gen = ChunkGenerator::new(WorldSeed::from_text("layout"), WorldGenConfig::default());
        let coord = IVec2::new(-2, 3);
        let tiles = gen.generate(coord);
        assert_eq!(tiles.len(), TILES_PER_CHUNK);
        for (idx, tile) in tiles.iter().enumerate() {
            assert_eq!(world_to_chunk(tile.x, tile.y), coord);
            assert_eq!(local_index(tile.x, tile.y), idx);
        }
    }

    #[test]
    fn chunk_tiles_match_point_samples() {
        let gen = ChunkGenerator::new(WorldSeed::from_text("points"), WorldGenConfig::default());
        let tiles = gen.generate(IVec2::new(1, 1));
        let sampled = &tiles[5 * 32 + 7];
        assert_eq!(*sampled, gen.terrain().sample_tile(32 + 7, 32 + 5));
    }
}
