use glam::IVec2;

use crate::world_core::biome::{classify, Biome, MOUNTAIN_ELEVATION};
use crate::world_core::chunk::Tile;
use crate::world_core::config::WorldGenConfig;
use crate::world_core::heightmap::Heightmap;
use crate::world_core::layer::Layer;
use crate::world_core::seed::WorldSeed;

/// Produces a single tile from its world coordinates.
pub struct TerrainGenerator {
    seed: WorldSeed,
    heightmap: Heightmap,
}

impl TerrainGenerator {
    pub fn new(seed: WorldSeed, config: WorldGenConfig) -> Self {
        let heightmap = Heightmap::new(seed.noise_seeds(), config);
        Self { seed, heightmap }
    }

    pub fn seed(&self) -> &WorldSeed {
        &self.seed
    }

    pub fn config(&self) -> &WorldGenConfig {
        self.heightmap.config()
    }

    pub fn sample_tile(&self, x: i32, y: i32) -> Tile {
        let elevation = self.heightmap.sample_elevation(x, y);
        let temperature = self.heightmap.sample_temperature(x, y, elevation);
        let moisture = self.heightmap.sample_moisture(x, y, elevation);
        let biome = classify(elevation, temperature, moisture, self.config().sea_level);

        let river = !matches!(biome, Biome::Ocean | Biome::Coast)
            && elevation <= MOUNTAIN_ELEVATION
            && self.heightmap.sample_river(x, y);

        Tile {
            x,
            y,
            biome,
            elevation,
            temperature,
            moisture,
            river,
            road: false,
            settlement: None,
            discovered: false,
        }
    }
}

impl Layer<IVec2, Tile> for TerrainGenerator {
    fn generate(&self, position: IVec2) -> Tile {
        self.sample_tile(position.x, position.y)
    }
}
