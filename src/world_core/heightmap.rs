use noise::{NoiseFn, OpenSimplex};

use crate::world_core::config::WorldGenConfig;
use crate::world_core::seed::NoiseSeeds;

const CONTINENT_OCTAVES: u32 = 4;
const DETAIL_WEIGHT: f64 = 0.08;
const RIVER_BAND: f64 = 0.025;

/// Continuous climate fields sampled at integer tile coordinates.
pub struct Heightmap {
    continental: OpenSimplex,
    warp_x: OpenSimplex,
    warp_y: OpenSimplex,
    detail: OpenSimplex,
    temperature: OpenSimplex,
    moisture: OpenSimplex,
    river: OpenSimplex,
    config: WorldGenConfig,
}

impl Heightmap {
    pub fn new(seeds: NoiseSeeds, config: WorldGenConfig) -> Self {
        Self {
            continental: OpenSimplex::new(seeds.continent),
            warp_x: OpenSimplex::new(seeds.warp_x),
            warp_y: OpenSimplex::new(seeds.warp_y),
            detail: OpenSimplex::new(seeds.detail),
            temperature: OpenSimplex::new(seeds.temperature),
            moisture: OpenSimplex::new(seeds.moisture),
            river: OpenSimplex::new(seeds.river),
            config,
        }
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Domain-warped landmass noise plus a small detail band, in [0, 1].
    pub fn sample_elevation(&self, x: i32, y: i32) -> f32 {
        let x = x as f64;
        let y = y as f64;
        let c = &self.config;

        let warp_freq = c.continent_freq * 2.0;
        let wx = x + self.warp_x.get([x * warp_freq, y * warp_freq]) * c.warp_strength;
        let wy = y + self.warp_y.get([x * warp_freq, y * warp_freq]) * c.warp_strength;

        let broad = fbm(
            &self.continental,
            wx * c.continent_freq,
            wy * c.continent_freq,
            CONTINENT_OCTAVES,
        );
        let rough = self.detail.get([x * c.feature_freq, y * c.feature_freq]);

        (broad * 0.5 + 0.5 + rough * DETAIL_WEIGHT).clamp(0.0, 1.0) as f32
    }

    /// Latitude falloff toward both poles of the nominal map, cooled by altitude.
    pub fn sample_temperature(&self, x: i32, y: i32, elevation: f32) -> f32 {
        let c = &self.config;
        let half_height = (c.map_height.max(2) as f64) * 0.5;
        let latitude = ((y as f64 - half_height).abs() / half_height).min(1.0);

        let wobble_freq = 8.0 / c.map_width.max(1) as f64;
        let wobble = self
            .temperature
            .get([x as f64 * wobble_freq, y as f64 * wobble_freq]);

        let altitude_cooling = (elevation as f64 - 0.5).max(0.0);
        (1.0 - latitude - altitude_cooling + wobble * 0.08).clamp(0.0, 1.0) as f32
    }

    pub fn sample_moisture(&self, x: i32, y: i32, elevation: f32) -> f32 {
        let x = x as f64;
        let y = y as f64;
        let freq = self.config.continent_freq * 2.5;
        let base = fbm(&self.moisture, x * freq, y * freq, 2);
        let highland_drying = (elevation as f64 - 0.5) * 0.2;
        (base * 0.5 + 0.5 - highland_drying).clamp(0.0, 1.0) as f32
    }

    /// True inside the thin zero-crossing band of the river noise.
    pub fn sample_river(&self, x: i32, y: i32) -> bool {
        let freq = self.config.feature_freq * 0.25;
        self.river.get([x as f64 * freq, y as f64 * freq]).abs() < RIVER_BAND
    }
}

fn fbm(source: &OpenSimplex, x: f64, y: f64, octaves: u32) -> f64 {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut norm = 0.0;
    for _ in 0..octaves {
        sum += source.get([x * frequency, y * frequency]) * amplitude;
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    sum / norm
}

#[cfg(test)]
mod tests {
    use super::Heightmap;
    use crate::world_core::config::WorldGenConfig;
    use crate::world_core::seed::WorldSeed;

    fn heightmap(config: WorldGenConfig) -> Heightmap {
        Heightmap::new(WorldSeed::from_text("fields").noise_seeds(), config)
    }

    #[test]
    fn fields_stay_in_unit_range() {
        let map = heightmap(WorldGenConfig::default());
        for y in (-600..600).step_by(37) {
            for x in (-600..600).step_by(41) {
                let e = map.sample_elevation(x, y);
                let t = map.sample_temperature(x, y, e);
                let m = map.sample_moisture(x, y, e);
                for v in [e, t, m] {
                    assert!((0.0..=1.0).contains(&v), "{v} out of range at {x},{y}");
                }
            }
        }
    }

    #[test]
    fn poles_are_colder_than_equator() {
        let map = heightmap(WorldGenConfig::default());
        let equator = map.sample_temperature(10, 256, 0.3);
        let pole = map.sample_temperature(10, 0, 0.3);
        assert!(pole < equator);
        assert!(pole < 0.15);
    }

    #[test]
    fn altitude_cools() {
        let map = heightmap(WorldGenConfig::default());
        let low = map.sample_temperature(7, 200, 0.4);
        let high = map.sample_temperature(7, 200, 0.9);
        assert!(high < low);
    }

    #[test]
    fn warp_strength_changes_elevation() {
        let calm = heightmap(WorldGenConfig {
            warp_strength: 0.0,
            ..WorldGenConfig::default()
        });
        let warped = heightmap(WorldGenConfig {
            warp_strength: 80.0,
            ..WorldGenConfig::default()
        });
        let differs = (0..64).any(|i| {
            (calm.sample_elevation(i * 13, i * 7) - warped.sample_elevation(i * 13, i * 7)).abs()
                > 1e-4
        });
        assert!(differs);
    }
}
