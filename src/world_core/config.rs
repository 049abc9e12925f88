use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    pub world: WorldSettings,
    pub generation: WorldGenConfig,
    pub streaming: StreamingConfig,
}

impl RealmConfig {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("no {} found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("loaded {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub seed: String,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: "realm".to_string(),
        }
    }
}

/// Terrain generation parameters. Replacing them invalidates every cached chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Elevation threshold in [0, 1] below which tiles are water.
    pub sea_level: f32,
    /// Inverse wavelength of the landmass noise.
    pub continent_freq: f64,
    /// Inverse wavelength of small terrain features (detail and rivers).
    pub feature_freq: f64,
    /// Distortion, in tiles, applied to coordinates before elevation sampling.
    pub warp_strength: f64,
    /// Nominal extent used only by the latitude falloff; not a clipping boundary.
    pub map_width: u32,
    pub map_height: u32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            sea_level: 0.42,
            continent_freq: 0.008,
            feature_freq: 0.06,
            warp_strength: 24.0,
            map_width: 512,
            map_height: 512,
        }
    }
}

impl WorldGenConfig {
    pub fn apply(&self, patch: &WorldGenPatch) -> Self {
        Self {
            sea_level: patch.sea_level.unwrap_or(self.sea_level),
            continent_freq: patch.continent_freq.unwrap_or(self.continent_freq),
            feature_freq: patch.feature_freq.unwrap_or(self.feature_freq),
            warp_strength: patch.warp_strength.unwrap_or(self.warp_strength),
            map_width: patch.map_width.unwrap_or(self.map_width),
            map_height: patch.map_height.unwrap_or(self.map_height),
        }
    }
}

/// Partial update for [`WorldGenConfig`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenPatch {
    pub sea_level: Option<f32>,
    pub continent_freq: Option<f64>,
    pub feature_freq: Option<f64>,
    pub warp_strength: Option<f64>,
    pub map_width: Option<u32>,
    pub map_height: Option<u32>,
}

impl WorldGenPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Radius in tiles kept generated around the viewer.
    pub view_radius: f32,
    /// Radius in tiles the party reveals through the fog of war.
    pub sight_radius: f32,
    /// Radius in tiles outside which chunks are unloaded.
    pub keep_radius: f32,
    /// Cap on resident chunks, checked whenever a new chunk is created;
    /// least recently accessed chunks go first. `None` leaves growth to the caller.
    pub max_chunks: Option<usize>,
    /// World units from a hex center to a corner in battle grids.
    pub hex_size: f32,
    pub battle_radius: i32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            view_radius: 48.0,
            sight_radius: 12.0,
            keep_radius: 96.0,
            max_chunks: Some(256),
            hex_size: 1.0,
            battle_radius: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RealmConfig, WorldGenConfig, WorldGenPatch};

    #[test]
    fn partial_json_fills_in_defaults() {
        let parsed: RealmConfig =
            serde_json::from_str(r#"{ "generation": { "sea_level": 0.3 } }"#).unwrap();
        assert_eq!(parsed.generation.sea_level, 0.3);
        assert_eq!(
            parsed.generation.continent_freq,
            WorldGenConfig::default().continent_freq
        );
        assert_eq!(parsed.world.seed, "realm");
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let base = WorldGenConfig::default();
        let patch = WorldGenPatch {
            warp_strength: Some(0.0),
            map_height: Some(128),
            ..Default::default()
        };
        let next = base.apply(&patch);
        assert_eq!(next.warp_strength, 0.0);
        assert_eq!(next.map_height, 128);
        assert_eq!(next.sea_level, base.sea_level);
        assert_eq!(next.map_width, base.map_width);
        assert!(!patch.is_empty());
        assert!(WorldGenPatch::default().is_empty());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("realm-gen-missing-config-does-not-exist.json");
        assert_eq!(RealmConfig::load(&path), RealmConfig::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let path = std::env::temp_dir().join(format!(
            "realm-gen-malformed-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(RealmConfig::load(&path), RealmConfig::default());
        let _ = std::fs::remove_file(&path);
    }
}
