use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::world_core::config::WorldGenConfig;

/// What a save file holds. Chunks are re-derived from the seed on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSave {
    pub seed: String,
    pub generation: WorldGenConfig,
    pub party_position: [f32; 2],
}

impl WorldSave {
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(save) => {
                    log::info!("loaded {}", path.display());
                    Some(save)
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}", path.display());
                    None
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved world state to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::WorldSave;
    use crate::world_core::config::WorldGenConfig;

    #[test]
    fn save_then_load_restores_seed_and_config() {
        let path = std::env::temp_dir().join(format!("realm-gen-save-{}.json", std::process::id()));
        let save = WorldSave {
            seed: "misty-vale".to_string(),
            generation: WorldGenConfig {
                sea_level: 0.5,
                ..WorldGenConfig::default()
            },
            party_position: [12.5, -3.0],
        };
        save.save(&path).unwrap();
        assert_eq!(WorldSave::load(&path), Some(save));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_save_is_none() {
        let path = std::env::temp_dir().join("realm-gen-save-that-does-not-exist.json");
        assert!(WorldSave::load(&path).is_none());
    }
}
