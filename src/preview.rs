use std::path::Path;

use anyhow::{Context, Result};
use glam::IVec2;
use image::{Rgba, RgbaImage};

use crate::world_core::biome::Biome;
use crate::world_runtime::chunk_manager::ChunkManager;

const FOG: [u8; 4] = [38, 38, 44, 255];
const UNGENERATED: [u8; 4] = [0, 0, 0, 255];
const RIVER: [u8; 3] = [64, 120, 210];

pub fn biome_color_rgba(biome: Biome) -> [u8; 4] {
    let [r, g, b] = match biome {
        Biome::Ocean => [38, 76, 140],
        Biome::Coast => [222, 204, 150],
        Biome::Grass => [112, 168, 72],
        Biome::Forest => [46, 110, 58],
        Biome::Jungle => [24, 92, 40],
        Biome::Savanna => [186, 170, 92],
        Biome::Desert => [222, 196, 120],
        Biome::Taiga => [70, 110, 96],
        Biome::Tundra => [150, 160, 150],
        Biome::Swamp => [84, 96, 64],
        Biome::Mountain => [118, 112, 108],
        Biome::Snow => [236, 240, 245],
    };
    [r, g, b, 255]
}

/// Draws the square of tiles centered on `center`, one pixel per tile.
/// Only already generated tiles are drawn; with `fog_of_war` set,
/// undiscovered ones are covered.
pub fn render_preview(
    chunks: &ChunkManager,
    center: IVec2,
    half_extent: u32,
    fog_of_war: bool,
) -> RgbaImage {
    let side = half_extent * 2 + 1;
    let origin = center - IVec2::splat(half_extent as i32);

    RgbaImage::from_fn(side, side, |px, py| {
        let x = origin.x + px as i32;
        let y = origin.y + py as i32;
        let color = match chunks.peek_tile(x, y) {
            None => UNGENERATED,
            Some(tile) if fog_of_war && !tile.discovered => FOG,
            Some(tile) if tile.river => {
                let [r, g, b, a] = biome_color_rgba(tile.biome);
                [
                    ((r as u16 + RIVER[0] as u16 * 3) / 4) as u8,
                    ((g as u16 + RIVER[1] as u16 * 3) / 4) as u8,
                    ((b as u16 + RIVER[2] as u16 * 3) / 4) as u8,
                    a,
                ]
            }
            Some(tile) => biome_color_rgba(tile.biome),
        };
        Rgba(color)
    })
}

pub fn save_preview(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    image
        .save(path)
        .with_context(|| format!("failed to encode PNG {}", path.display()))?;
    log::info!("preview saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{biome_color_rgba, render_preview, save_preview, FOG, UNGENERATED};
    use crate::world_core::biome::Biome;
    use crate::world_core::config::WorldGenConfig;
    use crate::world_core::seed::WorldSeed;
    use crate::world_runtime::chunk_manager::ChunkManager;
    use glam::{IVec2, Vec2};

    #[test]
    fn biome_colors_are_distinct() {
        let mut colors: Vec<_> = Biome::ALL.iter().map(|b| biome_color_rgba(*b)).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), Biome::ALL.len());
    }

    #[test]
    fn preview_shows_fog_and_discovered_tiles() {
        let mut chunks =
            ChunkManager::new(WorldSeed::from_text("preview"), WorldGenConfig::default());
        chunks.ensure_chunk(IVec2::ZERO);
        chunks.discover_radius(Vec2::new(8.0, 8.0), 2.0);

        let image = render_preview(&chunks, IVec2::new(8, 8), 4, true);
        assert_eq!(image.dimensions(), (9, 9));
        assert_ne!(image.get_pixel(4, 4).0, FOG);
        assert_eq!(image.get_pixel(0, 0).0, FOG);

        let far = render_preview(&chunks, IVec2::new(-100, -100), 1, false);
        assert_eq!(far.get_pixel(1, 1).0, UNGENERATED);
    }

    #[test]
    fn preview_writes_png() {
        let mut chunks =
            ChunkManager::new(WorldSeed::from_text("png"), WorldGenConfig::default());
        chunks.ensure_chunk(IVec2::ZERO);
        let image = render_preview(&chunks, IVec2::new(16, 16), 8, false);
        let path = std::env::temp_dir().join(format!("realm-gen-preview-{}.png", std::process::id()));
        save_preview(&image, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        let _ = std::fs::remove_file(&path);
    }
}
