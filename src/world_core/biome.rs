use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Ocean,
    Coast,
    Grass,
    Forest,
    Jungle,
    Savanna,
    Desert,
    Taiga,
    Tundra,
    Swamp,
    Mountain,
    Snow,
}

impl Biome {
    pub const ALL: [Biome; 12] = [
        Biome::Ocean,
        Biome::Coast,
        Biome::Grass,
        Biome::Forest,
        Biome::Jungle,
        Biome::Savanna,
        Biome::Desert,
        Biome::Taiga,
        Biome::Tundra,
        Biome::Swamp,
        Biome::Mountain,
        Biome::Snow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::Coast => "coast",
            Biome::Grass => "grass",
            Biome::Forest => "forest",
            Biome::Jungle => "jungle",
            Biome::Savanna => "savanna",
            Biome::Desert => "desert",
            Biome::Taiga => "taiga",
            Biome::Tundra => "tundra",
            Biome::Swamp => "swamp",
            Biome::Mountain => "mountain",
            Biome::Snow => "snow",
        }
    }
}

/// Elevation band used by the mountain check in [`classify`].
pub const MOUNTAIN_ELEVATION: f32 = 0.7;

/// Classifies a tile from its three climate scalars.
///
/// Order matters: elevation extremes are checked before any
/// temperature/moisture band, so a high peak on the equator is still
/// `Mountain` (or `Snow`) rather than `Jungle`. First match wins.
pub fn classify(elevation: f32, temperature: f32, moisture: f32, sea_level: f32) -> Biome {
    if elevation < sea_level - 0.02 {
        return Biome::Ocean;
    }
    if elevation < sea_level + 0.02 {
        return Biome::Coast;
    }

    if elevation > MOUNTAIN_ELEVATION {
        return if temperature < 0.2 {
            Biome::Snow
        } else {
            Biome::Mountain
        };
    }

    if temperature < 0.15 {
        return if moisture > 0.3 {
            Biome::Tundra
        } else {
            Biome::Snow
        };
    }

    if temperature < 0.35 {
        return if moisture > 0.6 {
            Biome::Taiga
        } else {
            Biome::Tundra
        };
    }

    if temperature < 0.65 {
        return if moisture > 0.7 {
            Biome::Forest
        } else if moisture > 0.4 {
            Biome::Grass
        } else if moisture > 0.2 {
            Biome::Savanna
        } else {
            Biome::Desert
        };
    }

    if moisture > 0.8 {
        Biome::Jungle
    } else if moisture > 0.6 {
        Biome::Forest
    } else if moisture > 0.4 {
        Biome::Savanna
    } else if moisture > 0.2 {
        Biome::Grass
    } else if elevation < 0.5 && moisture > 0.6 {
        // Unreachable while the Forest band covers moisture > 0.6.
        Biome::Swamp
    } else {
        Biome::Desert
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Biome};

    #[test]
    fn cold_peak_is_snow_regardless_of_moisture() {
        assert_eq!(classify(0.85, 0.1, 0.0, 0.0), Biome::Snow);
        assert_eq!(classify(0.85, 0.1, 1.0, 0.0), Biome::Snow);
    }

    #[test]
    fn warm_peak_is_mountain_not_jungle() {
        assert_eq!(classify(0.9, 0.95, 0.95, 0.4), Biome::Mountain);
    }

    #[test]
    fn temperate_wet_lowland_is_forest() {
        assert_eq!(classify(0.3, 0.5, 0.75, 0.0), Biome::Forest);
    }

    #[test]
    fn below_sea_level_is_ocean_regardless_of_climate() {
        for &(t, m) in &[(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.1, 0.9)] {
            assert_eq!(classify(-0.05, t, m, 0.0), Biome::Ocean);
        }
    }

    #[test]
    fn shoreline_band_is_coast() {
        assert_eq!(classify(0.41, 0.5, 0.5, 0.42), Biome::Coast);
        assert_eq!(classify(0.43, 0.9, 0.9, 0.42), Biome::Coast);
        assert_eq!(classify(0.45, 0.5, 0.5, 0.42), Biome::Grass);
    }

    #[test]
    fn cold_bands() {
        assert_eq!(classify(0.5, 0.1, 0.5, 0.0), Biome::Tundra);
        assert_eq!(classify(0.5, 0.1, 0.2, 0.0), Biome::Snow);
        assert_eq!(classify(0.5, 0.3, 0.7, 0.0), Biome::Taiga);
        assert_eq!(classify(0.5, 0.3, 0.5, 0.0), Biome::Tundra);
    }

    #[test]
    fn temperate_moisture_bands() {
        assert_eq!(classify(0.5, 0.5, 0.5, 0.0), Biome::Grass);
        assert_eq!(classify(0.5, 0.5, 0.3, 0.0), Biome::Savanna);
        assert_eq!(classify(0.5, 0.5, 0.1, 0.0), Biome::Desert);
    }

    #[test]
    fn hot_moisture_bands() {
        assert_eq!(classify(0.5, 0.8, 0.9, 0.0), Biome::Jungle);
        assert_eq!(classify(0.5, 0.8, 0.7, 0.0), Biome::Forest);
        assert_eq!(classify(0.5, 0.8, 0.5, 0.0), Biome::Savanna);
        assert_eq!(classify(0.5, 0.8, 0.3, 0.0), Biome::Grass);
        assert_eq!(classify(0.5, 0.8, 0.1, 0.0), Biome::Desert);
    }

    #[test]
    fn every_biome_has_a_distinct_name() {
        let mut names: Vec<_> = Biome::ALL.iter().map(|b| b.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }
}
