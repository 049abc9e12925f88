use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FNV_OFFSET: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// The seed a world is reproduced from. Only the text is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldSeed {
    text: String,
    value: u64,
}

impl WorldSeed {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = fnv1a(text.as_bytes());
        Self { text, value }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn noise_seeds(&self) -> NoiseSeeds {
        let mut rng = StdRng::seed_from_u64(self.value);
        NoiseSeeds {
            continent: rng.random(),
            warp_x: rng.random(),
            warp_y: rng.random(),
            detail: rng.random(),
            temperature: rng.random(),
            moisture: rng.random(),
            river: rng.random(),
        }
    }
}

/// One seed per noise field, all drawn from the world seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSeeds {
    pub continent: u32,
    pub warp_x: u32,
    pub warp_y: u32,
    pub detail: u32,
    pub temperature: u32,
    pub moisture: u32,
    pub river: u32,
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}
