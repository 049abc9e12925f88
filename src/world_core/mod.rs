pub mod biome;
pub mod chunk;
pub mod chunk_generator;
pub mod config;
pub mod heightmap;
pub mod hex;
pub mod layer;
pub mod save;
pub mod seed;
pub mod terrain;
