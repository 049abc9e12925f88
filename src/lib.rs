//! Procedural world generation for a tile-map explorer: seeded terrain and
//! biome sampling, a lazily streamed chunk cache, and hex-grid conversion for
//! tactical battles.

pub mod cli;
pub mod preview;
pub mod update_channel;
pub mod world_core;
pub mod world_runtime;
