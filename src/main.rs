use anyhow::Result;
use glam::IVec2;

use realm_gen::cli::CliConfig;
use realm_gen::preview::{render_preview, save_preview};
use realm_gen::update_channel::{StaticUpdateChannel, UpdateChannel, UpdateStatus};
use realm_gen::world_core::config::RealmConfig;
use realm_gen::world_core::save::WorldSave;
use realm_gen::world_runtime::runtime::WorldRuntime;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = CliConfig::from_env_args()?;

    let mut updates = StaticUpdateChannel::new(env!("CARGO_PKG_VERSION"));
    updates.subscribe(Box::new(|status: &UpdateStatus| log::debug!("update channel: {status:?}")));
    match updates.check_for_updates() {
        UpdateStatus::UpToDate { version } => log::info!("realm-gen {version} is up to date"),
        other => log::info!("update status: {other:?}"),
    }

    let mut config = RealmConfig::load(&cli.config_path);
    if let Some(seed) = &cli.seed {
        config.world.seed = seed.clone();
    }

    let mut world = match cli.load_path.as_deref().and_then(WorldSave::load) {
        Some(save) => WorldRuntime::from_save(&save, config.streaming.clone()),
        None => WorldRuntime::new(&config),
    };

    let position = cli.position.unwrap_or(world.party_position());
    world.update(position);

    let stats = world.stats();
    log::info!(
        "party at ({:.1}, {:.1}) in chunk ({}, {}): {} chunks, {} tiles, ~{} KiB, {} revealed, {} evicted",
        stats.party_position.x,
        stats.party_position.y,
        stats.party_chunk.x,
        stats.party_chunk.y,
        stats.chunks.total_chunks,
        stats.chunks.total_tiles,
        stats.chunks.estimated_memory_bytes / 1024,
        stats.revealed_tiles,
        stats.evicted_chunks,
    );

    if cli.battle {
        let battle = world.begin_battle();
        log::info!(
            "battle grid origin ({}, {}) with {} hexes on {}",
            battle.origin.q,
            battle.origin.r,
            battle.hexes.len(),
            battle.terrain.map(|b| b.name()).unwrap_or("unknown terrain"),
        );
    }

    if let Some(path) = &cli.preview_path {
        let center = IVec2::new(position.x.floor() as i32, position.y.floor() as i32);
        let half_extent = world.streaming().view_radius.max(0.0) as u32;
        let image = render_preview(world.chunks(), center, half_extent, cli.fog_of_war);
        save_preview(&image, path)?;
    }

    if let Some(path) = &cli.save_path {
        world.to_save().save(path)?;
    }

    Ok(())
}
