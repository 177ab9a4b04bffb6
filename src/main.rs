//! Parallax Brawler - native entry point
//!
//! Windowing and art are external collaborators, so the native binary runs a
//! headless session: the autopilot plays through the counting renderer and
//! the session summary is printed as JSON.

use std::path::Path;

use parallax_brawler::game_loop::{Autopilot, SessionOptions, pacer_for};
use parallax_brawler::renderer::{HeadlessRenderer, NullAssets, clip_timings};
use parallax_brawler::sim::{InputState, SimulationState};
use parallax_brawler::{InputSource, Settings, run_session};

fn main() {
    env_logger::init();
    log::info!("Parallax Brawler (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let seed = settings.resolve_seed();
    let mut state = SimulationState::new(seed);
    let assets = NullAssets::default();
    state.set_timings(clip_timings(&assets));

    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(Autopilot::new(settings.autopilot_fire_interval))
    } else {
        log::warn!("No interactive input in headless mode; the player will stand still");
        Box::new(|_: &SimulationState| InputState::default())
    };
    let mut renderer = HeadlessRenderer::default();
    let mut pacer = pacer_for(&settings);

    let summary = run_session(
        &mut state,
        input.as_mut(),
        &mut renderer,
        &assets,
        pacer.as_mut(),
        SessionOptions::from(&settings),
    );
    log::info!(
        "Rendered {} frames ({} rects, {} texts)",
        renderer.frames,
        renderer.rects,
        renderer.texts
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize session summary: {e}"),
    }
}
