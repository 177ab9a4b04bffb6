//! Fixed timestep simulation tick
//!
//! Advances the whole session by one step. The order mirrors how a frame is
//! experienced: input edges, arena bookkeeping and spawning, player, enemies,
//! projectiles, damage, then the camera.

use super::arena::{ArenaEvent, WaveSpec};
use super::combat::{CombatReport, resolve_contacts, resolve_projectiles};
use super::enemy::EnemyContext;
use super::spawner::spawn_wave;
use super::state::SimulationState;
use crate::consts::*;
use crate::follow_camera_x;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Held keys
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Fire button held
    pub fire: bool,
    /// Fire button went down this tick
    pub fire_pressed: bool,
    /// Window closed / escape; handled by the session loop
    pub quit: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &InputState) {
    if state.game_over {
        return;
    }
    state.time_ticks += 1;

    if input.fire_pressed {
        let bullet = state.player.fire();
        state.projectiles.push(bullet);
    }

    update_arena(state);

    if !state.director.is_locked() && state.ambient.tick(&mut state.rng) {
        let wave = WaveSpec::ambient(&mut state.rng);
        let left = state.camera.x;
        spawn(state, &wave, left, left + VIEWPORT_WIDTH);
    }

    state.player.handle_input(input, state.director.bounds());
    let world_bounds = state.world.bounds();
    state.player.update(&state.world.platforms, &world_bounds);

    update_enemies(state);

    for shot in &mut state.projectiles {
        shot.update(&state.timings);
    }

    let mut report = CombatReport::default();
    resolve_projectiles(
        &mut state.projectiles,
        &mut state.enemies,
        &mut state.player,
        &mut report,
    );
    state.enemies_defeated += u64::from(report.enemies_killed);
    state.hits_landed += u64::from(report.enemies_hit);
    state.hits_taken += u64::from(report.player_hits);

    if state.player.is_dead() {
        state.game_over = true;
        log::info!(
            "game over at tick {} ({} arenas cleared, {} enemies defeated)",
            state.time_ticks,
            state.director.arenas_cleared(),
            state.enemies_defeated
        );
    }

    let follow_x = follow_camera_x(state.player.rect().center_x());
    state.camera.update(state.director.camera_lock(), follow_x);
}

/// Arena trigger and wave/clear progression
fn update_arena(state: &mut SimulationState) {
    if let Some(ArenaEvent::Locked {
        index,
        wave,
        bounds,
    }) = state.director.check_trigger(state.player.rect().center_x())
    {
        state.enemies.clear();
        log::info!(
            "arena {} locked at x={:.0} ({} enemies incoming)",
            index + 1,
            bounds.left,
            wave.total()
        );
        spawn(state, &wave, bounds.left, bounds.right);
    }

    match state.director.step(state.enemies.len()) {
        Some(ArenaEvent::NextWave { wave, bounds }) => {
            log::info!("next wave: {} enemies", wave.total());
            spawn(state, &wave, bounds.left, bounds.right);
        }
        Some(ArenaEvent::Cleared { index }) => {
            log::info!("arena {} cleared", index + 1);
            state.camera.begin_transition();
        }
        _ => {}
    }
}

/// Update every enemy, streaming replacements for those left behind the camera
fn update_enemies(state: &mut SimulationState) {
    let behind_x = state.camera.x - DESPAWN_MARGIN;
    let ahead_x = state.camera.x + VIEWPORT_WIDTH;
    let mut enemies = std::mem::take(&mut state.enemies);
    let mut fresh = Vec::new();

    let player_rect = *state.player.rect();
    let ctx = EnemyContext {
        player: &player_rect,
        platforms: &state.world.platforms,
        timings: &state.timings,
    };
    let ground_top = state.world.ground_top();

    enemies.retain_mut(|enemy| {
        if enemy.rect().right() < behind_x {
            let wave = WaveSpec::replacement(&mut state.rng);
            spawn_wave(
                &wave,
                ahead_x,
                ahead_x + SPAWN_MARGIN,
                ground_top,
                &mut state.rng,
                &mut fresh,
            );
            return false;
        }
        enemy.update(&ctx, &mut state.projectiles)
    });

    let mut report = CombatReport::default();
    resolve_contacts(&mut state.player, &enemies, &mut report);
    state.hits_taken += u64::from(report.player_hits);

    enemies.append(&mut fresh);
    state.enemies = enemies;
}

fn spawn(state: &mut SimulationState, wave: &WaveSpec, left: f32, right: f32) {
    let ground_top = state.world.ground_top();
    spawn_wave(
        wave,
        left,
        right,
        ground_top,
        &mut state.rng,
        &mut state.enemies,
    );
}
