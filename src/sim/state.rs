//! Simulation state and session reporting types
//!
//! Everything a tick reads or writes lives in [`SimulationState`], including
//! the seeded RNG, so two states built from the same seed and fed the same
//! inputs stay identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::ClipTimings;
use super::arena::{Arena, ArenaDirector, default_arenas};
use super::camera::Camera;
use super::enemy::Enemy;
use super::geom::Rect;
use super::player::Player;
use super::projectile::Projectile;
use super::spawner::AmbientSpawner;
use crate::consts::*;

/// Static level geometry, fixed for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    /// Solid rectangles; the first one is the ground
    pub platforms: Vec<Rect>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            platforms: vec![Rect::new(
                0.0,
                VIEWPORT_HEIGHT - GROUND_HEIGHT,
                WORLD_WIDTH,
                GROUND_HEIGHT,
            )],
        }
    }
}

impl World {
    /// Top of the ground platform; spawn heights are measured from here
    pub fn ground_top(&self) -> f32 {
        self.platforms
            .first()
            .map_or(VIEWPORT_HEIGHT - GROUND_HEIGHT, |p| p.top())
    }

    /// Rectangle the player is clamped inside
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, VIEWPORT_HEIGHT)
    }
}

/// Arena/camera progression as seen from outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    /// Camera follows the player; ambient spawns run
    FreeRoam,
    /// Locked in an arena with enemies alive or waves queued
    ArenaActive,
    /// Arena wiped out, counting down to unlock
    ArenaClearing,
    /// Camera easing back to the player after an arena
    Transitioning,
}

/// Snapshot for HUDs and callers polling the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub hp: i32,
    pub max_hp: i32,
    /// Arenas completed so far (also the index of the next one)
    pub arena_index: usize,
    pub arena_count: usize,
    pub game_over: bool,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: u64,
    pub arenas_cleared: usize,
    pub enemies_defeated: u64,
    /// Player bullets that struck an enemy
    pub hits_landed: u64,
    /// Hits the player actually took (ignored ones excluded)
    pub hits_taken: u64,
    pub final_hp: i32,
    pub game_over: bool,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Player bullets and enemy shots in spawn order
    pub projectiles: Vec<Projectile>,
    pub director: ArenaDirector,
    pub camera: Camera,
    pub ambient: AmbientSpawner,
    /// Animation frame durations from the asset layer
    #[serde(skip)]
    pub timings: ClipTimings,
    /// Terminal: once set, ticks are no-ops
    pub game_over: bool,
    pub enemies_defeated: u64,
    pub hits_landed: u64,
    pub hits_taken: u64,
}

impl SimulationState {
    /// New session on the stock arena script
    pub fn new(seed: u64) -> Self {
        Self::with_arenas(seed, default_arenas())
    }

    /// New session with a custom arena list
    pub fn with_arenas(seed: u64, arenas: Vec<Arena>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::default();
        let player = Player::new(world.ground_top());
        let ambient = AmbientSpawner::new(&mut rng);
        let camera = Camera::new(crate::follow_camera_x(player.rect().center_x()));

        log::info!("session seeded with {seed}, {} arenas", arenas.len());

        Self {
            seed,
            rng,
            time_ticks: 0,
            world,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            director: ArenaDirector::new(arenas),
            camera,
            ambient,
            timings: ClipTimings::default(),
            game_over: false,
            enemies_defeated: 0,
            hits_landed: 0,
            hits_taken: 0,
        }
    }

    /// Replace the animation timings (typically from loaded assets)
    pub fn set_timings(&mut self, timings: ClipTimings) {
        self.timings = timings;
    }

    pub fn phase(&self) -> ArenaPhase {
        match self.director.clearing_ticks() {
            Some(_) => ArenaPhase::ArenaClearing,
            None if self.director.is_locked() => ArenaPhase::ArenaActive,
            None if self.camera.is_transitioning() => ArenaPhase::Transitioning,
            None => ArenaPhase::FreeRoam,
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            arena_index: self.director.arenas_cleared(),
            arena_count: self.director.arenas.len(),
            game_over: self.game_over,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            ticks: self.time_ticks,
            arenas_cleared: self.director.arenas_cleared(),
            enemies_defeated: self.enemies_defeated,
            hits_landed: self.hits_landed,
            hits_taken: self.hits_taken,
            final_hp: self.player.hp,
            game_over: self.game_over,
        }
    }

    /// Camera viewport in world coordinates
    pub fn viewport(&self) -> Rect {
        Rect::new(self.camera.x, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}
