//! Parallax Brawler - A side-scrolling arena brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, AI, combat, arenas, camera)
//! - `renderer`: Renderer / asset collaborator traits and scene composition
//! - `game_loop`: Fixed-rate session loop with frame pacing
//! - `settings`: Session settings persisted as JSON

pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{FramePacer, InputSource, run_session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Scrollable world extent
    pub const WORLD_WIDTH: f32 = 3200.0;
    /// Height of the ground slab along the bottom of the world
    pub const GROUND_HEIGHT: f32 = 40.0;

    pub const GRAVITY: f32 = 0.8;
    /// Distance beyond world/camera edges past which enemies are removed
    pub const DESPAWN_MARGIN: f32 = 360.0;
    /// Distance outside a bound at which wave members appear
    pub const SPAWN_MARGIN: f32 = 150.0;
    /// Vertical slack for the ground-beneath probe
    pub const GROUND_PROBE_TOLERANCE: f32 = 4.0;

    /// Player
    pub const PLAYER_WIDTH: f32 = 84.0;
    pub const PLAYER_HEIGHT: f32 = 144.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0; // midbottom
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP: f32 = 15.0;
    pub const PLAYER_MAX_HP: i32 = 50;
    pub const INVULN_TICKS: u32 = 30;
    pub const KNOCKBACK_X: f32 = 6.0;
    pub const KNOCKBACK_Y: f32 = -4.0;
    /// Invulnerability blink period (ticks per visibility toggle)
    pub const BLINK_TICKS: u32 = 4;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_WIDTH: f32 = 24.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    /// Horizontal muzzle offset from the player's center
    pub const MUZZLE_OFFSET: f32 = 45.0;
    /// Damage a player bullet deals to an enemy
    pub const BULLET_DAMAGE: i32 = 1;

    /// Enemy projectiles
    pub const ENEMY_SHOT_SPEED: f32 = 6.0;
    pub const ENEMY_SHOT_DAMAGE: i32 = 1;
    pub const ENEMY_SHOT_SIZE: f32 = 36.0;

    /// Shared enemy body size (sprite extents)
    pub const ENEMY_WIDTH: f32 = 96.0;
    pub const ENEMY_HEIGHT: f32 = 144.0;
    /// Enemies spawn this far above the ground top
    pub const ENEMY_SPAWN_HEIGHT: f32 = 144.0;
    /// Hit-flash duration (0.3 s)
    pub const HIT_FLASH_TICKS: u32 = 18;

    /// Shooter
    pub const SHOOTER_HP: i32 = 3;
    pub const SHOOTER_DAMAGE: i32 = 1;
    pub const SHOOTER_SPEED_MIN: f32 = 1.0;
    pub const SHOOTER_SPEED_MAX: f32 = 3.0;
    /// Shot interval range (1200..2000 ms)
    pub const SHOOTER_SHOT_INTERVAL_MIN: u32 = 72;
    pub const SHOOTER_SHOT_INTERVAL_MAX: u32 = 120;
    /// Jump cooldown (1000 ms)
    pub const SHOOTER_JUMP_COOLDOWN: u32 = 60;
    pub const SHOOTER_RANGE: f32 = 200.0;
    pub const SHOOTER_SAFE_DIST: f32 = 120.0;
    /// Horizontal distance under which the shooter hops toward a higher player
    pub const SHOOTER_JUMP_DIST: f32 = 60.0;
    /// Ledge probe lookahead
    pub const SHOOTER_LOOKAHEAD: f32 = 6.0;
    /// Attack pose duration (0.5 s)
    pub const SHOOTER_ATTACK_TICKS: u32 = 30;

    /// Melee
    pub const MELEE_HP: i32 = 4;
    pub const MELEE_DAMAGE: i32 = 1;
    pub const MELEE_SPEED_MIN: f32 = 1.0;
    pub const MELEE_SPEED_MAX: f32 = 3.0;
    /// Jump cooldown (800 ms)
    pub const MELEE_JUMP_COOLDOWN: u32 = 48;
    pub const MELEE_LOOKAHEAD: f32 = 36.0;
    pub const MELEE_MIN_DIST: f32 = 20.0;
    /// How far above the melee's center the player must be to provoke a jump
    pub const MELEE_JUMP_RISE: f32 = 20.0;

    /// Vehicle
    pub const VEHICLE_HP: i32 = 2;
    pub const VEHICLE_DAMAGE: i32 = 1;
    pub const VEHICLE_SIZE: f32 = 84.0;
    pub const VEHICLE_SPEED_MIN: i32 = 3;
    pub const VEHICLE_SPEED_MAX: i32 = 5;
    /// Vehicles start this far behind their spawn edge
    pub const VEHICLE_SPAWN_OFFSET: f32 = 120.0;
    /// Vehicles spawn with their top this far above the ground platform
    pub const VEHICLE_SPAWN_RISE: f32 = 140.0;

    /// Arena flow
    pub const ARENA_WIDTH: f32 = 1.5 * VIEWPORT_WIDTH;
    /// Grace period after an arena empties (2 s)
    pub const ARENA_CLEAR_TICKS: u32 = 120;
    /// Blink period of the "move on" arrow
    pub const ARROW_BLINK_TICKS: u32 = 20;
    /// Camera hand-off back to the player (0.5 s)
    pub const CAMERA_TRANSITION_TICKS: u32 = 30;

    /// Ambient spawn cooldown range in seconds
    pub const AMBIENT_SPAWN_MIN_SECS: f32 = 2.0;
    pub const AMBIENT_SPAWN_MAX_SECS: f32 = 5.0;
}

/// Sign of a horizontal delta: +1 to the right, -1 otherwise
#[inline]
pub fn direction_of(dx: f32) -> f32 {
    if dx > 0.0 { 1.0 } else { -1.0 }
}

/// Free-roam camera x for a player centered at `center_x`
#[inline]
pub fn follow_camera_x(center_x: f32) -> f32 {
    use consts::{VIEWPORT_WIDTH, WORLD_WIDTH};
    (center_x - VIEWPORT_WIDTH / 2.0).clamp(0.0, WORLD_WIDTH - VIEWPORT_WIDTH)
}
