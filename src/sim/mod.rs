//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, held in the state
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod anim;
pub mod arena;
pub mod camera;
pub mod combat;
pub mod enemy;
pub mod geom;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;

pub use anim::{Animator, Clip, ClipTimings};
pub use arena::{Arena, ArenaBounds, ArenaDirector, ArenaEvent, WaveSpec, default_arenas};
pub use camera::Camera;
pub use enemy::{Enemy, EnemyKind};
pub use geom::Rect;
pub use player::Player;
pub use projectile::{Owner, Projectile};
pub use state::{ArenaPhase, SessionStatus, SessionSummary, SimulationState, World};
pub use tick::{InputState, tick};
