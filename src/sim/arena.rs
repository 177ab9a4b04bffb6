//! Scripted arena encounters
//!
//! Arenas are visited in order. Crossing an arena's trigger locks the camera
//! and the player inside it, then its waves are released one at a time as
//! the previous wave is wiped out. Once the last wave is gone a short grace
//! period runs before the arena unlocks.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal extent the player is confined to while an arena is locked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub left: f32,
    pub right: f32,
}

/// Enemy counts for one batch spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WaveSpec {
    pub shooters: u32,
    pub melee: u32,
    pub vehicles: u32,
}

impl WaveSpec {
    pub const fn new(shooters: u32, melee: u32, vehicles: u32) -> Self {
        Self {
            shooters,
            melee,
            vehicles,
        }
    }

    pub fn total(&self) -> u32 {
        self.shooters + self.melee + self.vehicles
    }

    /// Free-roam trickle: up to one shooter, one or two melee, up to one vehicle
    pub fn ambient<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.random_range(0..=1),
            rng.random_range(1..=2),
            rng.random_range(0..=1),
        )
    }

    /// Replacement for an enemy left behind the camera: up to one of each
    pub fn replacement<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.random_range(0..=1),
            rng.random_range(0..=1),
            rng.random_range(0..=1),
        )
    }
}

/// Static arena descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Player center x that starts the fight
    pub trigger_x: f32,
    pub width: f32,
    pub waves: Vec<WaveSpec>,
}

/// The stock three-arena run
pub fn default_arenas() -> Vec<Arena> {
    vec![
        Arena {
            trigger_x: 950.0,
            width: ARENA_WIDTH,
            waves: vec![WaveSpec::new(3, 2, 0)],
        },
        Arena {
            trigger_x: 1850.0,
            width: ARENA_WIDTH,
            waves: vec![WaveSpec::new(4, 3, 1)],
        },
        Arena {
            trigger_x: 2750.0,
            width: ARENA_WIDTH,
            waves: vec![WaveSpec::new(4, 3, 1), WaveSpec::new(0, 5, 1)],
        },
    ]
}

/// Progress inside a locked arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaStage {
    /// Enemies alive or waves still queued
    Fighting,
    /// Everything is dead; counting up to the unlock
    Clearing { ticks: u32 },
}

/// State of the arena currently holding the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaLock {
    /// Camera x pinned for the duration of the fight
    pub camera_x: f32,
    pub bounds: ArenaBounds,
    pub pending: VecDeque<WaveSpec>,
    pub stage: ArenaStage,
}

/// Something the caller has to act on after a director step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArenaEvent {
    /// An arena locked; clear the field and spawn this wave inside `bounds`
    Locked {
        index: usize,
        wave: WaveSpec,
        bounds: ArenaBounds,
    },
    /// The previous wave is dead; spawn the next one
    NextWave { wave: WaveSpec, bounds: ArenaBounds },
    /// Grace period over; the arena at `index` is done and the camera is free
    Cleared { index: usize },
}

/// Walks the arena list and owns the lock state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaDirector {
    pub arenas: Vec<Arena>,
    /// Index of the next arena to trigger (or the one locked)
    pub current: usize,
    pub lock: Option<ArenaLock>,
}

impl ArenaDirector {
    pub fn new(arenas: Vec<Arena>) -> Self {
        Self {
            arenas,
            current: 0,
            lock: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub fn bounds(&self) -> Option<ArenaBounds> {
        self.lock.as_ref().map(|l| l.bounds)
    }

    /// Pinned camera x while locked
    pub fn camera_lock(&self) -> Option<f32> {
        self.lock.as_ref().map(|l| l.camera_x)
    }

    /// Ticks spent in the clearing grace period, if in it
    pub fn clearing_ticks(&self) -> Option<u32> {
        match self.lock.as_ref()?.stage {
            ArenaStage::Clearing { ticks } => Some(ticks),
            ArenaStage::Fighting => None,
        }
    }

    pub fn arenas_cleared(&self) -> usize {
        self.current
    }

    /// Lock the next arena if the player's center has crossed its trigger
    pub fn check_trigger(&mut self, player_center_x: f32) -> Option<ArenaEvent> {
        if self.lock.is_some() {
            return None;
        }
        let arena = self.arenas.get(self.current)?;
        if player_center_x < arena.trigger_x {
            return None;
        }

        let camera_x = (player_center_x - VIEWPORT_WIDTH / 2.0).max(0.0);
        let bounds = ArenaBounds {
            left: camera_x,
            right: camera_x + arena.width,
        };
        let mut pending: VecDeque<WaveSpec> = arena.waves.iter().copied().collect();
        let wave = pending.pop_front().unwrap_or_default();
        self.lock = Some(ArenaLock {
            camera_x,
            bounds,
            pending,
            stage: ArenaStage::Fighting,
        });
        Some(ArenaEvent::Locked {
            index: self.current,
            wave,
            bounds,
        })
    }

    /// Advance the locked arena given how many enemies are still alive
    pub fn step(&mut self, live_enemies: usize) -> Option<ArenaEvent> {
        let lock = self.lock.as_mut()?;
        if live_enemies > 0 {
            return None;
        }

        if let Some(wave) = lock.pending.pop_front() {
            lock.stage = ArenaStage::Fighting;
            return Some(ArenaEvent::NextWave {
                wave,
                bounds: lock.bounds,
            });
        }

        let ticks = match lock.stage {
            ArenaStage::Fighting => 1,
            ArenaStage::Clearing { ticks } => ticks + 1,
        };
        if ticks >= ARENA_CLEAR_TICKS {
            let index = self.current;
            self.lock = None;
            self.current += 1;
            return Some(ArenaEvent::Cleared { index });
        }
        lock.stage = ArenaStage::Clearing { ticks };
        None
    }
}
