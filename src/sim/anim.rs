//! Animation timeline sampling
//!
//! The asset layer owns the frame images; the simulation only needs each
//! clip's per-frame display durations to decide which frame index is current.

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Every animated clip the simulation can sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clip {
    ShooterIdle,
    ShooterWalk,
    ShooterAttack,
    MeleeIdle,
    MeleeWalk,
    /// Second melee look, picked at spawn
    MeleeAltIdle,
    MeleeAltWalk,
    EnemyShot,
}

const CLIP_COUNT: usize = 8;

impl Clip {
    pub const ALL: [Clip; CLIP_COUNT] = [
        Clip::ShooterIdle,
        Clip::ShooterWalk,
        Clip::ShooterAttack,
        Clip::MeleeIdle,
        Clip::MeleeWalk,
        Clip::MeleeAltIdle,
        Clip::MeleeAltWalk,
        Clip::EnemyShot,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-clip frame durations in seconds, as supplied by the asset layer
#[derive(Debug, Clone)]
pub struct ClipTimings {
    durations: [Vec<f32>; CLIP_COUNT],
}

/// Stand-in timeline when no assets are loaded: 4 frames at the GIF default of 100 ms
const DEFAULT_FRAME_SECS: f32 = 0.1;
const DEFAULT_FRAME_COUNT: usize = 4;

impl Default for ClipTimings {
    fn default() -> Self {
        Self {
            durations: std::array::from_fn(|_| vec![DEFAULT_FRAME_SECS; DEFAULT_FRAME_COUNT]),
        }
    }
}

impl ClipTimings {
    /// Build timings by asking `lookup` for each clip's durations
    pub fn from_fn(mut lookup: impl FnMut(Clip) -> Vec<f32>) -> Self {
        Self {
            durations: std::array::from_fn(|i| lookup(Clip::ALL[i])),
        }
    }

    pub fn get(&self, clip: Clip) -> &[f32] {
        &self.durations[clip.index()]
    }

    pub fn set(&mut self, clip: Clip, durations: Vec<f32>) {
        self.durations[clip.index()] = durations;
    }
}

/// Playback cursor into a clip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    pub frame: usize,
    /// Seconds spent on the current frame
    pub elapsed: f32,
}

impl Animator {
    /// Advance one tick through `durations`, wrapping at the end.
    ///
    /// Switching to a shorter clip restarts it from frame 0. An empty timeline
    /// is a static single frame.
    pub fn advance(&mut self, durations: &[f32]) {
        if durations.is_empty() {
            self.frame = 0;
            return;
        }
        self.elapsed += SIM_DT;
        if self.frame >= durations.len() {
            self.frame = 0;
        }
        if self.elapsed >= durations[self.frame] {
            self.frame += 1;
            self.elapsed = 0.0;
            if self.frame >= durations.len() {
                self.frame = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_steps_after_duration() {
        // 3 ticks per frame at 60 Hz
        let durations = [0.045, 0.045];
        let mut anim = Animator::default();
        anim.advance(&durations);
        anim.advance(&durations);
        assert_eq!(anim.frame, 0);
        anim.advance(&durations);
        assert_eq!(anim.frame, 1);
        for _ in 0..3 {
            anim.advance(&durations);
        }
        assert_eq!(anim.frame, 0, "wraps back to the first frame");
    }

    #[test]
    fn test_shorter_clip_restarts() {
        let mut anim = Animator {
            frame: 5,
            elapsed: 0.0,
        };
        anim.advance(&[1.0, 1.0]);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_empty_timeline_is_static() {
        let mut anim = Animator {
            frame: 2,
            elapsed: 0.0,
        };
        anim.advance(&[]);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_timings_lookup() {
        let timings = ClipTimings::from_fn(|clip| match clip {
            Clip::EnemyShot => vec![0.2],
            _ => vec![0.1; 6],
        });
        assert_eq!(timings.get(Clip::EnemyShot), &[0.2]);
        assert_eq!(timings.get(Clip::MeleeAltWalk).len(), 6);
        assert_eq!(ClipTimings::default().get(Clip::ShooterIdle).len(), 4);
    }
}
