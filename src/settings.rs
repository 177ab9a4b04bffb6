//! Session settings
//!
//! Persisted as JSON next to the binary (or wherever the first CLI argument
//! points). Missing fields take their defaults.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Run seed; `None` derives one from the clock
    pub seed: Option<u64>,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,

    // === Pacing ===
    /// Frames per second when running in real time. The simulation step
    /// itself never changes.
    pub tick_rate: u32,
    /// Sleep between frames; off means run as fast as possible
    pub realtime: bool,

    // === Input ===
    /// Let the built-in autopilot play
    pub autopilot: bool,
    /// Autopilot fires every this many ticks
    pub autopilot_fire_interval: u64,

    // === Debug ===
    /// Outline collision rectangles
    pub show_hitboxes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            // Two minutes of play
            max_ticks: Some(120 * TICKS_PER_SECOND as u64),

            tick_rate: TICKS_PER_SECOND,
            realtime: false,

            autopilot: true,
            autopilot_fire_interval: 12,

            show_hitboxes: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Configured seed, or one derived from the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64)
        })
    }

    /// Frame budget in real time; `None` when unpaced
    pub fn frame_rate(&self) -> Option<u32> {
        (self.realtime && self.tick_rate > 0).then_some(self.tick_rate)
    }
}
