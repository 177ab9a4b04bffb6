//! Shared gravity and platform collision
//!
//! Bodies integrate one axis at a time against the static platform list.
//! The player resolves both axes; enemies only resolve landings and pass
//! freely through platform sides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::GRAVITY;

/// A rectangle with velocity and grounding state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    /// Full two-axis step used by the player
    pub fn step_solid(&mut self, platforms: &[Rect]) {
        self.vel.y += GRAVITY;

        self.rect.x += self.vel.x;
        self.resolve_horizontal(platforms);

        self.rect.y += self.vel.y;
        self.on_ground = false;
        self.resolve_vertical(platforms);
    }

    /// Vertical-only step used by enemies: fall and land on anything below
    pub fn step_falling(&mut self, platforms: &[Rect]) {
        self.vel.y += GRAVITY;
        self.rect.y += self.vel.y;
        self.on_ground = false;
        self.resolve_landing(platforms);
    }

    /// Launch upward if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = -impulse;
        self.on_ground = false;
        true
    }

    fn resolve_horizontal(&mut self, platforms: &[Rect]) {
        for p in platforms {
            if !self.rect.intersects(p) {
                continue;
            }
            if self.vel.x > 0.0 {
                self.rect.set_right(p.left());
            } else if self.vel.x < 0.0 {
                self.rect.set_left(p.right());
            }
            self.vel.x = 0.0;
        }
    }

    fn resolve_vertical(&mut self, platforms: &[Rect]) {
        for p in platforms {
            if !self.rect.intersects(p) {
                continue;
            }
            if self.vel.y > 0.0 {
                self.rect.set_bottom(p.top());
                self.vel.y = 0.0;
                self.on_ground = true;
            } else if self.vel.y < 0.0 {
                self.rect.set_top(p.bottom());
                self.vel.y = 0.0;
            }
        }
    }

    /// Enemy landing rule: any overlap while not rising snaps onto the platform
    fn resolve_landing(&mut self, platforms: &[Rect]) {
        for p in platforms {
            if self.rect.intersects(p) && self.vel.y >= 0.0 {
                self.rect.set_bottom(p.top());
                self.vel.y = 0.0;
                self.on_ground = true;
            }
        }
    }
}
