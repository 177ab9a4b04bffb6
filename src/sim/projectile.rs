//! Straight-line projectiles fired by the player and by shooters

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{Animator, Clip, ClipTimings};
use super::geom::Rect;
use crate::consts::*;

/// Who fired a projectile (decides what it can hit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    /// Horizontal velocity (units per tick)
    pub vx: f32,
    pub owner: Owner,
    /// Only enemy shots are animated
    pub anim: Animator,
}

impl Projectile {
    /// Player bullet with its top-left corner at `origin`
    pub fn player_bullet(origin: Vec2, vx: f32) -> Self {
        Self {
            rect: Rect::new(origin.x, origin.y, BULLET_WIDTH, BULLET_HEIGHT),
            vx,
            owner: Owner::Player,
            anim: Animator::default(),
        }
    }

    /// Enemy shot centered on `center`
    pub fn enemy_shot(center: Vec2, vx: f32) -> Self {
        Self {
            rect: Rect::from_center(center, ENEMY_SHOT_SIZE, ENEMY_SHOT_SIZE),
            vx,
            owner: Owner::Enemy,
            anim: Animator::default(),
        }
    }

    pub fn update(&mut self, timings: &ClipTimings) {
        self.rect.x += self.vx;
        if self.owner == Owner::Enemy {
            self.anim.advance(timings.get(Clip::EnemyShot));
        }
    }

    /// Past either end of the world
    pub fn off_world(&self) -> bool {
        self.rect.right() < 0.0 || self.rect.left() > WORLD_WIDTH
    }

    /// Damage dealt on contact
    pub fn damage(&self) -> i32 {
        match self.owner {
            Owner::Player => BULLET_DAMAGE,
            Owner::Enemy => ENEMY_SHOT_DAMAGE,
        }
    }

    /// Knockback direction for whoever this hits: against the direction of travel
    pub fn knockback_dir(&self) -> f32 {
        if self.vx > 0.0 { -1.0 } else { 1.0 }
    }
}
