//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::ArenaBounds;
use super::geom::Rect;
use super::physics::Body;
use super::projectile::Projectile;
use super::tick::InputState;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// Ticks left during which damage is ignored
    pub invuln_ticks: u32,
}

impl Player {
    /// Spawn standing on `ground_top` at the fixed start position
    pub fn new(ground_top: f32) -> Self {
        Self {
            body: Body::new(Rect::from_midbottom(
                PLAYER_SPAWN_X,
                ground_top,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            )),
            facing: 1.0,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            invuln_ticks: 0,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Translate held keys into velocity; arena bounds block steps that would leave them
    pub fn handle_input(&mut self, input: &InputState, bounds: Option<ArenaBounds>) {
        let rect = self.body.rect;
        self.body.vel.x = 0.0;
        if input.left && bounds.is_none_or(|b| rect.left() - PLAYER_SPEED >= b.left) {
            self.body.vel.x = -PLAYER_SPEED;
        }
        if input.right && bounds.is_none_or(|b| rect.right() + PLAYER_SPEED <= b.right) {
            self.body.vel.x = PLAYER_SPEED;
        }
        if input.jump {
            self.body.jump(PLAYER_JUMP);
        }
        if self.body.vel.x != 0.0 {
            self.facing = self.body.vel.x.signum();
        }
    }

    pub fn update(&mut self, platforms: &[Rect], world: &Rect) {
        self.body.step_solid(platforms);
        self.body.rect.clamp_inside(world);
        self.invuln_ticks = self.invuln_ticks.saturating_sub(1);
    }

    /// Apply a hit unless invulnerable. Returns whether it landed.
    ///
    /// `knockback_dir` is the horizontal direction the player is pushed.
    pub fn damage(&mut self, amount: i32, knockback_dir: f32) -> bool {
        if self.invuln_ticks > 0 {
            return false;
        }
        self.hp -= amount;
        self.invuln_ticks = INVULN_TICKS;
        self.body.vel = Vec2::new(KNOCKBACK_X * knockback_dir, KNOCKBACK_Y);
        true
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Bullet leaving the muzzle in the facing direction
    pub fn fire(&self) -> Projectile {
        let rect = self.body.rect;
        Projectile::player_bullet(
            Vec2::new(rect.center_x() + self.facing * MUZZLE_OFFSET, rect.center_y()),
            self.facing * BULLET_SPEED,
        )
    }

    /// Blink while invulnerable
    pub fn visible(&self) -> bool {
        self.invuln_ticks == 0 || (self.invuln_ticks / BLINK_TICKS) % 2 == 0
    }
}
