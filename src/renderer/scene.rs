//! Scene composition
//!
//! Turns a [`SimulationState`] into draw calls: parallax, platforms,
//! projectiles, enemies, player, then the HUD on top.

use glam::Vec2;

use super::{Anchor, AssetProvider, Color, Font, Renderer, palette};
use crate::consts::*;
use crate::sim::anim::Clip;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::geom::Rect;
use crate::sim::projectile::{Owner, Projectile};
use crate::sim::state::SimulationState;

/// Per-frame presentation switches
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOptions {
    /// Outline every collision rectangle
    pub show_hitboxes: bool,
}

const HP_BAR: Rect = Rect::new(10.0, 10.0, 120.0, 8.0);
const HP_TEXT_POS: Vec2 = Vec2::new(10.0, 22.0);
const ARENA_TEXT_POS: Vec2 = Vec2::new(VIEWPORT_WIDTH - 170.0, 10.0);
/// Enemy health bar sits this far above the sprite
const ENEMY_BAR_OFFSET: f32 = 18.0;
const ENEMY_BAR_HEIGHT: f32 = 12.0;
/// Arrow tip x and half-height
const ARROW_TIP_X: f32 = VIEWPORT_WIDTH - 50.0;
const ARROW_HALF: f32 = 20.0;
const ARROW_STRIP: f32 = 2.0;

/// Draw one full frame and present it
pub fn draw_frame<R, A>(state: &SimulationState, renderer: &mut R, assets: &A, options: DrawOptions)
where
    R: Renderer,
    A: AssetProvider<Image = R::Image>,
{
    let cam_x = state.camera.x;
    renderer.clear(palette::BACKGROUND);

    for (layer, factor) in assets.parallax_layers() {
        renderer.draw_sprite(layer, Vec2::new(-cam_x * factor, 0.0));
    }

    for platform in &state.world.platforms {
        renderer.draw_rect(to_screen(platform, cam_x), palette::PLATFORM);
    }

    for shot in &state.projectiles {
        draw_projectile(shot, cam_x, renderer, assets);
    }

    for enemy in &state.enemies {
        draw_enemy(enemy, cam_x, renderer, assets);
    }

    let player = &state.player;
    if player.visible() {
        let rect = to_screen(player.rect(), cam_x);
        match assets.player_sprite(player.facing > 0.0) {
            Some(sprite) => renderer.draw_sprite(sprite, rect.top_left()),
            None => renderer.draw_rect(rect, palette::PLAYER),
        }
    }

    if options.show_hitboxes {
        let rects = state
            .projectiles
            .iter()
            .map(|p| &p.rect)
            .chain(state.enemies.iter().map(|e| e.rect()))
            .chain(std::iter::once(player.rect()));
        for rect in rects {
            outline(renderer, to_screen(rect, cam_x), palette::HITBOX);
        }
    }

    draw_hud(state, renderer);
    renderer.present();
}

fn to_screen(rect: &Rect, cam_x: f32) -> Rect {
    rect.translated(-cam_x, 0.0)
}

fn draw_projectile<R, A>(shot: &Projectile, cam_x: f32, renderer: &mut R, assets: &A)
where
    R: Renderer,
    A: AssetProvider<Image = R::Image>,
{
    let rect = to_screen(&shot.rect, cam_x);
    match shot.owner {
        Owner::Player => renderer.draw_rect(rect, palette::BULLET),
        Owner::Enemy => match assets.frame(Clip::EnemyShot, shot.anim.frame, shot.vx > 0.0) {
            Some(sprite) => renderer.draw_sprite(sprite, rect.top_left()),
            None => renderer.draw_rect(rect, palette::SHOOTER),
        },
    }
}

fn draw_enemy<R, A>(enemy: &Enemy, cam_x: f32, renderer: &mut R, assets: &A)
where
    R: Renderer,
    A: AssetProvider<Image = R::Image>,
{
    let rect = to_screen(enemy.rect(), cam_x);
    let sprite = enemy
        .current_frame()
        .and_then(|(clip, frame)| assets.frame(clip, frame, enemy.faces_right()));
    match sprite {
        Some(sprite) => renderer.draw_sprite(sprite, rect.top_left()),
        None => {
            let color = match enemy.kind {
                EnemyKind::Shooter(_) => palette::SHOOTER,
                EnemyKind::Melee(_) => palette::MELEE,
                EnemyKind::Vehicle { .. } => palette::VEHICLE,
            };
            renderer.draw_rect(rect, color);
        }
    }

    if enemy.hit_flash_ticks > 0 {
        draw_hit_indicator(enemy, rect, renderer);
    }
}

/// Health bar and percentage, enlarged right after a hit
fn draw_hit_indicator<R: Renderer>(enemy: &Enemy, rect: Rect, renderer: &mut R) {
    let scale = enemy.hit_scale();
    let ratio = enemy.hp.max(0) as f32 / enemy.max_hp as f32;
    let w = rect.w;
    let y = rect.y - ENEMY_BAR_OFFSET;

    let bar_w = w * scale;
    let bar_h = ENEMY_BAR_HEIGHT * scale;
    let bar = Rect::new(
        rect.x - (bar_w - w) / 2.0,
        y - (bar_h - ENEMY_BAR_HEIGHT) / 2.0,
        bar_w,
        bar_h,
    );
    renderer.draw_rect(bar, palette::BAR_BG);
    let fill = (w * ratio).floor() * scale;
    renderer.draw_rect(Rect { w: fill, ..bar }, palette::BAR);

    let font = if scale > 1.0 { Font::Hit } else { Font::Regular };
    let text = ((100.0 * ratio) as i32).to_string();
    let center = Vec2::new(rect.x + w / 2.0, y - ENEMY_BAR_OFFSET);
    renderer.draw_text(&text, font, palette::TEXT, center + Vec2::ONE, Anchor::Center);
    renderer.draw_text(&text, font, palette::TEXT_LIGHT, center, Anchor::Center);
}

fn draw_hud<R: Renderer>(state: &SimulationState, renderer: &mut R) {
    let status = state.status();
    let ratio = status.hp.max(0) as f32 / status.max_hp as f32;

    renderer.draw_rect(HP_BAR, palette::BAR_BG);
    renderer.draw_rect(
        Rect {
            w: (HP_BAR.w * ratio).floor(),
            ..HP_BAR
        },
        palette::BAR,
    );
    renderer.draw_text(
        &format!("{}/{}", status.hp, status.max_hp),
        Font::Regular,
        palette::TEXT,
        HP_TEXT_POS,
        Anchor::TopLeft,
    );
    renderer.draw_text(
        &format!("Arena {}/{}", status.arena_index, status.arena_count),
        Font::Regular,
        palette::TEXT,
        ARENA_TEXT_POS,
        Anchor::TopLeft,
    );

    let Some(clear_ticks) = state.director.clearing_ticks() else {
        return;
    };
    let mid = Vec2::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0);
    renderer.draw_text(
        "Arena cleared!",
        Font::Banner,
        palette::TEXT_LIGHT,
        mid,
        Anchor::Center,
    );
    if (clear_ticks / ARROW_BLINK_TICKS) % 2 == 0 {
        draw_arrow(renderer, mid.y);
    }
}

/// Triangle with its tip at the left, filled as vertical strips
fn draw_arrow<R: Renderer>(renderer: &mut R, mid_y: f32) {
    let mut dx = 0.0;
    while dx < ARROW_HALF {
        let half = (dx + ARROW_STRIP / 2.0).min(ARROW_HALF);
        renderer.draw_rect(
            Rect::new(ARROW_TIP_X + dx, mid_y - half, ARROW_STRIP, half * 2.0),
            palette::ARROW,
        );
        dx += ARROW_STRIP;
    }
}

fn outline<R: Renderer>(renderer: &mut R, rect: Rect, color: Color) {
    renderer.draw_rect(Rect { h: 1.0, ..rect }, color);
    renderer.draw_rect(Rect::new(rect.x, rect.bottom() - 1.0, rect.w, 1.0), color);
    renderer.draw_rect(Rect { w: 1.0, ..rect }, color);
    renderer.draw_rect(Rect::new(rect.right() - 1.0, rect.y, 1.0, rect.h), color);
}
