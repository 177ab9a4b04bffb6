//! Contact and projectile damage
//!
//! Runs after every body has moved for the tick. Enemy contact and enemy
//! shots hurt the player (subject to invulnerability); player bullets hurt
//! the first enemy they overlap, in enemy list order.

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::{Owner, Projectile};

/// Tallies for one combat pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Hits that actually landed on the player
    pub player_hits: u32,
    pub enemies_hit: u32,
    pub enemies_killed: u32,
}

/// Every enemy touching the player deals its contact damage
pub fn resolve_contacts(player: &mut Player, enemies: &[Enemy], report: &mut CombatReport) {
    for enemy in enemies {
        if !enemy.rect().intersects(player.rect()) {
            continue;
        }
        let away = if enemy.rect().center_x() > player.rect().center_x() {
            -1.0
        } else {
            1.0
        };
        if player.damage(enemy.damage, away) {
            report.player_hits += 1;
        }
    }
}

/// Drop projectiles that left the world and apply the hits of the rest.
///
/// Each projectile is consumed by its first hit.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut Vec<Enemy>,
    player: &mut Player,
    report: &mut CombatReport,
) {
    projectiles.retain(|shot| {
        if shot.off_world() {
            return false;
        }
        match shot.owner {
            Owner::Player => {
                let Some(idx) = enemies.iter().position(|e| shot.rect.intersects(e.rect())) else {
                    return true;
                };
                report.enemies_hit += 1;
                if enemies[idx].take_hit(shot.damage()) {
                    enemies.remove(idx);
                    report.enemies_killed += 1;
                }
                false
            }
            Owner::Enemy => {
                if !shot.rect.intersects(player.rect()) {
                    return true;
                }
                if player.damage(shot.damage(), shot.knockback_dir()) {
                    report.player_hits += 1;
                }
                false
            }
        }
    });
}
