//! Wave spawning
//!
//! Every spawn path funnels through [`spawn_wave`]: arena locks, arena wave
//! advances, the free-roam ambient timer and streaming replacements.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::WaveSpec;
use super::enemy::Enemy;
use crate::consts::*;

/// Spawn `spec` just outside `[left, right]`, each enemy on a random side.
///
/// Shooters and vehicles head inward from their side. Returns the number of
/// enemies added.
pub fn spawn_wave<R: Rng + ?Sized>(
    spec: &WaveSpec,
    left: f32,
    right: f32,
    ground_top: f32,
    rng: &mut R,
    out: &mut Vec<Enemy>,
) -> usize {
    let y = ground_top - ENEMY_SPAWN_HEIGHT;
    let before = out.len();

    for _ in 0..spec.shooters {
        let (x, dir) = pick_side(left, right, rng);
        out.push(Enemy::shooter(x, y, dir, rng));
    }
    for _ in 0..spec.melee {
        let (x, _) = pick_side(left, right, rng);
        out.push(Enemy::melee(x, y, rng));
    }
    for _ in 0..spec.vehicles {
        let (x, dir) = pick_side(left, right, rng);
        out.push(Enemy::vehicle(x, dir, ground_top, rng));
    }

    let added = out.len() - before;
    if added > 0 {
        log::debug!(
            "spawned {} shooters, {} melee, {} vehicles around [{:.0}, {:.0}]",
            spec.shooters,
            spec.melee,
            spec.vehicles,
            left,
            right
        );
    }
    added
}

/// Spawn x and inward direction for a randomly chosen side
fn pick_side<R: Rng + ?Sized>(left: f32, right: f32, rng: &mut R) -> (f32, f32) {
    if rng.random_bool(0.5) {
        (left - SPAWN_MARGIN, 1.0)
    } else {
        (right + SPAWN_MARGIN, -1.0)
    }
}

/// Countdown for free-roam spawns, re-rolled from a fixed range on expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientSpawner {
    /// Seconds until the next ambient wave
    pub cooldown_secs: f32,
}

impl AmbientSpawner {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cooldown_secs: roll_cooldown(rng),
        }
    }

    /// Count one tick down. Returns true when a wave is due (and re-arms).
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.cooldown_secs -= SIM_DT;
        if self.cooldown_secs > 0.0 {
            return false;
        }
        self.cooldown_secs = roll_cooldown(rng);
        true
    }
}

fn roll_cooldown<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(AMBIENT_SPAWN_MIN_SECS..=AMBIENT_SPAWN_MAX_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    const GROUND_TOP: f32 = VIEWPORT_HEIGHT - GROUND_HEIGHT;

    #[test]
    fn test_counts_and_sides() {
        let mut rng = Pcg32::seed_from_u64(77);
        let mut enemies = Vec::new();
        let added = spawn_wave(
            &WaveSpec::new(3, 2, 1),
            1000.0,
            1800.0,
            GROUND_TOP,
            &mut rng,
            &mut enemies,
        );
        assert_eq!(added, 6);
        assert_eq!(enemies.len(), 6);

        let shooters = enemies
            .iter()
            .filter(|e| matches!(e.kind, EnemyKind::Shooter(_)))
            .count();
        let melee = enemies
            .iter()
            .filter(|e| matches!(e.kind, EnemyKind::Melee(_)))
            .count();
        assert_eq!((shooters, melee), (3, 2));

        for enemy in &enemies {
            match &enemy.kind {
                EnemyKind::Shooter(ai) => {
                    let expected = if ai.dir > 0.0 { 850.0 } else { 1950.0 };
                    assert_eq!(enemy.rect().x, expected);
                    assert_eq!(enemy.rect().y, GROUND_TOP - ENEMY_SPAWN_HEIGHT);
                }
                EnemyKind::Melee(_) => {
                    assert!(enemy.rect().x == 850.0 || enemy.rect().x == 1950.0);
                }
                EnemyKind::Vehicle { speed } => {
                    let expected = if *speed > 0.0 {
                        850.0 - VEHICLE_SPAWN_OFFSET
                    } else {
                        1950.0 + VEHICLE_SPAWN_OFFSET
                    };
                    assert_eq!(enemy.rect().x, expected);
                }
            }
        }
    }

    #[test]
    fn test_spawn_heights_follow_ground() {
        let mut rng = Pcg32::seed_from_u64(21);
        let raised = 400.0;
        let mut enemies = Vec::new();
        spawn_wave(&WaveSpec::new(1, 1, 2), 0.0, 800.0, raised, &mut rng, &mut enemies);
        for enemy in &enemies {
            let expected = match enemy.kind {
                EnemyKind::Vehicle { .. } => raised - VEHICLE_SPAWN_RISE,
                _ => raised - ENEMY_SPAWN_HEIGHT,
            };
            assert_eq!(enemy.rect().y, expected);
        }
    }

    #[test]
    fn test_empty_wave_is_noop() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut untouched = rng.clone();
        let mut enemies = Vec::new();
        let added = spawn_wave(
            &WaveSpec::default(),
            0.0,
            800.0,
            GROUND_TOP,
            &mut rng,
            &mut enemies,
        );
        assert_eq!(added, 0);
        assert!(enemies.is_empty());
        assert_eq!(rng.next_u64(), untouched.next_u64(), "no random draws");
    }

    #[test]
    fn test_ambient_timer_rearms() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut spawner = AmbientSpawner::new(&mut rng);
        assert!((AMBIENT_SPAWN_MIN_SECS..=AMBIENT_SPAWN_MAX_SECS).contains(&spawner.cooldown_secs));

        let mut fired_at = None;
        for tick in 1..=400u32 {
            if spawner.tick(&mut rng) {
                fired_at = Some(tick);
                break;
            }
        }
        let fired_at = fired_at.expect("fires within the max cooldown");
        assert!(fired_at >= 119, "fired too early at {fired_at}");
        assert!(spawner.cooldown_secs >= AMBIENT_SPAWN_MIN_SECS);
    }
}
