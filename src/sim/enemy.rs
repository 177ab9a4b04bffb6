//! Enemy kinds and their AI
//!
//! All enemies share a falling body, health and a hit-flash timer. The
//! per-kind payload in [`EnemyKind`] carries AI state; behaviour dispatches on
//! the variant. Damage is applied by the combat pass, never from `update`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::anim::{Animator, Clip, ClipTimings};
use super::geom::{Rect, platform_below};
use super::physics::Body;
use super::projectile::Projectile;
use crate::consts::*;
use crate::direction_of;

/// Shooter animation pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShooterPose {
    Idle,
    Walk,
    Attack,
}

/// Ranged enemy: paces, keeps distance, fires on an interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShooterAi {
    /// Pacing direction (+1 right, -1 left)
    pub dir: f32,
    pub speed: f32,
    /// Ticks between shots, drawn once at spawn
    pub shot_interval: u32,
    pub ticks_since_shot: u32,
    pub ticks_since_jump: u32,
    /// Remaining ticks in the attack pose
    pub attack_ticks: u32,
    pub pose: ShooterPose,
    pub anim: Animator,
}

/// Melee enemy: closes in on the player and hops ledges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeAi {
    pub speed: f32,
    pub facing: f32,
    pub moving: bool,
    pub ticks_since_jump: u32,
    /// Which of the two melee looks this one uses
    pub alt_look: bool,
    pub anim: Animator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyKind {
    Shooter(ShooterAi),
    Melee(MeleeAi),
    /// Constant signed drift speed, no ground awareness
    Vehicle { speed: f32 },
}

/// World facts an enemy reads during its update
pub struct EnemyContext<'a> {
    pub player: &'a Rect,
    pub platforms: &'a [Rect],
    pub timings: &'a ClipTimings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub hp: i32,
    pub max_hp: i32,
    /// Contact damage dealt to the player
    pub damage: i32,
    /// Cosmetic: ticks left on the enlarged health indicator
    pub hit_flash_ticks: u32,
    pub kind: EnemyKind,
}

impl Enemy {
    fn with_kind(rect: Rect, hp: i32, damage: i32, kind: EnemyKind) -> Self {
        Self {
            body: Body::new(rect),
            hp,
            max_hp: hp,
            damage,
            hit_flash_ticks: 0,
            kind,
        }
    }

    /// Shooter with its top-left at `(x, y)`, initially pacing in `dir`
    pub fn shooter<R: Rng + ?Sized>(x: f32, y: f32, dir: f32, rng: &mut R) -> Self {
        let ai = ShooterAi {
            dir,
            speed: rng.random_range(SHOOTER_SPEED_MIN..=SHOOTER_SPEED_MAX),
            shot_interval: rng.random_range(SHOOTER_SHOT_INTERVAL_MIN..=SHOOTER_SHOT_INTERVAL_MAX),
            ticks_since_shot: 0,
            ticks_since_jump: SHOOTER_JUMP_COOLDOWN,
            attack_ticks: 0,
            pose: ShooterPose::Idle,
            anim: Animator::default(),
        };
        Self::with_kind(
            Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            SHOOTER_HP,
            SHOOTER_DAMAGE,
            EnemyKind::Shooter(ai),
        )
    }

    /// Melee with its top-left at `(x, y)`
    pub fn melee<R: Rng + ?Sized>(x: f32, y: f32, rng: &mut R) -> Self {
        let ai = MeleeAi {
            speed: rng.random_range(MELEE_SPEED_MIN..=MELEE_SPEED_MAX),
            facing: 1.0,
            moving: false,
            ticks_since_jump: MELEE_JUMP_COOLDOWN,
            alt_look: rng.random_bool(0.5),
            anim: Animator::default(),
        };
        Self::with_kind(
            Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            MELEE_HP,
            MELEE_DAMAGE,
            EnemyKind::Melee(ai),
        )
    }

    /// Vehicle entering through the edge at `x`, driving in `dir`.
    ///
    /// It starts behind the edge so it travels through it, a fixed height
    /// above `ground_top`.
    pub fn vehicle<R: Rng + ?Sized>(x: f32, dir: f32, ground_top: f32, rng: &mut R) -> Self {
        let start_x = if dir > 0.0 {
            x - VEHICLE_SPAWN_OFFSET
        } else {
            x + VEHICLE_SPAWN_OFFSET
        };
        let speed = dir * rng.random_range(VEHICLE_SPEED_MIN..=VEHICLE_SPEED_MAX) as f32;
        Self::with_kind(
            Rect::new(start_x, ground_top - VEHICLE_SPAWN_RISE, VEHICLE_SIZE, VEHICLE_SIZE),
            VEHICLE_HP,
            VEHICLE_DAMAGE,
            EnemyKind::Vehicle { speed },
        )
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Run one tick of AI and physics. Shots fired are pushed onto `shots`.
    ///
    /// Returns false once the enemy has left the world and should be dropped.
    pub fn update(&mut self, ctx: &EnemyContext, shots: &mut Vec<Projectile>) -> bool {
        match &mut self.kind {
            EnemyKind::Shooter(ai) => update_shooter(ai, &mut self.body, ctx, shots),
            EnemyKind::Melee(ai) => update_melee(ai, &mut self.body, ctx),
            EnemyKind::Vehicle { speed } => {
                self.body.rect.x += *speed;
                self.body.step_falling(ctx.platforms);
            }
        }
        self.hit_flash_ticks = self.hit_flash_ticks.saturating_sub(1);
        !self.out_of_world()
    }

    /// Take damage and start the hit flash. Returns true if this killed it.
    pub fn take_hit(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.hit_flash_ticks = HIT_FLASH_TICKS;
        self.hp <= 0
    }

    /// Beyond either world edge by more than the despawn margin
    pub fn out_of_world(&self) -> bool {
        let rect = self.body.rect;
        rect.right() < -DESPAWN_MARGIN || rect.left() > WORLD_WIDTH + DESPAWN_MARGIN
    }

    /// Health indicator scale: 2x on hit, shrinking back to 1x as the flash fades
    pub fn hit_scale(&self) -> f32 {
        1.0 + self.hit_flash_ticks as f32 / HIT_FLASH_TICKS as f32
    }

    /// Sprites face left; flip when heading right
    pub fn faces_right(&self) -> bool {
        match &self.kind {
            EnemyKind::Shooter(ai) => ai.dir > 0.0,
            EnemyKind::Melee(ai) => ai.facing > 0.0,
            EnemyKind::Vehicle { speed } => *speed > 0.0,
        }
    }

    /// Clip and frame to draw, if this kind is animated
    pub fn current_frame(&self) -> Option<(Clip, usize)> {
        match &self.kind {
            EnemyKind::Shooter(ai) => Some((shooter_clip(ai.pose), ai.anim.frame)),
            EnemyKind::Melee(ai) => Some((melee_clip(ai), ai.anim.frame)),
            EnemyKind::Vehicle { .. } => None,
        }
    }
}

fn shooter_clip(pose: ShooterPose) -> Clip {
    match pose {
        ShooterPose::Idle => Clip::ShooterIdle,
        ShooterPose::Walk => Clip::ShooterWalk,
        ShooterPose::Attack => Clip::ShooterAttack,
    }
}

fn melee_clip(ai: &MeleeAi) -> Clip {
    match (ai.alt_look, ai.moving) {
        (false, false) => Clip::MeleeIdle,
        (false, true) => Clip::MeleeWalk,
        (true, false) => Clip::MeleeAltIdle,
        (true, true) => Clip::MeleeAltWalk,
    }
}

// The attack pose is cosmetic only: pacing continues while it plays.
fn update_shooter(
    ai: &mut ShooterAi,
    body: &mut Body,
    ctx: &EnemyContext,
    shots: &mut Vec<Projectile>,
) {
    ai.ticks_since_shot = ai.ticks_since_shot.saturating_add(1);
    ai.ticks_since_jump = ai.ticks_since_jump.saturating_add(1);

    let dx = ctx.player.center_x() - body.rect.center_x();
    if dx.abs() > SHOOTER_SAFE_DIST {
        ai.dir = direction_of(dx);
    }

    ai.pose = if (ai.dir * ai.speed).abs() > 0.01 {
        ShooterPose::Walk
    } else {
        ShooterPose::Idle
    };
    if ai.attack_ticks > 0 {
        ai.pose = ShooterPose::Attack;
        ai.attack_ticks -= 1;
    }

    body.rect.x += ai.dir * ai.speed;
    if !platform_below(&body.rect, ctx.platforms, ai.dir * SHOOTER_LOOKAHEAD) {
        ai.dir = -ai.dir;
    }

    if dx.abs() < SHOOTER_JUMP_DIST
        && ctx.player.center_y() < body.rect.center_y()
        && ai.ticks_since_jump >= SHOOTER_JUMP_COOLDOWN
        && body.jump(PLAYER_JUMP)
    {
        ai.ticks_since_jump = 0;
    }

    if ai.ticks_since_shot >= ai.shot_interval && dx.abs() < SHOOTER_RANGE {
        let vx = if dx > 0.0 {
            ENEMY_SHOT_SPEED
        } else {
            -ENEMY_SHOT_SPEED
        };
        shots.push(Projectile::enemy_shot(body.rect.center(), vx));
        ai.ticks_since_shot = 0;
        ai.pose = ShooterPose::Attack;
        ai.attack_ticks = SHOOTER_ATTACK_TICKS;
        log::trace!("shooter fired at x={:.0}", body.rect.center_x());
    }

    body.step_falling(ctx.platforms);
    ai.anim.advance(ctx.timings.get(shooter_clip(ai.pose)));
}

fn update_melee(ai: &mut MeleeAi, body: &mut Body, ctx: &EnemyContext) {
    ai.ticks_since_jump = ai.ticks_since_jump.saturating_add(1);

    let dx = ctx.player.center_x() - body.rect.center_x();
    let dir = direction_of(dx);
    ai.facing = dir;
    ai.moving = dx.abs() > MELEE_MIN_DIST;
    if ai.moving {
        body.rect.x += dir * ai.speed;
    }

    // Hop ledges ahead without waiting for the cooldown
    if body.on_ground && !platform_below(&body.rect, ctx.platforms, dir * MELEE_LOOKAHEAD) {
        body.jump(PLAYER_JUMP);
    }
    if ctx.player.center_y() < body.rect.center_y() - MELEE_JUMP_RISE
        && ai.ticks_since_jump >= MELEE_JUMP_COOLDOWN
        && body.jump(PLAYER_JUMP)
    {
        ai.ticks_since_jump = 0;
    }

    body.step_falling(ctx.platforms);
    ai.anim.advance(ctx.timings.get(melee_clip(ai)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const GROUND_TOP: f32 = VIEWPORT_HEIGHT - GROUND_HEIGHT;

    fn ground() -> Vec<Rect> {
        vec![Rect::new(0.0, GROUND_TOP, WORLD_WIDTH, GROUND_HEIGHT)]
    }

    fn player_at(cx: f32) -> Rect {
        Rect::from_midbottom(cx, GROUND_TOP, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn run(enemy: &mut Enemy, player: &Rect, platforms: &[Rect], ticks: usize) -> Vec<Projectile> {
        let timings = ClipTimings::default();
        let ctx = EnemyContext {
            player,
            platforms,
            timings: &timings,
        };
        let mut shots = Vec::new();
        for _ in 0..ticks {
            assert!(enemy.update(&ctx, &mut shots));
        }
        shots
    }

    fn shooter_ai(enemy: &Enemy) -> &ShooterAi {
        match &enemy.kind {
            EnemyKind::Shooter(ai) => ai,
            _ => panic!("not a shooter"),
        }
    }

    #[test]
    fn test_random_parameters_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let s = Enemy::shooter(0.0, 0.0, 1.0, &mut rng);
            let ai = shooter_ai(&s);
            assert!((SHOOTER_SPEED_MIN..=SHOOTER_SPEED_MAX).contains(&ai.speed));
            assert!((SHOOTER_SHOT_INTERVAL_MIN..=SHOOTER_SHOT_INTERVAL_MAX).contains(&ai.shot_interval));

            let v = Enemy::vehicle(1000.0, -1.0, GROUND_TOP, &mut rng);
            let EnemyKind::Vehicle { speed } = v.kind else {
                panic!("not a vehicle");
            };
            assert!((-5.0..=-3.0).contains(&speed));
            assert_eq!(speed.fract(), 0.0);
            assert_eq!(v.rect().x, 1000.0 + VEHICLE_SPAWN_OFFSET);
            assert_eq!(v.rect().y, GROUND_TOP - VEHICLE_SPAWN_RISE);
        }
    }

    #[test]
    fn test_shooter_turns_toward_distant_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let platforms = ground();
        let mut shooter = Enemy::shooter(1000.0, GROUND_TOP - ENEMY_HEIGHT, -1.0, &mut rng);
        let player = player_at(1600.0);
        run(&mut shooter, &player, &platforms, 1);
        assert_eq!(shooter_ai(&shooter).dir, 1.0);
    }

    #[test]
    fn test_shooter_keeps_pacing_inside_safe_distance() {
        let mut rng = Pcg32::seed_from_u64(1);
        let platforms = ground();
        let mut shooter = Enemy::shooter(1000.0, GROUND_TOP - ENEMY_HEIGHT, -1.0, &mut rng);
        let player = player_at(shooter.rect().center_x() + 50.0);
        let x0 = shooter.rect().x;
        run(&mut shooter, &player, &platforms, 1);
        assert_eq!(shooter_ai(&shooter).dir, -1.0);
        assert!(shooter.rect().x < x0);
    }

    #[test]
    fn test_shooter_reverses_at_ledge() {
        let mut rng = Pcg32::seed_from_u64(3);
        let platforms = vec![Rect::new(0.0, GROUND_TOP, 600.0, GROUND_HEIGHT)];
        // Overhanging the ledge, pacing right, player close by
        let mut shooter = Enemy::shooter(600.0 - 6.0, GROUND_TOP - ENEMY_HEIGHT, 1.0, &mut rng);
        let player = player_at(shooter.rect().center_x() - 40.0);
        run(&mut shooter, &player, &platforms, 1);
        assert_eq!(shooter_ai(&shooter).dir, -1.0);
        assert!(shooter.body.on_ground);
    }

    #[test]
    fn test_shooter_fires_on_interval_and_poses() {
        let mut rng = Pcg32::seed_from_u64(11);
        let platforms = ground();
        let mut shooter = Enemy::shooter(1000.0, GROUND_TOP - ENEMY_HEIGHT, 1.0, &mut rng);
        let interval = shooter_ai(&shooter).shot_interval as usize;
        let player = player_at(shooter.rect().center_x() + 100.0);

        let shots = run(&mut shooter, &player, &platforms, interval - 1);
        assert!(shots.is_empty());
        let shots = run(&mut shooter, &player, &platforms, 1);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].vx.abs(), ENEMY_SHOT_SPEED);
        assert_eq!(shooter_ai(&shooter).pose, ShooterPose::Attack);
        assert_eq!(shooter_ai(&shooter).attack_ticks, SHOOTER_ATTACK_TICKS);

        // Attack pose does not freeze pacing
        let x0 = shooter.rect().x;
        run(&mut shooter, &player, &platforms, 1);
        assert_ne!(shooter.rect().x, x0);
        assert_eq!(shooter_ai(&shooter).pose, ShooterPose::Attack);
    }

    #[test]
    fn test_shooter_holds_fire_out_of_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        let platforms = ground();
        let mut shooter = Enemy::shooter(1000.0, GROUND_TOP - ENEMY_HEIGHT, 1.0, &mut rng);
        let player = player_at(2500.0);
        let shots = run(&mut shooter, &player, &platforms, 200);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_shooter_jumps_at_player_above() {
        let mut rng = Pcg32::seed_from_u64(5);
        let platforms = ground();
        let mut shooter = Enemy::shooter(1000.0, GROUND_TOP - ENEMY_HEIGHT, 1.0, &mut rng);
        run(&mut shooter, &player_at(2000.0), &platforms, 1);
        assert!(shooter.body.on_ground);
        let above = Rect::from_midbottom(shooter.rect().center_x(), 300.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        run(&mut shooter, &above, &platforms, 1);
        assert!(shooter.body.vel.y < 0.0);
        assert_eq!(shooter_ai(&shooter).ticks_since_jump, 0);
    }

    /// Ticks (1-based) on which the enemy jumped while the player hovers
    /// straight above it
    fn jump_ticks(enemy: &mut Enemy, ticks: usize) -> Vec<usize> {
        let platforms = ground();
        let mut jumps = Vec::new();
        for t in 1..=ticks {
            let above = Rect::from_midbottom(enemy.rect().center_x(), 300.0, PLAYER_WIDTH, PLAYER_HEIGHT);
            run(enemy, &above, &platforms, 1);
            let since = match &enemy.kind {
                EnemyKind::Shooter(ai) => ai.ticks_since_jump,
                EnemyKind::Melee(ai) => ai.ticks_since_jump,
                EnemyKind::Vehicle { .. } => panic!("vehicles never jump"),
            };
            if since == 0 {
                jumps.push(t);
            }
        }
        jumps
    }

    #[test]
    fn test_shooter_jump_cooldown() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut shooter = Enemy::shooter(1000.0, GROUND_TOP - ENEMY_HEIGHT, 1.0, &mut rng);
        run(&mut shooter, &player_at(2000.0), &ground(), 1);
        assert!(shooter.body.on_ground);

        let jumps = jump_ticks(&mut shooter, 200);
        assert_eq!(jumps.first(), Some(&1));
        assert!(jumps.len() >= 2, "jumps again once the cooldown expires");
        for pair in jumps.windows(2) {
            assert!(pair[1] - pair[0] >= SHOOTER_JUMP_COOLDOWN as usize, "{jumps:?}");
        }
    }

    #[test]
    fn test_melee_jumps_at_player_above_with_cooldown() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut melee = Enemy::melee(1000.0, GROUND_TOP - ENEMY_HEIGHT, &mut rng);
        let here = player_at(melee.rect().center_x());
        run(&mut melee, &here, &ground(), 1);
        assert!(melee.body.on_ground);

        let jumps = jump_ticks(&mut melee, 200);
        assert_eq!(jumps.first(), Some(&1));
        assert!(jumps.len() >= 2, "jumps again once the cooldown expires");
        for pair in jumps.windows(2) {
            assert!(pair[1] - pair[0] >= MELEE_JUMP_COOLDOWN as usize, "{jumps:?}");
        }
    }

    #[test]
    fn test_melee_ignores_player_barely_above() {
        let mut rng = Pcg32::seed_from_u64(2);
        let platforms = ground();
        let mut melee = Enemy::melee(1000.0, GROUND_TOP - ENEMY_HEIGHT, &mut rng);
        let here = player_at(melee.rect().center_x());
        run(&mut melee, &here, &platforms, 1);

        let cx = melee.rect().center_x();
        let bottom = melee.rect().center_y() - MELEE_JUMP_RISE + PLAYER_HEIGHT / 2.0;
        let barely = Rect::from_midbottom(cx, bottom, PLAYER_WIDTH, PLAYER_HEIGHT);
        run(&mut melee, &barely, &platforms, 1);
        assert!(melee.body.on_ground);
        assert_eq!(melee.body.vel.y, 0.0);
    }

    #[test]
    fn test_melee_approaches_and_holds() {
        let mut rng = Pcg32::seed_from_u64(2);
        let platforms = ground();
        let mut melee = Enemy::melee(500.0, GROUND_TOP - ENEMY_HEIGHT, &mut rng);
        let player = player_at(1000.0);
        let x0 = melee.rect().x;
        run(&mut melee, &player, &platforms, 10);
        assert!(melee.rect().x > x0);
        assert!(melee.faces_right());

        let mut close = Enemy::melee(500.0, GROUND_TOP - ENEMY_HEIGHT, &mut rng);
        let player = player_at(close.rect().center_x() + 10.0);
        let x0 = close.rect().x;
        run(&mut close, &player, &platforms, 5);
        assert_eq!(close.rect().x, x0);
        let EnemyKind::Melee(ai) = &close.kind else {
            panic!("not melee");
        };
        assert!(!ai.moving);
    }

    #[test]
    fn test_melee_jumps_ledge_ahead() {
        let mut rng = Pcg32::seed_from_u64(2);
        let platforms = vec![
            Rect::new(0.0, GROUND_TOP, 600.0, GROUND_HEIGHT),
            Rect::new(800.0, GROUND_TOP, 2400.0, GROUND_HEIGHT),
        ];
        let mut melee = Enemy::melee(570.0, GROUND_TOP - ENEMY_HEIGHT, &mut rng);
        // Land first so it is grounded
        let here = player_at(melee.rect().center_x());
        run(&mut melee, &here, &platforms, 1);
        assert!(melee.body.on_ground);
        run(&mut melee, &player_at(1500.0), &platforms, 1);
        assert!(melee.body.vel.y < 0.0, "jumped before the gap");
    }

    #[test]
    fn test_vehicle_drifts_and_lands() {
        let mut rng = Pcg32::seed_from_u64(9);
        let platforms = ground();
        let mut vehicle = Enemy::vehicle(500.0, 1.0, GROUND_TOP, &mut rng);
        let EnemyKind::Vehicle { speed } = vehicle.kind else {
            panic!("not a vehicle");
        };
        let x0 = vehicle.rect().x;
        run(&mut vehicle, &player_at(100.0), &platforms, 60);
        assert_eq!(vehicle.rect().x, x0 + speed * 60.0);
        assert!(vehicle.body.on_ground);
        assert_eq!(vehicle.rect().bottom(), GROUND_TOP);
    }

    #[test]
    fn test_despawn_past_world_edge() {
        let mut rng = Pcg32::seed_from_u64(9);
        let platforms = ground();
        let timings = ClipTimings::default();
        let player = player_at(100.0);
        let ctx = EnemyContext {
            player: &player,
            platforms: &platforms,
            timings: &timings,
        };
        let mut vehicle = Enemy::vehicle(WORLD_WIDTH + DESPAWN_MARGIN, 1.0, GROUND_TOP, &mut rng);
        let mut shots = Vec::new();
        let mut alive = true;
        for _ in 0..200 {
            alive = vehicle.update(&ctx, &mut shots);
            if !alive {
                break;
            }
        }
        assert!(!alive);
        assert!(vehicle.hp > 0, "removal is independent of health");
    }

    #[test]
    fn test_hit_flash() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut melee = Enemy::melee(0.0, 0.0, &mut rng);
        assert!(!melee.take_hit(1));
        assert_eq!(melee.hp, MELEE_HP - 1);
        assert_eq!(melee.hit_scale(), 2.0);
        let platforms = ground();
        run(&mut melee, &player_at(0.0), &platforms, HIT_FLASH_TICKS as usize);
        assert_eq!(melee.hit_flash_ticks, 0);
        assert_eq!(melee.hit_scale(), 1.0);
        for _ in 2..MELEE_HP {
            assert!(!melee.take_hit(1));
        }
        assert!(melee.take_hit(1), "last point of health kills");
    }
}
