//! Session loop
//!
//! One simulation tick and one rendered frame per iteration, paced to a
//! fixed frame rate by a [`FramePacer`]. Input comes from an
//! [`InputSource`] polled once per frame.

use std::time::{Duration, Instant};

use crate::renderer::{AssetProvider, DrawOptions, Renderer, draw_frame};
use crate::settings::Settings;
use crate::sim::state::{SessionSummary, SimulationState};
use crate::sim::tick::{InputState, tick};

/// Frames the pacer may fall behind before it stops trying to catch up
const MAX_CATCHUP_FRAMES: u32 = 5;

/// Per-frame input snapshot provider
pub trait InputSource {
    fn poll(&mut self, state: &SimulationState) -> InputState;
}

impl<F> InputSource for F
where
    F: FnMut(&SimulationState) -> InputState,
{
    fn poll(&mut self, state: &SimulationState) -> InputState {
        self(state)
    }
}

/// Blocks until the next frame is due
pub trait FramePacer {
    fn wait(&mut self);
}

/// Sleeps to a fixed frame deadline
#[derive(Debug)]
pub struct FixedRatePacer {
    frame: Duration,
    next: Instant,
}

impl FixedRatePacer {
    pub fn new(frames_per_second: u32) -> Self {
        let frame = Duration::from_secs(1) / frames_per_second.max(1);
        Self {
            frame,
            next: Instant::now() + frame,
        }
    }
}

impl FramePacer for FixedRatePacer {
    fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
        } else if now - self.next > self.frame * MAX_CATCHUP_FRAMES {
            log::debug!("frame pacer fell behind by {:?}; resyncing", now - self.next);
            self.next = now;
        }
        self.next += self.frame;
    }
}

/// Runs frames back to back
#[derive(Debug, Default, Clone, Copy)]
pub struct Unpaced;

impl FramePacer for Unpaced {
    fn wait(&mut self) {}
}

/// Pacer matching the settings
pub fn pacer_for(settings: &Settings) -> Box<dyn FramePacer> {
    match settings.frame_rate() {
        Some(rate) => Box::new(FixedRatePacer::new(rate)),
        None => Box::new(Unpaced),
    }
}

/// Built-in player: heads right, turns toward enemies inside a locked arena,
/// fires on an interval and jumps after taking a hit
#[derive(Debug, Clone)]
pub struct Autopilot {
    fire_interval: u64,
    last_hp: Option<i32>,
}

impl Autopilot {
    pub fn new(fire_interval: u64) -> Self {
        Self {
            fire_interval: fire_interval.max(1),
            last_hp: None,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &SimulationState) -> InputState {
        let player = state.player.rect();
        let hurt = self.last_hp.is_some_and(|hp| state.player.hp < hp);
        self.last_hp = Some(state.player.hp);

        let target_left = state.director.is_locked()
            && state
                .enemies
                .iter()
                .min_by(|a, b| {
                    let da = (a.rect().center_x() - player.center_x()).abs();
                    let db = (b.rect().center_x() - player.center_x()).abs();
                    da.total_cmp(&db)
                })
                .is_some_and(|e| e.rect().center_x() < player.center_x());

        InputState {
            left: target_left,
            right: !target_left,
            jump: hurt,
            fire: true,
            fire_pressed: state.time_ticks % self.fire_interval == 0,
            quit: false,
        }
    }
}

/// Loop limits and presentation options for a session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub max_ticks: Option<u64>,
    pub draw: DrawOptions,
}

impl From<&Settings> for SessionOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_ticks: settings.max_ticks,
            draw: DrawOptions {
                show_hitboxes: settings.show_hitboxes,
            },
        }
    }
}

/// Run until quit, game over or the tick cap, then report
pub fn run_session<I, R, A, P>(
    state: &mut SimulationState,
    input: &mut I,
    renderer: &mut R,
    assets: &A,
    pacer: &mut P,
    options: SessionOptions,
) -> SessionSummary
where
    I: InputSource + ?Sized,
    R: Renderer,
    A: AssetProvider<Image = R::Image>,
    P: FramePacer + ?Sized,
{
    log::info!("Session starting (seed {})", state.seed);

    loop {
        if options.max_ticks.is_some_and(|max| state.time_ticks >= max) {
            log::info!("Tick cap reached");
            break;
        }

        let frame_input = input.poll(state);
        if frame_input.quit {
            log::info!("Quit requested at tick {}", state.time_ticks);
            break;
        }

        tick(state, &frame_input);
        draw_frame(state, renderer, assets, options.draw);
        if state.game_over {
            break;
        }
        pacer.wait();
    }

    let summary = state.summary();
    match serde_json::to_string(&summary) {
        Ok(json) => log::info!("Session summary: {json}"),
        Err(e) => log::warn!("Could not serialize session summary: {e}"),
    }
    summary
}
