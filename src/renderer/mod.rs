//! Rendering collaborators
//!
//! The simulation never draws. A frontend supplies a [`Renderer`] (rectangles,
//! sprites, text) and an [`AssetProvider`] (decoded frames and their display
//! durations); [`scene::draw_frame`] walks the state and issues draw calls.

pub mod headless;
pub mod scene;

use glam::Vec2;

use crate::sim::anim::{Clip, ClipTimings};
use crate::sim::geom::Rect;

pub use headless::{HeadlessRenderer, NullAssets};
pub use scene::{DrawOptions, draw_frame};

/// Linear RGBA, 0..1 per channel
pub type Color = [f32; 4];

/// Fixed scene colors
pub mod palette {
    use super::Color;

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: Color = rgb(126, 200, 235);
    pub const PLATFORM: Color = rgb(139, 69, 19);
    pub const PLAYER: Color = rgb(20, 20, 255);
    pub const SHOOTER: Color = rgb(220, 40, 40);
    pub const MELEE: Color = rgb(40, 220, 40);
    pub const VEHICLE: Color = rgb(0, 0, 0);
    pub const BULLET: Color = rgb(10, 10, 10);
    pub const BAR_BG: Color = rgb(40, 40, 40);
    pub const BAR: Color = rgb(0, 255, 0);
    pub const ARROW: Color = rgb(255, 255, 0);
    pub const TEXT: Color = rgb(0, 0, 0);
    pub const TEXT_LIGHT: Color = rgb(255, 255, 255);
    pub const HITBOX: Color = [1.0, 0.0, 1.0, 1.0];
}

/// Text styles the scene asks for; the renderer maps them to real fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// HUD and health percentages
    Regular,
    /// Centered announcements
    Banner,
    /// Enlarged health percentage right after a hit
    Hit,
}

/// Where a text position sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// Drawing surface for one frame, in screen coordinates
pub trait Renderer {
    type Image;

    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    /// Blit `image` with its top-left at `pos`
    fn draw_sprite(&mut self, image: &Self::Image, pos: Vec2);
    fn draw_text(&mut self, text: &str, font: Font, color: Color, pos: Vec2, anchor: Anchor);
    /// Finish the frame
    fn present(&mut self);
}

/// Decoded art. Anything missing is drawn as a flat colored rectangle.
///
/// All source art faces left. `flip_x` asks for the mirrored, right-facing
/// image, for the player exactly as for enemies and shots.
pub trait AssetProvider {
    type Image;

    /// Frame `index` of `clip`, mirrored horizontally when `flip_x`
    fn frame(&self, clip: Clip, index: usize, flip_x: bool) -> Option<&Self::Image>;

    /// Display duration of each frame of `clip`, in seconds
    fn frame_durations(&self, clip: Clip) -> Vec<f32>;

    /// Player image, mirrored to face right when `flip_x`
    fn player_sprite(&self, _flip_x: bool) -> Option<&Self::Image> {
        None
    }

    /// Background layers and their scroll factors, farthest first
    fn parallax_layers(&self) -> &[(Self::Image, f32)] {
        &[]
    }
}

/// Animation timings for the simulation, read from the asset layer
pub fn clip_timings<A: AssetProvider>(assets: &A) -> ClipTimings {
    ClipTimings::from_fn(|clip| assets.frame_durations(clip))
}
