//! Windowless collaborators for the native runner and tests

use std::marker::PhantomData;

use glam::Vec2;

use super::{Anchor, AssetProvider, Color, Font, Renderer};
use crate::sim::anim::{Clip, ClipTimings};
use crate::sim::geom::Rect;

/// Renderer that only tallies what it was asked to draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub rects: u64,
    pub sprites: u64,
    pub texts: u64,
}

impl Renderer for HeadlessRenderer {
    type Image = ();

    fn clear(&mut self, _color: Color) {}

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }

    fn draw_sprite(&mut self, _image: &(), _pos: Vec2) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _text: &str, _font: Font, _color: Color, _pos: Vec2, _anchor: Anchor) {
        self.texts += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

/// No art at all: every entity falls back to a flat rectangle, and clips
/// keep the stock timeline
pub struct NullAssets<I = ()> {
    timings: ClipTimings,
    _image: PhantomData<I>,
}

impl<I> Default for NullAssets<I> {
    fn default() -> Self {
        Self {
            timings: ClipTimings::default(),
            _image: PhantomData,
        }
    }
}

impl<I> AssetProvider for NullAssets<I> {
    type Image = I;

    fn frame(&self, _clip: Clip, _index: usize, _flip_x: bool) -> Option<&I> {
        None
    }

    fn frame_durations(&self, clip: Clip) -> Vec<f32> {
        self.timings.get(clip).to_vec()
    }
}
