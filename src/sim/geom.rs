//! Axis-aligned rectangles and ground probing
//!
//! Screen-style coordinates: +x right, +y down. Rectangles are stored as a
//! top-left corner plus extents.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GROUND_PROBE_TOLERANCE;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`x`h` whose bottom edge is centered on `(cx, bottom)`
    pub fn from_midbottom(cx: f32, bottom: f32, w: f32, h: f32) -> Self {
        Self::new(cx - w / 2.0, bottom - h, w, h)
    }

    /// Rectangle of size `w`x`h` centered on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.center_y())
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Copy of this rectangle shifted by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Move this rectangle fully inside `bounds` (centered if it doesn't fit)
    pub fn clamp_inside(&mut self, bounds: &Rect) {
        self.x = if self.w >= bounds.w {
            bounds.center_x() - self.w / 2.0
        } else {
            self.x.clamp(bounds.left(), bounds.right() - self.w)
        };
        self.y = if self.h >= bounds.h {
            bounds.center_y() - self.h / 2.0
        } else {
            self.y.clamp(bounds.top(), bounds.bottom() - self.h)
        };
    }
}

/// Whether a platform lies directly beneath `rect` shifted `dx` sideways
///
/// The probe is the rectangle nudged 2 units down; a platform counts when the
/// probe overlaps it and the probe's bottom is within the tolerance of the
/// platform's top. Used to detect ledges ahead of walking enemies.
pub fn platform_below(rect: &Rect, platforms: &[Rect], dx: f32) -> bool {
    let probe = rect.translated(dx, 2.0);
    platforms
        .iter()
        .any(|p| probe.intersects(p) && probe.bottom() <= p.top() + GROUND_PROBE_TOLERANCE)
}
