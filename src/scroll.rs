//! Scroll viewport math shared by `ScrollView`, `List` and `SelectList`.
//!
//! Pure functions over sizes and offsets; no tree access. Callers re-derive
//! a `Viewport` from the content's current min-size on every layout, event
//! and draw, so nothing here is cached.

use crate::geometry::{Point, Size};

/// Scrollbar thickness in pixels.
pub const BAR_SIZE: i32 = 10;
/// Smallest thumb length in pixels.
pub const MIN_THUMB: i32 = 20;
/// Pixels scrolled per wheel line in a `ScrollView`.
pub const WHEEL_STEP: f64 = 20.0;

/// Clamp `offset` into `[0, max]`. A negative `max` counts as 0.
pub fn clamp_offset(offset: i32, max: i32) -> i32 {
    offset.clamp(0, max.max(0))
}

/// Largest valid offset for `content` shown through `viewport` pixels.
pub fn max_scroll(content: i32, viewport: i32) -> i32 {
    (content - viewport).max(0)
}

/// Apply a wheel delta (in lines) of `step` pixels each. Positive `dy`
/// scrolls toward the start. Non-finite deltas saturate at the ends.
pub fn wheel(offset: i32, dy: f64, step: f64, max: i32) -> i32 {
    let target = (offset as f64 - dy * step).clamp(i32::MIN as f64, i32::MAX as f64);
    clamp_offset(target as i32, max)
}

/// Bar layout of a scroll viewport for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub need_v: bool,
    pub need_h: bool,
    /// Outer viewport (the widget's rect size).
    pub outer: Size,
    /// Viewport minus the space taken by visible bars.
    pub effective: Size,
    pub content: Size,
    pub max_x: i32,
    pub max_y: i32,
}

impl Viewport {
    /// Decide which bars are needed. A bar on one axis eats space on the
    /// other, so each need is corrected once against the reduced size. This
    /// is a single pass, not a fixpoint.
    pub fn compute(content: Size, outer: Size) -> Self {
        let mut need_v = content.height > outer.height;
        let mut need_h = content.width > outer.width;
        if need_v && content.width > outer.width - BAR_SIZE {
            need_h = true;
        }
        if need_h && content.height > outer.height - BAR_SIZE {
            need_v = true;
        }

        let mut effective = outer;
        if need_v {
            effective.width -= BAR_SIZE;
        }
        if need_h {
            effective.height -= BAR_SIZE;
        }

        Self {
            need_v,
            need_h,
            outer,
            effective,
            content,
            max_x: max_scroll(content.width, effective.width),
            max_y: max_scroll(content.height, effective.height),
        }
    }

    pub fn clamp(&self, offset: Point) -> Point {
        Point::new(
            clamp_offset(offset.x, self.max_x),
            clamp_offset(offset.y, self.max_y),
        )
    }

    /// Size the content is laid out at: never smaller than the viewport.
    pub fn content_extent(&self) -> Size {
        self.content.max(self.effective)
    }

    pub fn v_thumb(&self, offset_y: i32) -> Thumb {
        Thumb::new(self.effective.height, self.content.height, offset_y, self.max_y)
    }

    pub fn h_thumb(&self, offset_x: i32) -> Thumb {
        Thumb::new(self.effective.width, self.content.width, offset_x, self.max_x)
    }
}

/// Thumb position and length along a track, relative to the track start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumb {
    pub track: i32,
    pub pos: i32,
    pub len: i32,
}

impl Thumb {
    pub fn new(track: i32, content: i32, offset: i32, max: i32) -> Self {
        let len = if content > 0 {
            ((track as f64 * track as f64 / content as f64) as i32).max(MIN_THUMB)
        } else {
            track.max(MIN_THUMB)
        };
        let pos = if max > 0 {
            let offset = clamp_offset(offset, max);
            (offset as f64 / max as f64 * (track - len) as f64) as i32
        } else {
            0
        };
        Self { track, pos, len }
    }

    /// Whether a coordinate relative to the track start lies on the thumb.
    pub fn contains(&self, rel: i32) -> bool {
        rel >= self.pos && rel < self.pos + self.len
    }

    /// Offset after dragging the thumb `delta` pixels from where the drag
    /// began at `start_offset`.
    pub fn drag(&self, start_offset: i32, delta: i32, max: i32) -> i32 {
        let range = self.track - self.len;
        if range <= 0 || max <= 0 {
            return clamp_offset(start_offset, max);
        }
        let moved = (delta as f64 * max as f64 / range as f64) as i32;
        clamp_offset(start_offset + moved, max)
    }
}
