//! Sprite-style entity base shared by every kind
//!
//! Position, size, visibility, an animation sequence with a cursor, and a
//! collision rectangle that may be tighter than the visual bounds. Invisible
//! entities never collide.

use glam::IVec2;

/// Axis-aligned rectangle in pixel space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test; shared edges do not count as contact
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Same rectangle shifted by `offset`
    pub fn translated(&self, offset: IVec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Common sprite fields for the avatar, hostiles, projectiles and power-ups
#[derive(Debug, Clone)]
pub struct Entity {
    /// Top-left corner in pixel space
    pub pos: IVec2,
    /// Visual bounding box
    pub size: IVec2,
    /// Invisible entities are skipped by motion, collision and render
    pub visible: bool,
    /// Active animation sequence (frame indices into the kind's sheet)
    frames: &'static [u16],
    /// Cursor into `frames`
    cursor: usize,
    /// Collision rectangle relative to `pos`
    hit_box: Rect,
}

impl Entity {
    /// New visible entity at the origin, on frame 0 of `frames`
    pub fn new(size: IVec2, frames: &'static [u16], hit_box: Rect) -> Self {
        Self {
            pos: IVec2::ZERO,
            size,
            visible: true,
            frames,
            cursor: 0,
            hit_box,
        }
    }

    /// Visual bounds at the current position
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Collision rectangle at the current position
    pub fn hit_bounds(&self) -> Rect {
        self.hit_box.translated(self.pos)
    }

    /// True when both entities are visible and their hit rectangles overlap
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.visible && other.visible && self.hit_bounds().overlaps(&other.hit_bounds())
    }

    /// Current raw frame for the renderer
    pub fn frame(&self) -> u16 {
        self.frames[self.cursor]
    }

    pub fn frames(&self) -> &'static [u16] {
        self.frames
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Swap the active sequence and rewind to its start
    pub fn set_sequence(&mut self, frames: &'static [u16]) {
        self.frames = frames;
        self.cursor = 0;
    }

    /// Jump to a fixed point in the active sequence
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.frames.len() - 1);
    }

    /// Advance the cursor, wrapping at the end of the sequence
    pub fn step_cursor(&mut self) {
        self.cursor = (self.cursor + 1) % self.frames.len();
    }

    /// True when the cursor sits on the final index of the sequence
    pub fn at_sequence_end(&self) -> bool {
        self.cursor == self.frames.len() - 1
    }
}
