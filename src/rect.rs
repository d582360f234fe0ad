use glam::Vec2;

/// Axis-aligned float rectangle used for collision resolution.
///
/// Overlap is strict (touching edges do not collide) and the edge setters
/// translate the whole rectangle, which is what the clamp steps of the
/// collision pass rely on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.size.x;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom - self.size.y;
    }

    /// Strict overlap test; shared edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The same rectangle shifted by `offset`.
    pub fn shifted(&self, offset: Vec2) -> Rect {
        Rect::new(self.pos + offset, self.size)
    }
}
