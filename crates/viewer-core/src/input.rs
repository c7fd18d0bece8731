//! Interaction state owned by the viewport controller.

/// Accumulated drag rotation in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub rotation_x: f32,
    pub rotation_y: f32,
}

/// Pointer drag tracking. `last_x`/`last_y` only mean something while
/// `active` is set; they are overwritten by every pointer-down and drag move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last_x = x;
        self.last_y = y;
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    /// Advance to `(x, y)` and return the pixel delta from the previous
    /// position, or `None` when no drag is in progress.
    pub fn advance(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }
}

/// Size of the rendering surface in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Clamp to at least one pixel in each direction so the aspect ratio is
    /// always defined.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
