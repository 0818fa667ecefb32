//! Pointer events and screen geometry

use ct_core::error::InputError;

/// Axis-aligned rectangle in view pixels, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle of the given size with its top-left corner at `(x, y)`
    pub fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn center_x(&self) -> i32 {
        midpoint(self.left, self.right)
    }

    pub fn center_y(&self) -> i32 {
        midpoint(self.top, self.bottom)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && x >= self.left
            && x < self.right
            && y >= self.top
            && y < self.bottom
    }

    /// Shift by `(dx, dy)`, stopping at the edges of the coordinate space
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.move_to_wide(
            i64::from(self.left) + i64::from(dx),
            i64::from(self.top) + i64::from(dy),
        );
    }

    /// Move so the top-left corner lands on `(x, y)`
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.move_to_wide(i64::from(x), i64::from(y));
    }

    fn move_to_wide(&mut self, x: i64, y: i64) {
        let (w, h) = (i64::from(self.width().max(0)), i64::from(self.height().max(0)));
        let max = i64::from(i32::MAX);
        self.left = x.clamp(i64::from(i32::MIN), max - w) as i32;
        self.top = y.clamp(i64::from(i32::MIN), max - h) as i32;
        self.right = self.left.saturating_add(w as i32);
        self.bottom = self.top.saturating_add(h as i32);
    }

    /// Same size, shifted as little as possible to lie inside `screen`.
    /// A rect larger than `screen` keeps its top-left on the screen origin.
    pub fn clamped_to(&self, screen: Rect) -> Rect {
        let x = self.left.min(screen.right.saturating_sub(self.width())).max(screen.left);
        let y = self.top.min(screen.bottom.saturating_sub(self.height())).max(screen.top);
        Rect::from_origin(x, y, self.width(), self.height())
    }

    /// Position of `(x, y)` relative to the center, scaled so the edges are +/-1
    pub fn normalize(&self, x: f32, y: f32) -> (f32, f32) {
        let cx = self.center_x() as f32;
        let cy = self.center_y() as f32;
        let half_w = (self.right as f32 - cx).max(1.0);
        let half_h = (self.bottom as f32 - cy).max(1.0);
        ((x - cx) / half_w, (y - cy) / half_h)
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) / 2) as i32
}

/// What a pointer event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// First finger down
    Down,
    /// Additional finger down
    PointerDown,
    Move,
    /// Last finger up
    Up,
    /// A finger up while others remain
    PointerUp,
    /// Gesture aborted by the platform; every pointer is released
    Cancel,
}

/// One finger on the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    pub fn pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// A pointer event: the action, which pointer performed it, and every pointer
/// currently on the screen
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub action_index: usize,
    pub pointers: Vec<Pointer>,
}

impl PointerEvent {
    pub fn new(action: PointerAction, action_index: usize, pointers: Vec<Pointer>) -> Self {
        Self { action, action_index, pointers }
    }

    /// Single-finger event
    pub fn single(action: PointerAction, id: i32, x: f32, y: f32) -> Self {
        Self::new(action, 0, vec![Pointer::new(id, x, y)])
    }

    /// The pointer that performed the action
    pub fn action_pointer(&self) -> Result<Pointer, InputError> {
        self.pointers
            .get(self.action_index)
            .copied()
            .ok_or(InputError::PointerIndex {
                index: self.action_index,
                count: self.pointers.len(),
            })
    }

    pub fn pointer(&self, id: i32) -> Option<Pointer> {
        self.pointers.iter().copied().find(|p| p.id == id)
    }

    pub fn is_down(&self) -> bool {
        matches!(self.action, PointerAction::Down | PointerAction::PointerDown)
    }

    pub fn is_up(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::PointerUp)
    }

    pub fn is_move(&self) -> bool {
        self.action == PointerAction::Move
    }

    pub fn is_cancel(&self) -> bool {
        self.action == PointerAction::Cancel
    }
}
