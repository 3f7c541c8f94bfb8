use crate::color::Color;
use crate::input::{DragState, Rotation};

/// Per-frame auto-rotation about the vertical axis
pub const AUTO_ROTATE_Y: f64 = 0.01;
/// Per-frame auto-rotation about the horizontal axis
pub const AUTO_ROTATE_X: f64 = 0.0005;

/// Viewer state mutated by input and consumed every frame
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Current rotation of the bag
    pub rotation: Rotation,
    /// Pointer drag in progress
    pub drag: DragState,
    /// Auto-rotation allowed at all
    pub auto_rotate: bool,
    /// Color the bag is built with
    pub color: Color,
    /// Debug overlay shown
    pub debug: bool,
}

impl ViewState {
    pub fn new(color: Color, auto_rotate: bool) -> Self {
        ViewState {
            rotation: Rotation::default(),
            drag: DragState::default(),
            auto_rotate,
            color,
            debug: false,
        }
    }

    /// Auto-rotation runs exactly when no drag is in progress.
    pub fn auto_rotating(&self) -> bool {
        self.auto_rotate && !self.drag.dragging
    }

    /// Advances auto-rotation by one frame.
    pub fn advance(&mut self) {
        if self.auto_rotating() {
            self.rotation.rotate_by(AUTO_ROTATE_X, AUTO_ROTATE_Y);
        }
    }
}
