use log::debug;
use std::f64::consts::{FRAC_PI_2, PI};

/// Radians of rotation per pointer unit of drag
pub const DRAG_SCALE: f64 = PI / 500.0;

/// Rotation about the horizontal (`x`) and vertical (`y`) axes, in radians.
///
/// Only `x` is clamped, to [-π/2, π/2]; `y` is left to grow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
}

impl Rotation {
    /// Adds to both angles and clamps the horizontal axis.
    pub fn rotate_by(&mut self, dx: f64, dy: f64) {
        self.x = (self.x + dx).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.y += dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Pointer events in client coordinates of the drawing surface.
///
/// Touch events carry every active touch point; only the first is used.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    MouseLeave,
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
    TouchCancel,
}

/// Whether a drag is in progress and where the pointer was last seen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub dragging: bool,
    pub channel: Option<Channel>,
    pub last: Point,
}

impl DragState {
    fn press(&mut self, channel: Channel, at: Point) {
        debug!("{channel:?} drag started at ({:.0}, {:.0})", at.x, at.y);
        self.dragging = true;
        self.channel = Some(channel);
        self.last = at;
    }

    fn release(&mut self) {
        if self.dragging {
            debug!("{:?} drag ended", self.channel);
        }
        self.dragging = false;
        self.channel = None;
    }

    fn drag_to(&mut self, at: Point, rotation: &mut Rotation) {
        if !self.dragging {
            return;
        }
        let dx = at.x - self.last.x;
        let dy = at.y - self.last.y;
        // Horizontal motion turns about the vertical axis and vice versa
        rotation.rotate_by(dy * DRAG_SCALE, dx * DRAG_SCALE);
        self.last = at;
    }

    /// Applies one pointer event to the drag and rotation state.
    pub fn handle(&mut self, event: &PointerEvent, rotation: &mut Rotation) {
        match event {
            PointerEvent::MouseDown(at) => self.press(Channel::Mouse, *at),
            PointerEvent::MouseMove(at) => self.drag_to(*at, rotation),
            PointerEvent::MouseUp | PointerEvent::MouseLeave => self.release(),
            PointerEvent::TouchStart(points) => {
                if let Some(first) = points.first() {
                    self.press(Channel::Touch, *first);
                }
            }
            PointerEvent::TouchMove(points) => {
                if let Some(first) = points.first() {
                    self.drag_to(*first, rotation);
                }
            }
            PointerEvent::TouchEnd | PointerEvent::TouchCancel => self.release(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mouse_drag_rotates_both_axes() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(&PointerEvent::MouseDown(Point::new(100.0, 100.0)), &mut rotation);
        assert!(drag.dragging);
        drag.handle(&PointerEvent::MouseMove(Point::new(150.0, 110.0)), &mut rotation);
        assert!((rotation.y - 50.0 * PI / 500.0).abs() < 1e-12);
        assert!((rotation.x - 10.0 * PI / 500.0).abs() < 1e-12);
        assert_eq!(drag.last, Point::new(150.0, 110.0));

        // Deltas are measured from the last move, not from the press
        drag.handle(&PointerEvent::MouseMove(Point::new(150.0, 110.0)), &mut rotation);
        assert!((rotation.y - 50.0 * PI / 500.0).abs() < 1e-12);

        drag.handle(&PointerEvent::MouseUp, &mut rotation);
        assert!(!drag.dragging);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(&PointerEvent::MouseMove(Point::new(300.0, 300.0)), &mut rotation);
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn leaving_the_surface_ends_the_drag() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(&PointerEvent::MouseDown(Point::new(0.0, 0.0)), &mut rotation);
        drag.handle(&PointerEvent::MouseLeave, &mut rotation);
        drag.handle(&PointerEvent::MouseMove(Point::new(80.0, 0.0)), &mut rotation);
        assert!(!drag.dragging);
        assert_eq!(rotation.y, 0.0);
    }

    #[test]
    fn touch_uses_first_point_only() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(
            &PointerEvent::TouchStart(vec![Point::new(10.0, 10.0), Point::new(500.0, 500.0)]),
            &mut rotation,
        );
        assert_eq!(drag.channel, Some(Channel::Touch));
        drag.handle(
            &PointerEvent::TouchMove(vec![Point::new(20.0, 10.0), Point::new(0.0, 0.0)]),
            &mut rotation,
        );
        assert!((rotation.y - 10.0 * DRAG_SCALE).abs() < 1e-12);
        assert_eq!(rotation.x, 0.0);
        drag.handle(&PointerEvent::TouchEnd, &mut rotation);
        assert!(!drag.dragging);
    }

    #[test]
    fn cancelled_touch_ends_the_drag() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(&PointerEvent::TouchStart(vec![Point::new(0.0, 0.0)]), &mut rotation);
        drag.handle(&PointerEvent::TouchCancel, &mut rotation);
        assert!(!drag.dragging);
        assert_eq!(drag.channel, None);
        drag.handle(&PointerEvent::TouchMove(vec![Point::new(50.0, 50.0)]), &mut rotation);
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn empty_touch_lists_are_ignored() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(&PointerEvent::TouchStart(Vec::new()), &mut rotation);
        assert!(!drag.dragging);
    }

    #[test]
    fn vertical_axis_is_not_clamped() {
        let mut drag = DragState::default();
        let mut rotation = Rotation::default();
        drag.handle(&PointerEvent::MouseDown(Point::new(0.0, 0.0)), &mut rotation);
        drag.handle(&PointerEvent::MouseMove(Point::new(5000.0, 5000.0)), &mut rotation);
        assert!((rotation.y - 10.0 * PI).abs() < 1e-9);
        assert_eq!(rotation.x, FRAC_PI_2);
    }

    fn pointer_event() -> impl Strategy<Value = PointerEvent> {
        let point = (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y));
        prop_oneof![
            point.clone().prop_map(PointerEvent::MouseDown),
            point.clone().prop_map(PointerEvent::MouseMove),
            Just(PointerEvent::MouseUp),
            Just(PointerEvent::MouseLeave),
            prop::collection::vec(point.clone(), 0..3).prop_map(PointerEvent::TouchStart),
            prop::collection::vec(point, 0..3).prop_map(PointerEvent::TouchMove),
            Just(PointerEvent::TouchEnd),
            Just(PointerEvent::TouchCancel),
        ]
    }

    proptest! {
        #[test]
        fn horizontal_axis_stays_clamped(events in prop::collection::vec(pointer_event(), 0..64)) {
            let mut drag = DragState::default();
            let mut rotation = Rotation::default();
            for event in &events {
                drag.handle(event, &mut rotation);
                prop_assert!(rotation.x >= -FRAC_PI_2 && rotation.x <= FRAC_PI_2);
            }
        }
    }
}
