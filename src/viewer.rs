use crate::bag::build_bag;
use crate::color::Color;
use crate::graphics::{Frame, Renderer};
use crate::input::PointerEvent;
use crate::scene::{Group, Light, NodeId, PerspectiveCamera, Scene};
use crate::state::ViewState;
use log::{debug, info};

pub const FIELD_OF_VIEW: f64 = 75.0;
pub const NEAR: f64 = 0.1;
pub const FAR: f64 = 1000.0;
pub const CAMERA_DISTANCE: f64 = 3.0;

/// Client size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Surface { width, height }
    }

    fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f64 / self.height as f64
        }
    }
}

/// Scene, camera, and renderer, created together on initialization
struct Stage {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: Renderer,
    bag: NodeId,
}

/// Owns the bag scene and steps it one frame at a time
pub struct Viewer {
    pub state: ViewState,
    shadow_map_size: usize,
    stage: Option<Stage>,
    frames: u64,
}

impl Viewer {
    pub fn new(state: ViewState, shadow_map_size: usize) -> Self {
        Viewer {
            state,
            shadow_map_size,
            stage: None,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stage.is_some()
    }

    /// Builds the scene for a surface and enters the running state.
    ///
    /// Does nothing when already running.
    pub fn initialize(&mut self, surface: Surface, pixel_ratio: f64) {
        if self.stage.is_some() {
            return;
        }

        let mut scene = Scene::new(Color::WHITE);

        let mut camera = PerspectiveCamera::new(FIELD_OF_VIEW, surface.aspect(), NEAR, FAR);
        camera.position = [0.0, 0.0, CAMERA_DISTANCE];

        let mut renderer = Renderer::new(self.shadow_map_size);
        renderer.set_size(surface.width, surface.height);
        renderer.set_pixel_ratio(pixel_ratio);
        renderer.shadow_map_enabled = true;

        scene.add_light(Light::Ambient {
            color: Color::WHITE,
            intensity: 0.6,
        });
        scene.add_light(Light::Directional {
            color: Color::WHITE,
            intensity: 0.8,
            position: [5.0, 5.0, 5.0],
            cast_shadow: true,
        });

        let bag = scene.add(build_bag(self.state.color));
        info!(
            "viewer running at {}x{} (pixel ratio {}), bag color {}",
            surface.width, surface.height, pixel_ratio, self.state.color
        );
        self.stage = Some(Stage {
            scene,
            camera,
            renderer,
            bag,
        });
    }

    /// Replaces the bag with a freshly built one in `color`.
    pub fn set_color(&mut self, color: Color) {
        self.state.color = color;
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        stage.scene.remove(stage.bag);
        stage.bag = stage.scene.add(build_bag(color));
        info!("bag rebuilt in {color}");
    }

    pub fn pointer(&mut self, event: &PointerEvent) {
        self.state.drag.handle(event, &mut self.state.rotation);
    }

    /// Matches the camera and output surface to a new client size.
    pub fn resize(&mut self, surface: Surface) {
        let Some(stage) = self.stage.as_mut() else {
            return;
        };
        stage.camera.aspect = surface.aspect();
        stage.camera.update_projection();
        stage.renderer.set_size(surface.width, surface.height);
        debug!("viewer resized to {}x{}", surface.width, surface.height);
    }

    /// Runs one frame: auto-rotation, pose update, and render.
    ///
    /// Returns `None` until the viewer is initialized.
    pub fn step(&mut self) -> Option<Frame<'_>> {
        let stage = self.stage.as_mut()?;
        self.state.advance();
        if let Some(bag) = stage.scene.get_mut(stage.bag) {
            bag.rotation = [self.state.rotation.x, self.state.rotation.y];
        }
        self.frames += 1;
        Some(stage.renderer.render(&stage.scene, &stage.camera))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.stage.as_ref().map(|stage| &stage.scene)
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.stage.as_ref().map(|stage| &stage.camera)
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.stage.as_ref().map(|stage| &stage.renderer)
    }

    pub fn bag(&self) -> Option<&Group> {
        let stage = self.stage.as_ref()?;
        stage.scene.get(stage.bag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Point;
    use crate::state::{AUTO_ROTATE_X, AUTO_ROTATE_Y};

    fn running(color: Color) -> Viewer {
        let mut viewer = Viewer::new(ViewState::new(color, true), 64);
        viewer.initialize(Surface::new(32, 16), 1.0);
        viewer
    }

    #[test]
    fn initialization_sets_up_camera_and_renderer() {
        let viewer = running(Color(0x1a1a1a));
        assert!(viewer.is_running());
        let camera = viewer.camera().unwrap();
        assert_eq!(camera.fov, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
        assert_eq!(camera.aspect, 2.0);
        let renderer = viewer.renderer().unwrap();
        assert!(renderer.shadow_map_enabled);
        assert_eq!(renderer.size(), (32, 16));
        let scene = viewer.scene().unwrap();
        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.group_count(), 1);
    }

    #[test]
    fn initializing_twice_keeps_the_first_scene() {
        let mut viewer = running(Color::BLACK);
        viewer.initialize(Surface::new(100, 100), 2.0);
        assert_eq!(viewer.renderer().unwrap().size(), (32, 16));
        assert_eq!(viewer.scene().unwrap().group_count(), 1);
    }

    #[test]
    fn stepping_before_initialization_renders_nothing() {
        let mut viewer = Viewer::new(ViewState::new(Color::BLACK, true), 64);
        assert!(viewer.step().is_none());
        assert_eq!(viewer.state.rotation.y, 0.0);
        viewer.resize(Surface::new(10, 10));
        assert!(!viewer.is_running());
    }

    #[test]
    fn color_change_rebuilds_a_single_bag() {
        let mut viewer = running(Color::BLACK);
        for color in [Color(0xff0000), Color(0x00ff00), Color(0x0000ff)] {
            viewer.set_color(color);
            assert_eq!(viewer.scene().unwrap().group_count(), 1);
            let body = viewer.bag().unwrap().mesh("body").unwrap();
            assert_eq!(body.material.color, color);
        }
    }

    #[test]
    fn color_before_initialization_is_used_on_build() {
        let mut viewer = Viewer::new(ViewState::new(Color::BLACK, true), 64);
        viewer.set_color(Color(0x8b4513));
        viewer.initialize(Surface::new(8, 8), 1.0);
        let body = viewer.bag().unwrap().mesh("body").unwrap();
        assert_eq!(body.material.color, Color(0x8b4513));
    }

    #[test]
    fn frames_apply_rotation_to_the_bag() {
        let mut viewer = running(Color::BLACK);
        viewer.step();
        viewer.step();
        assert_eq!(viewer.frames(), 2);
        let bag = viewer.bag().unwrap();
        assert!((bag.rotation[1] - 2.0 * AUTO_ROTATE_Y).abs() < 1e-12);
        assert!((bag.rotation[0] - 2.0 * AUTO_ROTATE_X).abs() < 1e-12);
    }

    #[test]
    fn dragging_pauses_auto_rotation_until_release() {
        let mut viewer = running(Color::BLACK);
        viewer.pointer(&PointerEvent::MouseDown(Point::new(5.0, 5.0)));
        for _ in 0..5 {
            viewer.step();
        }
        assert_eq!(viewer.state.rotation.y, 0.0);
        viewer.pointer(&PointerEvent::MouseUp);
        viewer.step();
        assert_eq!(viewer.state.rotation.y, AUTO_ROTATE_Y);
    }

    #[test]
    fn resize_keeps_model_and_rotation() {
        let mut viewer = running(Color::BLACK);
        viewer.step();
        let rotation = viewer.state.rotation;
        viewer.resize(Surface::new(40, 40));
        assert_eq!(viewer.camera().unwrap().aspect, 1.0);
        assert_eq!(viewer.renderer().unwrap().size(), (40, 40));
        assert_eq!(viewer.state.rotation, rotation);
        assert_eq!(viewer.scene().unwrap().group_count(), 1);
        let frame = viewer.step().unwrap();
        assert_eq!((frame.width, frame.height), (40, 40));
    }
}
