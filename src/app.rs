use crate::catalog::{render_products, Track, CATALOG};
use crate::config::Config;
use crate::error::Result;
use crate::input::PointerEvent;
use crate::page::Page;
use crate::slider::{Slider, GAP};
use crate::state::ViewState;
use crate::terminal::{self, Layout, TerminalGuard};
use crate::timer::Deferred;
use crate::viewer::Viewer;
use anyhow::Context;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::{debug, info, warn};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Work deferred until the layout has settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    InitViewer,
    PositionSlider,
}

/// The whole showcase: page, viewer, and product slider
pub struct App {
    config: Config,
    pub page: Page,
    pub viewer: Viewer,
    pub track: Track,
    pub slider: Slider,
    pub layout: Layout,
    deferred: Deferred<Task>,
    running: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl App {
    pub fn new(config: Config, cols: u16, rows: u16, now: Instant) -> Self {
        let page = Page::new(
            &config.bag_name,
            config.swatches.clone(),
            config.color,
            config.notification_ttl,
        );
        let viewer = Viewer::new(
            ViewState::new(config.color, config.auto_rotate),
            config.shadow_map_size,
        );

        let mut track = Track::default();
        render_products(&mut track, &CATALOG, config.card_width);
        info!("catalog rendered with {} products", track.cards.len());

        let mut deferred = Deferred::new();
        deferred.schedule(Task::InitViewer, config.init_delay, now);
        deferred.schedule(Task::PositionSlider, config.slider_delay, now);

        App {
            slider: Slider::new(config.items_per_view, GAP),
            layout: Layout::new(cols, rows),
            config,
            page,
            viewer,
            track,
            deferred,
            running: true,
            frames_since_last_update: 0,
            last_fps_calculation: now,
            fps: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ends the render loop after the current iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn frame_interval(&self) -> Duration {
        self.config.frame_interval
    }

    /// Runs the deferred tasks that are due at `now`.
    pub fn run_due_tasks(&mut self, now: Instant) {
        for task in self.deferred.take_due(now) {
            match task {
                Task::InitViewer => self
                    .viewer
                    .initialize(self.layout.surface(), self.config.pixel_ratio),
                Task::PositionSlider => self.slider.update_position(&mut self.track),
            }
        }
    }

    /// How long to wait for input before the next frame or deferred task.
    pub fn poll_timeout(&self, next_frame: Instant, now: Instant) -> Duration {
        let frame = next_frame.saturating_duration_since(now);
        self.deferred
            .next_due_in(now)
            .map_or(frame, |due| due.min(frame))
    }

    /// Runs due deferred tasks and steps the viewer by one frame.
    pub fn update(&mut self, now: Instant) {
        self.run_due_tasks(now);

        if self.viewer.step().is_some() {
            // Update FPS calculation
            self.frames_since_last_update += 1;
            let duration = now.duration_since(self.last_fps_calculation);
            if duration.as_secs_f64() >= 1.0 {
                self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
                self.frames_since_last_update = 0;
                self.last_fps_calculation = now;
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => self.resize(*cols, *rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.stop(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.stop(),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                if let Err(err) = self.select_color(index) {
                    warn!("{err}");
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.prev_slide(),
            KeyCode::Right | KeyCode::Char('l') => self.next_slide(),
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.page.view_more(self.track.cards.len(), now);
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.page.add_to_cart(now);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.viewer.state.debug = !self.viewer.state.debug;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        let on_canvas = self.layout.canvas.contains(col, row);
        let point = self.layout.canvas_point(col, row);
        let dragging = self.viewer.state.drag.dragging;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if on_canvas {
                    self.viewer.pointer(&PointerEvent::MouseDown(point));
                } else if let Some(index) =
                    self.layout
                        .color_button_at(col, row, self.page.buttons.len())
                {
                    if let Err(err) = self.select_color(index) {
                        warn!("{err}");
                    }
                } else if let Some(forward) = self.layout.slider_arrow_at(col, row) {
                    if forward {
                        self.next_slide();
                    } else {
                        self.prev_slide();
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved if dragging => {
                if on_canvas {
                    self.viewer.pointer(&PointerEvent::MouseMove(point));
                } else {
                    self.viewer.pointer(&PointerEvent::MouseLeave);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.viewer.pointer(&PointerEvent::MouseUp);
            }
            _ => {}
        }
    }

    /// Activates a color button and rebuilds the bag in its color.
    pub fn select_color(&mut self, index: usize) -> Result<()> {
        if let Some(color) = self.page.click_color(index)? {
            self.viewer.set_color(color);
        }
        Ok(())
    }

    pub fn next_slide(&mut self) {
        self.slider.next(&mut self.track);
    }

    pub fn prev_slide(&mut self) {
        self.slider.prev(&mut self.track);
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.layout = Layout::new(cols, rows);
        self.viewer.resize(self.layout.surface());
        self.slider.reset(&mut self.track);
        debug!("terminal resized to {cols}x{rows}");
    }

    pub fn draw<W: Write>(&mut self, out: &mut W, now: Instant) -> io::Result<()> {
        let canvas = self.layout.canvas;
        match self.viewer.renderer() {
            Some(renderer) => {
                terminal::draw_canvas(out, canvas, renderer.frame(), renderer.pixel_ratio())?
            }
            None => terminal::clear_rect(out, canvas)?,
        }

        if self.viewer.state.debug {
            let rotation = self.viewer.state.rotation;
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("Angle X: {:.2}, Angle Y: {:.2}", rotation.x, rotation.y),
                format!("Color: {}", self.viewer.state.color),
                format!("FPS: {:.2}", self.fps),
                format!("Frames: {}", self.viewer.frames()),
            ];
            terminal::draw_debug(out, canvas, &lines)?;
        }

        terminal::draw_panel(out, self.layout.panel, &self.page)?;
        terminal::draw_slider(out, self.layout.slider, &self.track, &self.slider)?;
        let status = self.layout.status;
        terminal::draw_status(out, status, self.page.current_notification(now))?;
        out.flush()
    }
}

/// Runs the interactive showcase until the user quits.
pub fn run(config: Config) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("Failed to read the terminal size")?;
    let _guard = TerminalGuard::enter().context("Failed to prepare the terminal")?;
    let mut out = io::BufWriter::new(io::stdout());

    let mut app = App::new(config, cols, rows, Instant::now());
    let mut next_frame = Instant::now();
    while app.is_running() {
        let timeout = app.poll_timeout(next_frame, Instant::now());
        if event::poll(timeout)? {
            let event = event::read()?;
            app.handle_event(&event, Instant::now());
        }

        let now = Instant::now();
        app.run_due_tasks(now);
        if now >= next_frame {
            app.update(now);
            app.draw(&mut out, now)?;
            next_frame = now + app.frame_interval();
        }
    }
    info!("showcase closed");
    Ok(())
}
