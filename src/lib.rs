// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod shape;
pub mod state;

pub use animation::{AnimationClock, Easing, ValueAnimation};
pub use config::{Color, IndicatorConfig};
pub use error::{ConfigError, RenderError};
pub use geometry::{Geometry, LayoutStyle, MeasureSpec, Point, Rect};
pub use shape::{Direction, Orientation, Shape, ShapeKind};
pub use state::{AnimationPhase, IndicatorState};

// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for channel-driven indicator updates
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorCommand {
    SetValue(f64),
    SetOrientation(Orientation),
    SetDirection(Direction),
    SetStartingAngle(f64),
    SetRange(f64, f64),
    SetRadius(Option<f64>),
    SetRingThickness(f64),
}

/// A full, half or quarter pie progress indicator.
///
/// Owns the value state and the last layout snapshot. The host feeds it
/// measurement constraints, value requests and clock ticks, and paints
/// whatever [`PieIndicator::geometry`] and [`PieIndicator::value_sweep`]
/// report.
#[derive(Debug, Clone)]
pub struct PieIndicator {
    config: IndicatorConfig,
    shape: Shape,
    direction: Direction,
    radius: Option<f64>,
    style: LayoutStyle,
    state: IndicatorState,
    clock: Option<AnimationClock>,
    measured: Option<(f64, f64)>,
    geometry: Option<Geometry>,
    repaint_requested: bool,
    layout_requested: bool,
}

impl PieIndicator {
    pub fn new(config: IndicatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let shape = Shape::new(config.shape, config.orientation, config.start_angle);
        let mut state = IndicatorState::new(config.min_value, config.max_value)?;
        if let Some(value) = config.initial_value {
            state.jump_to(value, shape.max_angle());
        }

        Ok(Self {
            shape,
            direction: config.direction,
            radius: config.radius,
            style: config.layout_style(),
            state,
            clock: None,
            measured: None,
            geometry: None,
            repaint_requested: true,
            layout_requested: true,
            config,
        })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    /// Last layout snapshot, `None` until the first [`PieIndicator::measure`].
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Resolves both axes, each using the other axis' raw size as fallback,
    /// and recomputes the geometry snapshot.
    pub fn measure(&mut self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> (f64, f64) {
        let width = geometry::calculate_size(width_spec, height_spec.size(), self.radius);
        let height = geometry::calculate_size(height_spec, width_spec.size(), self.radius);

        self.measured = Some((width, height));
        self.layout_requested = false;
        self.relayout();
        (width, height)
    }

    fn relayout(&mut self) {
        if let Some((width, height)) = self.measured {
            let geometry = Geometry::compute(&self.shape, self.direction, width, height, &self.style);
            log::debug!(
                "{} indicator laid out at {}x{}: outer {:.1}, inner {:.1}",
                self.shape.kind(),
                width,
                height,
                geometry.outer_radius,
                geometry.inner_radius
            );
            self.geometry = Some(geometry);
        }
        self.repaint_requested = true;
    }

    // ------------------------------------------------------------------------
    // Value animation
    // ------------------------------------------------------------------------

    pub fn set_value(&mut self, value: f64) {
        self.set_value_at(value, Instant::now());
    }

    /// Starts (or restarts from the current sweep) an animation toward `value`
    /// whose clock begins at `now`.
    pub fn set_value_at(&mut self, value: f64, now: Instant) {
        if !value.is_finite() {
            log::warn!("ignoring non-finite value {}", value);
            return;
        }
        if self.state.is_animating() {
            log::debug!(
                "restarting animation at sweep {:.1} toward {}",
                self.state.current_value(),
                value
            );
        } else {
            log::debug!("animating toward {}", value);
        }

        self.state.begin(value);
        self.clock = Some(AnimationClock::start_at(
            now,
            self.config.animation_duration,
            self.config.easing,
        ));
        self.repaint_requested = true;
    }

    /// Applies one tick at the given elapsed fraction and returns the new
    /// current sweep.
    pub fn tick(&mut self, elapsed_fraction: f64) -> f64 {
        let was_animating = self.state.is_animating();
        let value = self.state.tick(elapsed_fraction, self.shape.max_angle());

        if was_animating {
            self.repaint_requested = true;
            if !self.state.is_animating() {
                log::debug!("animation finished at sweep {:.1}", value);
                self.clock = None;
            }
        }
        value
    }

    /// Ticks using the built-in clock. Returns whether an animation is still
    /// in flight.
    pub fn tick_clock(&mut self, now: Instant) -> bool {
        if let Some(clock) = self.clock {
            self.tick(clock.fraction_at(now));
        }
        self.state.is_animating()
    }

    fn restart_animation(&mut self) {
        let target = self.state.target_value();
        self.set_value(target);
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Signed sweep of the value arc.
    pub fn value_sweep(&self) -> f64 {
        self.direction.signed(self.state.current_value())
    }

    /// Current sweep expressed in the configured value range.
    pub fn display_value(&self) -> f64 {
        self.state.display_value(self.shape.max_angle())
    }

    // ------------------------------------------------------------------------
    // Configuration setters
    // ------------------------------------------------------------------------

    /// Moves a quarter indicator to another corner and restarts the value
    /// animation. Full and half indicators ignore it.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if !self.shape.set_orientation(orientation) {
            log::debug!("orientation ignored by {} indicator", self.shape.kind());
            return;
        }
        self.relayout();
        self.restart_animation();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.relayout();
    }

    /// Guaranteed no-op on quarter indicators, whose start angle comes from
    /// the orientation.
    pub fn set_starting_angle(&mut self, angle: f64) {
        if !angle.is_finite() {
            log::warn!("ignoring non-finite starting angle");
            return;
        }
        if self.shape.set_starting_angle(angle) {
            self.relayout();
        } else {
            log::debug!("starting angle has no effect on quarter indicators");
        }
    }

    pub fn set_range(&mut self, min_value: f64, max_value: f64) -> Result<(), ConfigError> {
        self.state.set_range(min_value, max_value)?;
        self.restart_animation();
        Ok(())
    }

    /// Changes the preferred size. Takes effect on the next measure pass.
    pub fn set_radius(&mut self, radius: Option<f64>) -> Result<(), ConfigError> {
        config::check_radius(radius)?;
        self.radius = radius;
        self.layout_requested = true;
        self.repaint_requested = true;
        Ok(())
    }

    pub fn set_ring_thickness(&mut self, thickness: f64) -> Result<(), ConfigError> {
        config::check_ring_thickness(thickness)?;
        self.style.ring_thickness = thickness;
        self.relayout();
        Ok(())
    }

    pub fn apply_command(&mut self, command: IndicatorCommand) -> Result<(), ConfigError> {
        match command {
            IndicatorCommand::SetValue(value) => self.set_value(value),
            IndicatorCommand::SetOrientation(orientation) => self.set_orientation(orientation),
            IndicatorCommand::SetDirection(direction) => self.set_direction(direction),
            IndicatorCommand::SetStartingAngle(angle) => self.set_starting_angle(angle),
            IndicatorCommand::SetRange(min, max) => self.set_range(min, max)?,
            IndicatorCommand::SetRadius(radius) => self.set_radius(radius)?,
            IndicatorCommand::SetRingThickness(thickness) => self.set_ring_thickness(thickness)?,
        }
        Ok(())
    }

    /// Returns and clears the pending repaint request.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Returns and clears the pending re-measure request.
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }
}

// ============================================================================
// WINDOW HOST
// ============================================================================

impl PieIndicator {
    pub fn show(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<IndicatorCommand>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        &mut self,
        receiver: Option<Receiver<IndicatorCommand>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let font = match (&self.config.font_path, self.config.show_label) {
            (Some(path), true) => match render::load_font(path) {
                Ok(font) => Some(font),
                Err(err) => {
                    log::warn!("label disabled, {}: {}", path.display(), err);
                    None
                }
            },
            _ => None,
        };

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        self.measure(
            MeasureSpec::Exact(fb_width as f64),
            MeasureSpec::Exact(fb_height as f64),
        );
        log::info!("window opened at {}x{}", fb_width, fb_height);

        let frame_duration = std::time::Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        log::info!("window closed");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                            log::warn!("buffer resize failed: {}", err);
                        }
                        if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::warn!("surface resize failed: {}", err);
                        }
                        self.measure(
                            MeasureSpec::Exact(fb_width as f64),
                            MeasureSpec::Exact(fb_height as f64),
                        );
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(command) = receiver.try_recv() {
                                if let Err(err) = self.apply_command(command) {
                                    log::warn!("rejected command: {}", err);
                                }
                            }
                        }
                        if self.take_layout_request() {
                            self.measure(
                                MeasureSpec::Exact(fb_width as f64),
                                MeasureSpec::Exact(fb_height as f64),
                            );
                        }
                        self.tick_clock(Instant::now());

                        if self.take_repaint_request() {
                            let frame = pixels.frame_mut();
                            let mut canvas = render::Canvas::new(frame, fb_width, fb_height);
                            render::render_indicator(&mut canvas, self, font.as_ref());
                        }
                        if let Err(err) = pixels.render() {
                            log::warn!("frame presentation failed: {}", err);
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
