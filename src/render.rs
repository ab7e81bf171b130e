// ============================================================================
// HOST PAINTER
// ============================================================================
//
// Paints a `Geometry` snapshot into an RGBA frame as three pie slices
// (background, value, hole) plus an optional numeric label.

use std::path::Path;

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::error::RenderError;
use crate::geometry::Rect;
use crate::PieIndicator;

pub fn load_font(path: &Path) -> Result<Font<'static>, RenderError> {
    let data = std::fs::read(path)?;
    Font::try_from_vec(data).ok_or(RenderError::InvalidFont)
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Pie {
        rect: Rect,
        start_angle: f64,
        sweep_angle: f64,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: f32,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Pie {
                    rect,
                    start_angle,
                    sweep_angle,
                    color,
                } => fill_pie(canvas, rect, *start_angle, *sweep_angle, *color),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    color,
                } => {
                    if let Some(font) = font {
                        draw_text(canvas, *x, *y, text, font, Scale::uniform(*font_size), *color);
                    }
                }
            }
        }
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    /// Alpha-blends `color` over the pixel at `(x, y)`. Out-of-bounds writes
    /// are dropped.
    fn blend_pixel(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        if idx + 4 > self.frame.len() {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f32;
            self.frame[idx + channel] = (value * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Builds the draw list for one frame of `indicator`.
pub fn build_scene(indicator: &PieIndicator, with_label: bool) -> Scene {
    let config = indicator.config();
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.surface_color));

    let Some(geometry) = indicator.geometry() else {
        return scene;
    };

    scene.add_command(DrawCommand::Pie {
        rect: geometry.background_rect,
        start_angle: geometry.start_angle,
        sweep_angle: geometry.sweep_angle,
        color: config.background_color,
    });
    scene.add_command(DrawCommand::Pie {
        rect: geometry.main_rect,
        start_angle: geometry.start_angle,
        sweep_angle: indicator.value_sweep(),
        color: config.main_color,
    });
    scene.add_command(DrawCommand::Pie {
        rect: geometry.inner_rect,
        start_angle: geometry.start_angle,
        sweep_angle: geometry.sweep_angle,
        color: config.center_color,
    });

    if with_label {
        let anchor = geometry.inner_rect.center();
        scene.add_command(DrawCommand::Text {
            x: anchor.x.round() as i32,
            y: anchor.y.round() as i32,
            text: format!("{:.0}", indicator.display_value()),
            font_size: config.label_font_size,
            color: config.text_color,
        });
    }

    scene
}

pub fn render_indicator(canvas: &mut Canvas, indicator: &PieIndicator, font: Option<&Font>) {
    let with_label = indicator.config().show_label && font.is_some();
    build_scene(indicator, with_label).render(canvas, font);
}

/// Whether `angle` lies on the arc starting at `start` and turning through
/// `sweep` degrees (negative sweeps turn counterclockwise).
pub(crate) fn in_sweep(angle: f64, start: f64, sweep: f64) -> bool {
    if sweep.abs() >= 360.0 {
        return true;
    }
    if sweep >= 0.0 {
        (angle - start).rem_euclid(360.0) <= sweep
    } else {
        (start - angle).rem_euclid(360.0) <= -sweep
    }
}

/// Fills the pie slice inscribed in `rect`, anti-aliased along the rim.
fn fill_pie(canvas: &mut Canvas, rect: &Rect, start_angle: f64, sweep_angle: f64, color: Color) {
    let radius = rect.width().min(rect.height()) / 2.0;
    if radius <= 0.0 || sweep_angle == 0.0 {
        return;
    }
    let center = rect.center();

    let min_x = rect.left.floor().max(0.0) as usize;
    let min_y = rect.top.floor().max(0.0) as usize;
    let max_x = (rect.right.ceil().max(0.0) as usize).min(canvas.width);
    let max_y = (rect.bottom.ceil().max(0.0) as usize).min(canvas.height);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
            if in_sweep(angle, start_angle, sweep_angle) {
                canvas.blend_pixel(x, y, color, coverage as f32);
            }
        }
    }
}

/// Draws `text` centered on `(x, y)`.
fn draw_text(canvas: &mut Canvas, x: i32, y: i32, text: &str, font: &Font, scale: Scale, color: Color) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;

    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && py >= 0 {
                    canvas.blend_pixel(px as usize, py as usize, color, v);
                }
            });
        }
    }
}
