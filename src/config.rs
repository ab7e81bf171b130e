use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;

use crate::animation::Easing;
use crate::error::ConfigError;
use crate::geometry::LayoutStyle;
use crate::shape::{Direction, Orientation, ShapeKind};
use crate::state::check_range;

/// Color representation for indicator elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

pub const DEFAULT_RING_THICKNESS: f64 = 20.0;
pub const DEFAULT_CORRECTION: f64 = 10.0;
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(500);

/// Everything an indicator is configured with at load time.
#[derive(Debug, Clone, Builder)]
pub struct IndicatorConfig {
    #[builder(default = ShapeKind::Quarter)]
    pub shape: ShapeKind,
    /// Only meaningful for quarter shapes.
    #[builder(default = Orientation::NorthWest)]
    pub orientation: Orientation,
    #[builder(default = Direction::Clockwise)]
    pub direction: Direction,
    /// Honored by full and half shapes; quarter shapes use the orientation.
    pub start_angle: Option<f64>,

    /// Preferred size used when the host leaves an axis open.
    pub radius: Option<f64>,
    #[builder(default = 0.0)]
    pub stroke_margin: f64,
    #[builder(default = DEFAULT_RING_THICKNESS)]
    pub ring_thickness: f64,
    #[builder(default = DEFAULT_CORRECTION)]
    pub corner_correction: f64,

    // Values
    #[builder(default = 0.0)]
    pub min_value: f64,
    #[builder(default = 100.0)]
    pub max_value: f64,
    pub initial_value: Option<f64>,

    // Animation
    #[builder(default = DEFAULT_ANIMATION_DURATION)]
    pub animation_duration: Duration,
    #[builder(default)]
    pub easing: Easing,

    // Colors
    #[builder(default = Color::WHITE)]
    pub surface_color: Color,
    #[builder(default = Color::new(0xdd, 0xdd, 0xdd))]
    pub background_color: Color,
    #[builder(default = Color::new(0x00, 0x7f, 0xff))]
    pub main_color: Color,
    #[builder(default = Color::WHITE)]
    pub center_color: Color,
    #[builder(default = Color::BLACK)]
    pub text_color: Color,

    // Window configuration
    #[builder(into, default = "Pie Indicator".to_string())]
    pub title: String,
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Label
    #[builder(default = false)]
    pub show_label: bool,
    #[builder(into)]
    pub font_path: Option<PathBuf>,
    #[builder(default = 32.0)]
    pub label_font_size: f32,
}

fn check_non_negative(
    value: f64,
    field: &'static str,
    err: fn(f64) -> ConfigError,
) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(err(value));
    }
    Ok(())
}

pub(crate) fn check_radius(radius: Option<f64>) -> Result<(), ConfigError> {
    match radius {
        Some(radius) => check_non_negative(radius, "radius", ConfigError::NegativeRadius),
        None => Ok(()),
    }
}

pub(crate) fn check_ring_thickness(thickness: f64) -> Result<(), ConfigError> {
    check_non_negative(thickness, "ring_thickness", ConfigError::NegativeRingThickness)
}

impl IndicatorConfig {
    /// Rejects values that cannot produce a valid layout or animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(self.min_value, self.max_value)?;
        check_radius(self.radius)?;
        check_ring_thickness(self.ring_thickness)?;
        check_non_negative(self.stroke_margin, "stroke_margin", ConfigError::NegativeMargin)?;
        check_non_negative(
            self.corner_correction,
            "corner_correction",
            ConfigError::NegativeCorrection,
        )?;

        if let Some(angle) = self.start_angle {
            if !angle.is_finite() {
                return Err(ConfigError::NonFinite { field: "start_angle" });
            }
        }
        if let Some(value) = self.initial_value {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite {
                    field: "initial_value",
                });
            }
        }
        if !(self.max_framerate.is_finite() && self.max_framerate > 0.0) {
            return Err(ConfigError::InvalidFramerate(self.max_framerate));
        }
        Ok(())
    }

    pub fn layout_style(&self) -> LayoutStyle {
        LayoutStyle {
            stroke_margin: self.stroke_margin,
            ring_thickness: self.ring_thickness,
            corner_correction: self.corner_correction,
        }
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = IndicatorConfig::default();
        assert_eq!(config.shape, ShapeKind::Quarter);
        assert_eq!(config.corner_correction, DEFAULT_CORRECTION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = IndicatorConfig::builder()
            .shape(ShapeKind::Half)
            .radius(120.0)
            .title("Battery")
            .min_value(-20.0)
            .max_value(80.0)
            .build();
        assert_eq!(config.shape, ShapeKind::Half);
        assert_eq!(config.radius, Some(120.0));
        assert_eq!(config.title, "Battery");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_range_rejected() {
        let config = IndicatorConfig::builder().min_value(50.0).max_value(50.0).build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange { min: 50.0, max: 50.0 })
        );
    }

    #[test]
    fn test_negative_sizes_rejected() {
        let config = IndicatorConfig::builder().radius(-1.0).build();
        assert_eq!(config.validate(), Err(ConfigError::NegativeRadius(-1.0)));

        let config = IndicatorConfig::builder().ring_thickness(-4.0).build();
        assert_eq!(config.validate(), Err(ConfigError::NegativeRingThickness(-4.0)));

        let config = IndicatorConfig::builder().corner_correction(-0.5).build();
        assert_eq!(config.validate(), Err(ConfigError::NegativeCorrection(-0.5)));

        let config = IndicatorConfig::builder().stroke_margin(f64::INFINITY).build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "stroke_margin" })
        );
    }

    #[test]
    fn test_framerate_must_be_positive() {
        let config = IndicatorConfig::builder().max_framerate(0.0).build();
        assert_eq!(config.validate(), Err(ConfigError::InvalidFramerate(0.0)));
    }
}
