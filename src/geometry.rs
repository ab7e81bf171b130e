//! Layout math for the indicator family.
//!
//! Everything here is a pure function of sizes, style values and the shape;
//! the resulting [`Geometry`] snapshot is what a painter consumes.

use crate::shape::{Direction, Orientation, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Square of half-width `radius` centered on `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            right: center.x + radius,
            bottom: center.y + radius,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// One axis of the host's sizing negotiation.
///
/// The payload is the raw size the host passed for this axis; for
/// `Unconstrained` it is only a hint and may be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    Exact(f64),
    AtMost(f64),
    Unconstrained(f64),
}

impl MeasureSpec {
    pub fn size(&self) -> f64 {
        match *self {
            MeasureSpec::Exact(size)
            | MeasureSpec::AtMost(size)
            | MeasureSpec::Unconstrained(size) => size,
        }
    }
}

/// Resolves one axis. `cross_axis` is the other axis' raw size, used as the
/// fallback when this axis carries no usable size.
pub fn calculate_size(spec: MeasureSpec, cross_axis: f64, configured_radius: Option<f64>) -> f64 {
    let fallback = |size: f64| if size > 0.0 { size } else { cross_axis };

    match spec {
        MeasureSpec::Exact(size) => size,
        MeasureSpec::AtMost(size) => match configured_radius {
            Some(radius) => radius.min(size),
            None => fallback(size),
        },
        MeasureSpec::Unconstrained(size) => configured_radius.unwrap_or_else(|| fallback(size)),
    }
}

/// Outer and inner radius for a `width` x `height` box.
///
/// Both are floored at zero so a degenerate box yields an empty ring rather
/// than a negative one.
pub fn calculate_radius(width: f64, height: f64, stroke_margin: f64, ring_thickness: f64) -> (f64, f64) {
    let outer = (width.min(height) / 2.0 - stroke_margin).max(0.0);
    let inner = (outer - ring_thickness).max(0.0);
    (outer, inner)
}

/// Geometric center for full and half shapes. Quarter shapes are moved by
/// half the outer radius on each axis so the wedge lands in its corner.
pub fn calculate_center(shape: &Shape, width: f64, height: f64, outer_radius: f64) -> Point {
    let (half_w, half_h) = (width / 2.0, height / 2.0);

    match shape {
        Shape::Full { .. } | Shape::Half { .. } => Point::new(half_w, half_h),
        Shape::Quarter { orientation } => {
            let half_r = outer_radius / 2.0;
            let (sx, sy) = orientation.offset_signs();
            Point::new(half_w + sx * half_r, half_h + sy * half_r)
        }
    }
}

/// Nudges the hole center toward the centroid of the visible quarter wedge.
pub fn corrected_center(center: Point, orientation: Orientation, offset: f64) -> Point {
    let (sx, sy) = orientation.offset_signs();
    Point::new(center.x + sx * offset, center.y + sy * offset)
}

/// Style values that feed the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStyle {
    pub stroke_margin: f64,
    pub ring_thickness: f64,
    pub corner_correction: f64,
}

/// Frozen layout snapshot handed to the painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub background_rect: Rect,
    pub main_rect: Rect,
    pub inner_rect: Rect,
    pub start_angle: f64,
    /// Full angular extent of the shape, signed by direction.
    pub sweep_angle: f64,
}

impl Geometry {
    pub fn compute(
        shape: &Shape,
        direction: Direction,
        width: f64,
        height: f64,
        style: &LayoutStyle,
    ) -> Self {
        let (outer_radius, inner_radius) =
            calculate_radius(width, height, style.stroke_margin, style.ring_thickness);
        let center = calculate_center(shape, width, height, outer_radius);

        let hole_center = match shape.orientation() {
            Some(orientation) => corrected_center(center, orientation, style.corner_correction),
            None => center,
        };

        let angles = shape.resolve_angles(direction);

        Self {
            width,
            height,
            center,
            outer_radius,
            inner_radius,
            background_rect: Rect::around(center, outer_radius),
            main_rect: Rect::around(center, outer_radius),
            inner_rect: Rect::around(hole_center, inner_radius),
            start_angle: angles.start,
            sweep_angle: angles.extent,
        }
    }
}
