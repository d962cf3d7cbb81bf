//! Mapping from gauge space (values, percentages) to drawing space (angles,
//! pixels).
//!
//! Angles follow the canvas convention: 0° points right (3 o'clock) and
//! positive angles turn clockwise because the y axis points down.

use std::f64::consts::PI;

use crate::config::DialConfig;

/// Fixed drawing frame of a dial. The face is always a circle, so the frame is
/// square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub center_x: f64,
    pub center_y: f64,
}

impl Frame {
    pub fn new(width: u32) -> Self {
        let center = (width / 2) as f64;
        Self {
            width,
            height: width,
            center_x: center,
            center_y: center,
        }
    }

    /// Radius of the face, half the canvas width.
    pub fn radius(&self) -> f64 {
        self.width as f64 / 2.0
    }

    /// Stroke width in pixels for a percentage of the canvas width.
    pub fn absolute_width(&self, width_percent: f64) -> f64 {
        (self.width as f64 * width_percent / 100.0).floor()
    }

    /// Radius in pixels for a percentage of the face, pulled in by half the
    /// stroke width so the stroke is centered on the nominal radius.
    pub fn absolute_radius(&self, radius_percent: f64, absolute_width: f64) -> f64 {
        (self.center_x * radius_percent / 100.0 - absolute_width / 2.0).floor()
    }

    /// Point at `radius` along `angle_deg`, with y pointing up (math orientation).
    pub fn polar(radius: f64, angle_deg: f64) -> (f64, f64) {
        let theta = deg_to_rad(angle_deg);
        (radius * theta.cos(), radius * theta.sin())
    }
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Position of `value` along the sweep, in degrees, before the rotation offset.
pub fn sweep_offset_deg(config: &DialConfig, value: f64) -> f64 {
    (value - config.min_value) / config.range() * config.sweep
}

/// Angle in degrees of a point `offset` units past the dial minimum.
pub fn offset_angle_deg(config: &DialConfig, offset: f64) -> f64 {
    offset / config.range() * config.sweep + config.rotation
}

/// Angle in degrees where `value` sits on the dial.
pub fn value_angle_deg(config: &DialConfig, value: f64) -> f64 {
    sweep_offset_deg(config, value) + config.rotation
}

/// Angle in radians where `value` sits on the dial.
pub fn value_angle(config: &DialConfig, value: f64) -> f64 {
    deg_to_rad(value_angle_deg(config, value))
}

/// Rotation of the pointer in degrees. The pointer is drawn pointing up, so a
/// quarter turn lines it up with angle 0 pointing right.
pub fn pointer_rotation_deg(config: &DialConfig, value: f64) -> f64 {
    config.rotation + 90.0 + sweep_offset_deg(config, value)
}

/// Spacing between ticks for `num_ticks` divisions of the range. Zero means
/// the range cannot be divided that finely.
pub fn tick_spacing(range: f64, num_ticks: f64) -> f64 {
    (range / num_ticks).floor()
}

/// Angle in degrees at which the value readout is placed: roughly opposite
/// the middle of the sweep.
pub fn readout_angle_deg(config: &DialConfig) -> f64 {
    360.0 - (config.rotation - (360.0 - config.sweep) / 2.0)
}

/// Normalises an angle to `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// 2D affine transform in canvas order: `x' = a·x + c·y + e`,
/// `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Applies a translation in the current (already transformed) space.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a * tx + self.c * ty;
        self.f += self.b * tx + self.d * ty;
    }

    /// Applies a clockwise rotation in the current space.
    pub fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let Affine { a, b, c, d, .. } = *self;
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Uniform scale factor, used to size strokes and text.
    pub fn scale(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }

    pub fn approx_eq(&self, other: &Affine, eps: f64) -> bool {
        [
            (self.a, other.a),
            (self.b, other.b),
            (self.c, other.c),
            (self.d, other.d),
            (self.e, other.e),
            (self.f, other.f),
        ]
        .iter()
        .all(|(x, y)| (x - y).abs() <= eps)
    }
}
