//! Per-call option bags for the drawing primitives.
//!
//! Every field is optional. Unset fields take the default documented on the
//! primitive; unset required fields fail validation.

use bon::Builder;

use crate::color::Color;
use crate::surface::LineCap;

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct ArcOptions {
    /// First value covered by the arc.
    pub start: Option<f64>,
    /// Last value covered by the arc.
    pub stop: Option<f64>,
    /// Radius as a percentage of the face, 0 at the center and 100 at the edge.
    pub radius_percent: Option<f64>,
    /// Stroke width as a percentage of the canvas width.
    pub width_percent: Option<f64>,
    pub color: Option<Color>,
    pub line_cap: Option<LineCap>,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct SweepOptions {
    pub radius_percent: Option<f64>,
    pub width_percent: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct SegmentOptions {
    pub start: Option<f64>,
    pub stop: Option<f64>,
    pub radius_percent: Option<f64>,
    pub width_percent: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct TickOptions {
    pub radius_percent: Option<f64>,
    /// Tick length as a percentage of the canvas width.
    pub length_percent: Option<f64>,
    /// Number of divisions across the sweep; the dial's tick count if unset.
    pub num_ticks: Option<u32>,
    /// Angular thickness of each tick, degrees.
    pub tick_width: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct ScaleOptions {
    pub radius_percent: Option<f64>,
    /// Label size as a percentage of the face radius.
    pub font_size_percent: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct ValueOptions {
    pub value: Option<f64>,
    #[builder(into)]
    pub units: Option<String>,
    pub font_size_percent: Option<f64>,
    pub fg_color: Option<Color>,
    /// Background of the rounded window behind the text; none if unset.
    pub bg_color: Option<Color>,
    /// Place the readout at the dial center instead of inside the sweep gap.
    pub centered: Option<bool>,
}

/// Pointer shapes. Only the classic needle exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerStyle {
    #[default]
    Needle,
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct PointerOptions {
    pub value: Option<f64>,
    pub radius_percent: Option<f64>,
    pub color: Option<Color>,
    pub style: Option<PointerStyle>,
}
