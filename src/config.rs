//! Dial configuration, its defaults and loading from host attributes.

use std::str::FromStr;

use bon::Builder;

use crate::attributes::AttributeSource;
use crate::color::Color;

/// Fallback drawing values used when an option bag leaves a field unset.
pub mod defaults {
    use crate::color::Color;
    use crate::surface::LineCap;

    pub const CANVAS_WIDTH: u32 = 300;

    pub const ARC_COLOR: Color = Color::WHITE;
    pub const ARC_LINE_CAP: LineCap = LineCap::Butt;

    pub const SCALE_COLOR: Color = Color::WHITE;

    /// Angular thickness of a tick, in degrees.
    pub const TICK_WIDTH: f64 = 1.0;
    pub const SWEEP_TICK_INSET_PERCENT: f64 = 2.0;

    pub const VALUE_COLOR: Color = Color::WHITE;
    pub const VALUE_FONT_SIZE_PERCENT: f64 = 20.0;
    pub const VALUE_FONT_FAMILY: &str = "sans-serif";
    pub const VALUE_PILL_HEIGHT_FACTOR: f64 = 2.2;

    pub const POINTER_COLOR: Color = Color::new(0xff, 0x33, 0x33);
    pub const POINTER_RADIUS_PERCENT: f64 = 90.0;
    pub const POINTER_DOT_COLOR: Color = Color::new(0x11, 0x11, 0x11);
}

/// Mutable configuration of one dial.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DialConfig {
    #[builder(default = 0.0)]
    pub value: f64,
    #[builder(into, default = "".to_string())]
    pub units: String,
    /// Angular span of the full range, degrees in `(0, 360]`.
    #[builder(default = 270.0)]
    pub sweep: f64,
    /// Angle where the sweep starts, degrees clockwise from 3 o'clock.
    #[builder(default = 135.0)]
    pub rotation: f64,
    #[builder(default = 0.0)]
    pub min_value: f64,
    #[builder(default = 0.0)]
    pub max_value: f64,
    /// Default number of ticks across the sweep; 0 disables them.
    #[builder(default = 0)]
    pub tick_count: u32,
    #[builder(into, default = "sans-serif".to_string())]
    pub font_family: String,
    #[builder(default = Color::BLACK)]
    pub background_color: Color,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DialConfig {
    /// Reads every known key from `source`, keeping the default for keys that
    /// are absent, empty or unparsable.
    pub fn from_attributes(source: &impl AttributeSource) -> Self {
        let mut config = Self::default();
        config.apply(&BaseParameters {
            value: parse_attribute(source, "value"),
            units: source.attribute("units").map(str::to_string),
            sweep: parse_attribute(source, "sweep"),
            rotation: parse_attribute(source, "rotation"),
            min_value: parse_attribute(source, "minvalue"),
            max_value: parse_attribute(source, "maxvalue"),
            tick_count: parse_attribute(source, "tickmarks"),
            font_family: source
                .attribute("fontfamily")
                .map(str::trim)
                .filter(|family| !family.is_empty())
                .map(str::to_string),
            background_color: parse_attribute(source, "bgcolor"),
        });
        config
    }

    /// Overwrites every field that is set in `params`. Zero and empty values
    /// are applied like any other.
    pub fn apply(&mut self, params: &BaseParameters) {
        if let Some(value) = params.value {
            self.value = value;
        }
        if let Some(units) = &params.units {
            self.units.clone_from(units);
        }
        if let Some(sweep) = params.sweep {
            self.sweep = sweep;
        }
        if let Some(rotation) = params.rotation {
            self.rotation = rotation;
        }
        if let Some(min_value) = params.min_value {
            self.min_value = min_value;
        }
        if let Some(max_value) = params.max_value {
            self.max_value = max_value;
        }
        if let Some(tick_count) = params.tick_count {
            self.tick_count = tick_count;
        }
        if let Some(font_family) = &params.font_family {
            self.font_family.clone_from(font_family);
        }
        if let Some(color) = params.background_color {
            self.background_color = color;
        }
    }

    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }
}

/// Bulk update for [`DialConfig`]; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct BaseParameters {
    pub value: Option<f64>,
    #[builder(into)]
    pub units: Option<String>,
    pub sweep: Option<f64>,
    pub rotation: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub tick_count: Option<u32>,
    #[builder(into)]
    pub font_family: Option<String>,
    pub background_color: Option<Color>,
}

fn parse_attribute<T: FromStr>(source: &impl AttributeSource, key: &str) -> Option<T> {
    let raw = source.attribute(key)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, raw, "ignoring unparsable dial attribute");
            None
        }
    }
}
