//! A dial bound to one drawing surface.
//!
//! Every `draw_*` primitive validates its options first and only then touches
//! the surface, so a rejected call leaves existing content untouched. The
//! `draw_*` forms log the failure and return `false`; the `try_draw_*` forms
//! hand the [`DialError`] back instead.

use std::f64::consts::TAU;

use crate::attributes::AttributeSource;
use crate::color::Color;
use crate::config::{defaults, BaseParameters, DialConfig};
use crate::error::{DialError, ValidationError};
use crate::geometry::{self, deg_to_rad, Frame};
use crate::options::{
    ArcOptions, PointerOptions, PointerStyle, ScaleOptions, SegmentOptions, SweepOptions,
    TickOptions, ValueOptions,
};
use crate::surface::{FontSpec, LineCap, Surface, TextAlign, TextBaseline, Transformed};
use crate::validate;

/// A validated arc, in pixels and radians.
#[derive(Debug)]
struct ArcStroke {
    radius: f64,
    width: f64,
    start: f64,
    end: f64,
    color: Color,
    line_cap: LineCap,
}

/// Validated ticks: `count + 1` marks, `spacing` units apart.
#[derive(Debug)]
struct TickMarks {
    radius: f64,
    width: f64,
    spacing: f64,
    count: u64,
    /// Angular thickness, degrees.
    tick_width: f64,
    color: Color,
}

/// Number of whole `spacing` steps that fit in `range`.
fn steps(range: f64, spacing: f64) -> u64 {
    (range / spacing).floor() as u64
}

/// A circular gauge face drawn onto a [`Surface`].
#[derive(Debug, Clone)]
pub struct Dial<S: Surface> {
    identifier: String,
    config: DialConfig,
    frame: Frame,
    surface: S,
}

impl<S: Surface> Dial<S> {
    /// Builds a dial on `surface`, reading its configuration from the host
    /// attributes.
    ///
    /// A surface without a width is given the default width, and the height
    /// is always forced to the width.
    pub fn new(
        identifier: &str,
        surface: S,
        attributes: &impl AttributeSource,
    ) -> Result<Self, DialError> {
        Self::with_config(identifier, surface, DialConfig::from_attributes(attributes))
    }

    /// Builds a dial on `surface` with an explicit configuration.
    pub fn with_config(
        identifier: &str,
        mut surface: S,
        config: DialConfig,
    ) -> Result<Self, DialError> {
        if identifier.trim().is_empty() {
            let err = DialError::MissingIdentifier;
            tracing::error!("{err}");
            return Err(err);
        }

        let width = match surface.width() {
            0 => defaults::CANVAS_WIDTH,
            width => width,
        };
        if surface.width() != width || surface.height() != width {
            surface.resize(width, width);
        }

        let frame = Frame::new(width);
        tracing::debug!(dial = identifier, width, ?config, "dial created");
        Ok(Self {
            identifier: identifier.to_string(),
            config,
            frame,
            surface,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn width(&self) -> u32 {
        self.frame.width
    }

    pub fn height(&self) -> u32 {
        self.frame.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.frame.center_x, self.frame.center_y)
    }

    pub fn range(&self) -> f64 {
        self.config.range()
    }

    pub fn radius(&self) -> f64 {
        self.frame.radius()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Applies every field set in `params`. Always succeeds.
    pub fn set_base_parameters(&mut self, params: &BaseParameters) -> bool {
        self.config.apply(params);
        tracing::debug!(dial = %self.identifier, ?params, "base parameters updated");
        true
    }

    /// Whether `value` is present and within the dial range; logs otherwise.
    pub fn check_value(&self, value: Option<f64>, caller: &str) -> bool {
        self.report(self.checked_value(value, caller).map(|_| ()))
    }

    /// Whether `percent` is present and within 1..=100; logs otherwise.
    pub fn check_percent(&self, percent: Option<f64>, caller: &str) -> bool {
        self.report(self.checked_percent(percent, caller).map(|_| ()))
    }

    pub fn draw_background(&mut self) -> bool {
        let result = self.try_draw_background();
        self.report(result)
    }

    pub fn draw_arc(&mut self, options: &ArcOptions) -> bool {
        let result = self.try_draw_arc(options);
        self.report(result)
    }

    pub fn draw_sweep(&mut self, options: &SweepOptions) -> bool {
        let result = self.try_draw_sweep(options);
        self.report(result)
    }

    pub fn draw_segment(&mut self, options: &SegmentOptions) -> bool {
        let result = self.try_draw_segment(options);
        self.report(result)
    }

    pub fn draw_ticks(&mut self, options: &TickOptions) -> bool {
        let result = self.try_draw_ticks(options);
        self.report(result)
    }

    pub fn draw_scale(&mut self, options: &ScaleOptions) -> bool {
        let result = self.try_draw_scale(options);
        self.report(result)
    }

    pub fn draw_value(&mut self, options: &ValueOptions) -> bool {
        let result = self.try_draw_value(options);
        self.report(result)
    }

    pub fn draw_pointer(&mut self, options: &PointerOptions) -> bool {
        let result = self.try_draw_pointer(options);
        self.report(result)
    }

    /// Fills the whole face with the background color.
    pub fn try_draw_background(&mut self) -> Result<(), DialError> {
        let (cx, cy) = self.center();
        let surface = &mut self.surface;
        surface.begin_path();
        surface.arc(cx, cy, cx, 0.0, TAU, false);
        surface.set_fill_color(self.config.background_color);
        surface.fill();
        Ok(())
    }

    /// Strokes an arc between two values of the range.
    ///
    /// `start`, `stop`, `radius_percent` and `width_percent` are required.
    /// Color defaults to white and the line cap to butt.
    pub fn try_draw_arc(&mut self, options: &ArcOptions) -> Result<(), DialError> {
        let arc = self.checked_arc(options)?;
        self.stroke_arc(&arc);
        Ok(())
    }

    /// Strokes the full range with rounded ends, then cuts the dial's default
    /// ticks into it in the background color.
    ///
    /// Arc and ticks are both validated before either is drawn.
    pub fn try_draw_sweep(&mut self, options: &SweepOptions) -> Result<(), DialError> {
        let arc = ArcOptions {
            start: Some(self.config.min_value),
            stop: Some(self.config.max_value),
            radius_percent: options.radius_percent,
            width_percent: options.width_percent,
            color: options.color,
            line_cap: Some(LineCap::Round),
        };
        let arc = self.checked_arc(&arc).inspect_err(|_| {
            tracing::warn!(dial = %self.identifier, "draw_arc called from draw_sweep")
        })?;

        let ticks = if self.config.tick_count > 0 {
            let ticks = TickOptions {
                radius_percent: options
                    .radius_percent
                    .map(|percent| percent - defaults::SWEEP_TICK_INSET_PERCENT),
                length_percent: options.width_percent,
                num_ticks: Some(self.config.tick_count),
                tick_width: Some(defaults::TICK_WIDTH),
                color: Some(self.config.background_color),
            };
            let ticks = self.checked_ticks(&ticks).inspect_err(|_| {
                tracing::warn!(dial = %self.identifier, "draw_ticks called from draw_sweep")
            })?;
            Some(ticks)
        } else {
            None
        };

        self.stroke_arc(&arc);
        if let Some(ticks) = &ticks {
            self.stroke_ticks(ticks);
        }
        Ok(())
    }

    /// Highlights a sub-range with square-cut ends.
    pub fn try_draw_segment(&mut self, options: &SegmentOptions) -> Result<(), DialError> {
        let arc = ArcOptions {
            start: options.start,
            stop: options.stop,
            radius_percent: options.radius_percent,
            width_percent: options.width_percent,
            color: options.color,
            line_cap: Some(LineCap::Butt),
        };
        self.try_draw_arc(&arc).inspect_err(|_| {
            tracing::warn!(dial = %self.identifier, "draw_arc called from draw_segment")
        })
    }

    /// Draws evenly spaced ticks across the whole sweep, one at the minimum
    /// and one every `floor(range / num_ticks)` units after it.
    pub fn try_draw_ticks(&mut self, options: &TickOptions) -> Result<(), DialError> {
        let ticks = self.checked_ticks(options)?;
        self.stroke_ticks(&ticks);
        Ok(())
    }

    /// Writes the numeric labels around the sweep.
    ///
    /// Labels step by `floor(range / tick_count)`; with no tick count the
    /// range is split into tenths, which always steps by 10. The frame is
    /// rotated label by label so each label is laid out horizontally in its
    /// own frame and centred on its tick.
    pub fn try_draw_scale(&mut self, options: &ScaleOptions) -> Result<(), DialError> {
        const OP: &str = "draw_scale";
        let range = self.checked_range(OP)?;
        let radius_percent = self.checked_percent(options.radius_percent, OP)?;
        let font_size_percent = self.checked_percent(options.font_size_percent, OP)?;

        let num_ticks = match self.config.tick_count {
            0 => range / 10.0,
            count => count as f64,
        };
        let spacing = validate::label_spacing(range, num_ticks)
            .map_err(|source| self.fail(OP, source))?;
        let labels = steps(range, spacing);

        let color = options.color.unwrap_or(defaults::SCALE_COLOR);
        let radius = self.frame.radius();
        let font = FontSpec::new(
            (radius * font_size_percent / 100.0).floor(),
            self.config.font_family.as_str(),
        );
        let label_radius = radius_percent / 100.0 * radius;
        let label_rotation = deg_to_rad(spacing / range * self.config.sweep);
        let (cx, cy) = self.center();
        let config = &self.config;

        let mut scoped = Transformed::new(&mut self.surface);
        scoped.set_font(&font);
        scoped.set_fill_color(color);
        scoped.set_text_align(TextAlign::Start);
        scoped.set_text_baseline(TextBaseline::Top);
        scoped.translate(cx, cy);
        scoped.rotate(deg_to_rad(config.rotation + 90.0));

        for i in 0..=labels {
            let text = label(config.min_value + i as f64 * spacing);
            let x = -(scoped.measure_text(&text) / 2.0).floor();
            scoped.fill_text(&text, x, -label_radius);
            scoped.rotate(label_rotation);
        }
        tracing::debug!(
            dial = %self.identifier,
            spacing,
            accumulated = scoped.pending_rotation(),
            "scale"
        );
        Ok(())
    }

    /// Writes the value with its units underneath.
    ///
    /// Value and units fall back to the dial's own. Unless centered, the
    /// readout sits inside the face, across from the middle of the sweep.
    pub fn try_draw_value(&mut self, options: &ValueOptions) -> Result<(), DialError> {
        const OP: &str = "draw_value";
        let value = self.checked_value(options.value.or(Some(self.config.value)), OP)?;
        let font_size_percent = self.checked_percent(
            options
                .font_size_percent
                .or(Some(defaults::VALUE_FONT_SIZE_PERCENT)),
            OP,
        )?;

        let units = options.units.as_deref().unwrap_or(&self.config.units);
        let fg_color = options.fg_color.unwrap_or(defaults::VALUE_COLOR);
        let font_size = (self.frame.radius() * font_size_percent / 100.0).floor();
        let text = label(value);

        let (text_x, text_y) = if options.centered.unwrap_or(false) {
            (0.0, 0.0)
        } else {
            let theta = geometry::readout_angle_deg(&self.config);
            let inset = self.frame.width as f64 / 5.0;
            let (x, y) = Frame::polar(self.frame.radius() - inset, theta);
            (x.floor(), y.floor())
        };
        let (cx, cy) = self.center();

        let mut scoped = Transformed::new(&mut self.surface);
        scoped.set_font(&FontSpec::new(font_size, defaults::VALUE_FONT_FAMILY));
        scoped.translate(cx, cy);
        let text_width = scoped.measure_text(&text).max(scoped.measure_text(units));

        if let Some(bg_color) = options.bg_color {
            scoped.begin_path();
            scoped.set_stroke_color(bg_color);
            scoped.set_line_cap(LineCap::Round);
            scoped.set_line_width(font_size * defaults::VALUE_PILL_HEIGHT_FACTOR);
            scoped.move_to(text_x - text_width / 2.0, -text_y - 1.0);
            scoped.line_to(text_x + text_width / 2.0, -text_y - 1.0);
            scoped.stroke();
        }

        scoped.set_fill_color(fg_color);
        scoped.set_text_align(TextAlign::Center);
        scoped.set_text_baseline(TextBaseline::Middle);
        scoped.fill_text(&text, text_x, -text_y);
        scoped.fill_text(units, text_x, -text_y + font_size);
        Ok(())
    }

    /// Draws the pointer aimed at a value, the dial's own value by default.
    pub fn try_draw_pointer(&mut self, options: &PointerOptions) -> Result<(), DialError> {
        const OP: &str = "draw_pointer";
        self.checked_range(OP)?;
        let value = self.checked_value(options.value.or(Some(self.config.value)), OP)?;
        let radius_percent = self.checked_percent(
            options
                .radius_percent
                .or(Some(defaults::POINTER_RADIUS_PERCENT)),
            OP,
        )?;

        let color = options.color.unwrap_or(defaults::POINTER_COLOR);
        let rotation = geometry::pointer_rotation_deg(&self.config, value);
        let width = self.frame.width as f64;
        let radius = self.frame.radius();
        let (cx, cy) = self.center();
        tracing::trace!(dial = %self.identifier, value, rotation, "pointer");

        let mut scoped = Transformed::new(&mut self.surface);
        scoped.translate(cx, cy);
        scoped.rotate(deg_to_rad(rotation));
        match options.style.unwrap_or_default() {
            PointerStyle::Needle => needle(&mut *scoped, width, radius, radius_percent, color),
        }
        Ok(())
    }

    fn checked_arc(&self, options: &ArcOptions) -> Result<ArcStroke, DialError> {
        const OP: &str = "draw_arc";
        self.checked_range(OP)?;
        let start = self.checked_value(options.start, OP)?;
        let stop = self.checked_value(options.stop, OP)?;
        let radius_percent = self.checked_percent(options.radius_percent, OP)?;
        let width_percent = self.checked_percent(options.width_percent, OP)?;

        let width = self.frame.absolute_width(width_percent);
        let arc = ArcStroke {
            radius: self.checked_radius(radius_percent, width, OP)?,
            width,
            start: geometry::value_angle(&self.config, start),
            end: geometry::value_angle(&self.config, stop),
            color: options.color.unwrap_or(defaults::ARC_COLOR),
            line_cap: options.line_cap.unwrap_or(defaults::ARC_LINE_CAP),
        };
        tracing::trace!(dial = %self.identifier, ?arc, "arc");
        Ok(arc)
    }

    fn checked_ticks(&self, options: &TickOptions) -> Result<TickMarks, DialError> {
        const OP: &str = "draw_ticks";
        let range = self.checked_range(OP)?;
        let radius_percent = self.checked_percent(options.radius_percent, OP)?;
        let length_percent = self.checked_percent(options.length_percent, OP)?;

        let num_ticks = options.num_ticks.unwrap_or(self.config.tick_count);
        if num_ticks == 0 {
            return Err(self.fail(OP, ValidationError::NoTicks));
        }
        let width = self.frame.absolute_width(length_percent);
        let radius = self.checked_radius(radius_percent, width, OP)?;
        let spacing = validate::tick_spacing(range, num_ticks as f64)
            .map_err(|source| self.fail(OP, source))?;
        let ticks = TickMarks {
            radius,
            width,
            spacing,
            count: steps(range, spacing),
            tick_width: options.tick_width.unwrap_or(defaults::TICK_WIDTH),
            color: options.color.unwrap_or(self.config.background_color),
        };
        tracing::debug!(dial = %self.identifier, num_ticks, ?ticks, "ticks");
        Ok(ticks)
    }

    fn stroke_arc(&mut self, arc: &ArcStroke) {
        let (cx, cy) = self.center();
        let surface = &mut self.surface;
        surface.begin_path();
        surface.arc(cx, cy, arc.radius, arc.start, arc.end, false);
        surface.set_stroke_color(arc.color);
        surface.set_line_width(arc.width);
        surface.set_line_cap(arc.line_cap);
        surface.stroke();
    }

    fn stroke_ticks(&mut self, ticks: &TickMarks) {
        let (cx, cy) = self.center();
        let config = &self.config;
        let surface = &mut self.surface;
        surface.set_stroke_color(ticks.color);
        surface.set_line_width(ticks.width);
        surface.set_line_cap(LineCap::Butt);

        for i in 0..=ticks.count {
            let start = geometry::offset_angle_deg(config, i as f64 * ticks.spacing);
            surface.begin_path();
            surface.arc(
                cx,
                cy,
                ticks.radius,
                deg_to_rad(start),
                deg_to_rad(start + ticks.tick_width),
                false,
            );
            surface.stroke();
        }
    }

    fn fail(&self, op: &str, source: ValidationError) -> DialError {
        DialError::Validation {
            dial: self.identifier.clone(),
            op: op.to_string(),
            source,
        }
    }

    fn checked_value(&self, value: Option<f64>, op: &str) -> Result<f64, DialError> {
        validate::value(value, self.config.min_value, self.config.max_value)
            .map_err(|source| self.fail(op, source))
    }

    fn checked_percent(&self, percent: Option<f64>, op: &str) -> Result<f64, DialError> {
        validate::percent(percent).map_err(|source| self.fail(op, source))
    }

    fn checked_radius(
        &self,
        radius_percent: f64,
        abs_width: f64,
        op: &str,
    ) -> Result<f64, DialError> {
        validate::radius(self.frame.absolute_radius(radius_percent, abs_width))
            .map_err(|source| self.fail(op, source))
    }

    fn checked_range(&self, op: &str) -> Result<f64, DialError> {
        let range = self.config.range();
        if range > 0.0 {
            Ok(range)
        } else {
            tracing::debug!(dial = %self.identifier, op, range, "empty dial range");
            Err(DialError::InvalidRange {
                min: self.config.min_value,
                max: self.config.max_value,
            })
        }
    }

    fn report(&self, result: Result<(), DialError>) -> bool {
        match result {
            Ok(()) => true,
            Err(DialError::Validation { op, source, .. }) => {
                tracing::error!(
                    dial = %self.identifier,
                    op = %op,
                    reason = ?source,
                    "ERROR in {op} for {}: {source}",
                    self.identifier
                );
                false
            }
            Err(err) => {
                tracing::error!(dial = %self.identifier, "{err}");
                false
            }
        }
    }
}

/// Classic needle, drawn pointing up from the origin: a triangular tip, a
/// short rounded tail, a pivot boss and a dark center dot.
fn needle<S: Surface + ?Sized>(
    surface: &mut S,
    width: f64,
    radius: f64,
    radius_percent: f64,
    color: Color,
) {
    surface.begin_path();
    surface.set_fill_color(color);
    surface.set_stroke_color(color);
    surface.move_to(-width / 40.0, 0.0);
    surface.line_to(0.0, -width / 2.0 * radius_percent / 100.0);
    surface.line_to(width / 40.0, 0.0);
    surface.close_path();
    surface.fill();

    surface.begin_path();
    surface.move_to(0.0, 0.0);
    surface.set_line_width(radius / 10.0);
    surface.set_line_cap(LineCap::Round);
    surface.line_to(0.0, width / 15.0);
    surface.stroke();

    surface.begin_path();
    surface.arc(0.0, 0.0, radius / 10.0, 0.0, TAU, false);
    surface.fill();

    surface.begin_path();
    surface.set_fill_color(defaults::POINTER_DOT_COLOR);
    surface.arc(0.0, 0.0, radius / 40.0, 0.0, TAU, false);
    surface.fill();
}

/// Formats a number the way scale labels and readouts show it: integral
/// values without a fractional part.
pub fn label(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{DataSet, NoAttributes};
    use crate::recording::{DrawCommand, RecordingSurface};

    fn speedo() -> Dial<RecordingSurface> {
        let config = DialConfig::builder()
            .min_value(0.0)
            .max_value(100.0)
            .sweep(270.0)
            .rotation(135.0)
            .build();
        Dial::with_config("speedo", RecordingSurface::new(300, 300), config).unwrap()
    }

    fn arcs(dial: &Dial<RecordingSurface>) -> Vec<(f64, f64, f64)> {
        dial.surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc {
                    radius, start, end, ..
                } => Some((*radius, *start, *end)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn missing_identifier_fails() {
        let result = Dial::new("", RecordingSurface::new(300, 300), &NoAttributes);
        assert_eq!(result.unwrap_err(), DialError::MissingIdentifier);
    }

    #[test]
    fn zero_width_defaults_and_height_follows_width() {
        let dial = Dial::new("d", RecordingSurface::new(0, 0), &NoAttributes).unwrap();
        assert_eq!((dial.width(), dial.height()), (300, 300));
        assert_eq!(dial.surface().height(), 300);

        let dial = Dial::new("d", RecordingSurface::new(200, 120), &NoAttributes).unwrap();
        assert_eq!((dial.width(), dial.height()), (200, 200));
        assert_eq!(dial.center(), (100.0, 100.0));
        assert_eq!(dial.radius(), 100.0);
        assert_eq!(
            dial.surface().commands(),
            &[DrawCommand::Resize {
                width: 200,
                height: 200
            }]
        );
    }

    #[test]
    fn reads_attributes_at_construction() {
        let attrs = DataSet::from_pairs(["maxvalue=160", "units=km/h", "tickmarks=8"]);
        let dial = Dial::new("d", RecordingSurface::new(300, 300), &attrs).unwrap();
        assert_eq!(dial.config().max_value, 160.0);
        assert_eq!(dial.config().units, "km/h");
        assert_eq!(dial.config().tick_count, 8);
        assert_eq!(dial.range(), 160.0);
    }

    #[test]
    fn check_helpers() {
        let dial = speedo();
        assert!(dial.check_value(Some(0.0), "test"));
        assert!(dial.check_value(Some(100.0), "test"));
        assert!(!dial.check_value(Some(-1.0), "test"));
        assert!(!dial.check_value(Some(101.0), "test"));
        assert!(!dial.check_value(None, "test"));
        assert!(!dial.check_percent(Some(0.0), "test"));
        assert!(dial.check_percent(Some(1.0), "test"));
        assert!(dial.check_percent(Some(100.0), "test"));
        assert!(!dial.check_percent(Some(101.0), "test"));
        assert!(!dial.check_percent(None, "test"));
    }

    #[test]
    fn background_fills_face() {
        let mut dial = speedo();
        assert!(dial.draw_background());
        assert_eq!(
            dial.surface().commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::Arc {
                    cx: 150.0,
                    cy: 150.0,
                    radius: 150.0,
                    start: 0.0,
                    end: TAU,
                    anticlockwise: false
                },
                DrawCommand::FillColor(Color::BLACK),
                DrawCommand::Fill,
            ]
        );
    }

    #[test]
    fn arc_geometry_and_defaults() {
        let mut dial = speedo();
        let ok = dial.draw_arc(
            &ArcOptions::builder()
                .start(0.0)
                .stop(50.0)
                .radius_percent(90.0)
                .width_percent(10.0)
                .build(),
        );
        assert!(ok);
        let [(radius, start, end)] = arcs(&dial)[..] else {
            panic!("expected one arc");
        };
        assert_eq!(radius, 120.0);
        assert!((start - deg_to_rad(135.0)).abs() < 1e-12);
        assert!((end - deg_to_rad(270.0)).abs() < 1e-12);
        let state = dial.surface().state();
        assert_eq!(state.stroke, Color::WHITE);
        assert_eq!(state.line_width, 30.0);
        assert_eq!(state.line_cap, LineCap::Butt);
    }

    #[test]
    fn arc_rejects_before_drawing() {
        let mut dial = speedo();
        let bad = [
            ArcOptions::builder()
                .stop(50.0)
                .radius_percent(90.0)
                .width_percent(10.0)
                .build(),
            ArcOptions::builder()
                .start(0.0)
                .stop(150.0)
                .radius_percent(90.0)
                .width_percent(10.0)
                .build(),
            ArcOptions::builder()
                .start(0.0)
                .stop(50.0)
                .radius_percent(0.0)
                .width_percent(10.0)
                .build(),
            ArcOptions::builder()
                .start(0.0)
                .stop(50.0)
                .radius_percent(90.0)
                .build(),
        ];
        for options in &bad {
            assert!(!dial.draw_arc(options), "{options:?}");
        }
        assert!(dial.surface().commands().is_empty());
    }

    #[test]
    fn arc_reports_failure_kind() {
        let mut dial = speedo();
        let err = dial
            .try_draw_arc(
                &ArcOptions::builder()
                    .start(-5.0)
                    .stop(50.0)
                    .radius_percent(90.0)
                    .width_percent(10.0)
                    .build(),
            )
            .unwrap_err();
        assert_eq!(
            err.validation(),
            Some(&ValidationError::ValueOutOfRange {
                value: -5.0,
                min: 0.0,
                max: 100.0
            })
        );
        assert_eq!(
            err.to_string(),
            "ERROR in draw_arc for speedo: Given value -5 is not within the range of the dial 0 - 100"
        );
    }

    #[test]
    fn arc_rejects_negative_inset_radius() {
        let mut dial = speedo();
        let err = dial
            .try_draw_arc(
                &ArcOptions::builder()
                    .start(0.0)
                    .stop(50.0)
                    .radius_percent(1.0)
                    .width_percent(100.0)
                    .build(),
            )
            .unwrap_err();
        assert_eq!(
            err.validation(),
            Some(&ValidationError::NegativeRadius { radius: -149.0 })
        );
    }

    #[test]
    fn empty_range_is_rejected() {
        let mut dial = Dial::new("d", RecordingSurface::new(300, 300), &NoAttributes).unwrap();
        let err = dial
            .try_draw_pointer(&PointerOptions::default())
            .unwrap_err();
        assert_eq!(err, DialError::InvalidRange { min: 0.0, max: 0.0 });
        assert!(dial.draw_background());
    }

    #[test]
    fn sweep_uses_round_caps_and_cuts_ticks() {
        let mut dial = speedo();
        dial.set_base_parameters(&BaseParameters::builder().tick_count(10).build());
        let ok = dial.draw_sweep(
            &SweepOptions::builder()
                .radius_percent(90.0)
                .width_percent(5.0)
                .color(Color::new(0x33, 0x99, 0xff))
                .build(),
        );
        assert!(ok);
        let arcs = arcs(&dial);
        assert_eq!(arcs.len(), 1 + 11);
        assert!(dial
            .surface()
            .commands()
            .contains(&DrawCommand::LineCap(LineCap::Round)));
        // ticks sit 2% further in, in the background color
        let tick_radius = (150.0_f64 * 88.0 / 100.0 - 15.0 / 2.0).floor();
        assert!(arcs[1..].iter().all(|(r, _, _)| *r == tick_radius));
        assert_eq!(dial.surface().state().stroke, Color::BLACK);
    }

    #[test]
    fn sweep_without_ticks_draws_one_arc() {
        let mut dial = speedo();
        assert!(dial.draw_sweep(
            &SweepOptions::builder()
                .radius_percent(90.0)
                .width_percent(5.0)
                .build()
        ));
        assert_eq!(arcs(&dial).len(), 1);
    }

    #[test]
    fn sweep_propagates_arc_failure() {
        let mut dial = speedo();
        assert!(!dial.draw_sweep(&SweepOptions::builder().radius_percent(90.0).build()));
        assert!(dial.surface().commands().is_empty());
    }

    #[test]
    fn segment_forces_butt_caps() {
        let mut dial = speedo();
        let ok = dial.draw_segment(
            &SegmentOptions::builder()
                .start(80.0)
                .stop(100.0)
                .radius_percent(90.0)
                .width_percent(5.0)
                .color(Color::new(0xff, 0, 0))
                .build(),
        );
        assert!(ok);
        assert_eq!(dial.surface().state().line_cap, LineCap::Butt);
        assert_eq!(dial.surface().state().stroke, Color::new(0xff, 0, 0));
        assert!(!dial.draw_segment(&SegmentOptions::default()));
    }

    #[test]
    fn ticks_step_by_floored_spacing() {
        let mut dial = speedo();
        let ok = dial.draw_ticks(
            &TickOptions::builder()
                .radius_percent(90.0)
                .length_percent(5.0)
                .num_ticks(10)
                .build(),
        );
        assert!(ok);
        let arcs = arcs(&dial);
        assert_eq!(arcs.len(), 11);
        for (i, (_, start, end)) in arcs.iter().enumerate() {
            let expected = 135.0 + i as f64 * 27.0;
            assert!((start - deg_to_rad(expected)).abs() < 1e-9);
            assert!((end - deg_to_rad(expected + 1.0)).abs() < 1e-9);
        }
        assert_eq!(dial.surface().count(|c| *c == DrawCommand::Stroke), 11);
    }

    #[test]
    fn ticks_reject_degenerate_spacing() {
        let mut dial = speedo();
        for num_ticks in [100, 101, 1000] {
            let err = dial
                .try_draw_ticks(
                    &TickOptions::builder()
                        .radius_percent(90.0)
                        .length_percent(5.0)
                        .num_ticks(num_ticks)
                        .build(),
                )
                .unwrap_err();
            assert!(matches!(
                err.validation(),
                Some(ValidationError::DegenerateTickSpacing { .. })
            ));
        }
        assert!(dial.surface().commands().is_empty());
    }

    #[test]
    fn ticks_need_a_count() {
        let mut dial = speedo();
        let err = dial
            .try_draw_ticks(
                &TickOptions::builder()
                    .radius_percent(90.0)
                    .length_percent(5.0)
                    .build(),
            )
            .unwrap_err();
        assert_eq!(err.validation(), Some(&ValidationError::NoTicks));
    }

    #[test]
    fn scale_labels_every_tenth_without_tick_count() {
        let mut dial = speedo();
        let ok = dial.draw_scale(
            &ScaleOptions::builder()
                .radius_percent(70.0)
                .font_size_percent(10.0)
                .build(),
        );
        assert!(ok);
        let labels: Vec<&str> = dial
            .surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            ["0", "10", "20", "30", "40", "50", "60", "70", "80", "90", "100"]
        );
        assert_eq!(
            dial.surface().state().font,
            FontSpec::new(15.0, "sans-serif")
        );
        assert!(dial.surface().is_identity());
    }

    #[test]
    fn scale_centres_each_label() {
        let mut dial = speedo();
        dial.set_base_parameters(&BaseParameters::builder().tick_count(4).build());
        assert!(dial.draw_scale(
            &ScaleOptions::builder()
                .radius_percent(70.0)
                .font_size_percent(10.0)
                .build()
        ));
        let texts: Vec<(String, f64, f64)> = dial
            .surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect();
        // 15px font, 0.6 * 15 = 9px per character
        assert_eq!(texts[0], ("0".to_string(), -4.0, -105.0));
        assert_eq!(texts[4], ("100".to_string(), -13.0, -105.0));
        assert_eq!(texts.len(), 5);
    }

    #[test]
    fn scale_with_small_range_and_no_ticks_labels_minimum_only() {
        let config = DialConfig::builder().min_value(0.0).max_value(5.0).build();
        let mut dial = Dial::with_config("tiny", RecordingSurface::new(300, 300), config).unwrap();
        assert!(dial.draw_scale(
            &ScaleOptions::builder()
                .radius_percent(70.0)
                .font_size_percent(10.0)
                .build()
        ));
        let labels = dial
            .surface()
            .count(|c| matches!(c, DrawCommand::FillText { .. }));
        assert_eq!(labels, 1);
    }

    #[test]
    fn scale_labels_every_unit_when_ticks_match_range() {
        let config = DialConfig::builder()
            .min_value(0.0)
            .max_value(10.0)
            .tick_count(10)
            .build();
        let mut dial = Dial::with_config("unit", RecordingSurface::new(300, 300), config).unwrap();
        assert!(dial.draw_scale(
            &ScaleOptions::builder()
                .radius_percent(80.0)
                .font_size_percent(10.0)
                .build()
        ));
        let labels: Vec<&str> = dial
            .surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels.last(), Some(&"10"));
    }

    #[test]
    fn steps_terminate_far_from_zero() {
        // at 1e17 adding a spacing of 4 rounds back to the same value
        let config = DialConfig::builder()
            .min_value(1e17)
            .max_value(1e17 + 160.0)
            .tick_count(40)
            .build();
        let mut dial = Dial::with_config("far", RecordingSurface::new(300, 300), config).unwrap();
        assert!(dial.draw_scale(
            &ScaleOptions::builder()
                .radius_percent(80.0)
                .font_size_percent(10.0)
                .build()
        ));
        let labels = dial
            .surface()
            .count(|c| matches!(c, DrawCommand::FillText { .. }));
        assert_eq!(labels, 41);

        dial.surface_mut().clear();
        assert!(dial.draw_ticks(
            &TickOptions::builder()
                .radius_percent(90.0)
                .length_percent(5.0)
                .build()
        ));
        assert_eq!(arcs(&dial).len(), 41);
    }

    #[test]
    fn sweep_validates_ticks_before_drawing() {
        let config = DialConfig::builder()
            .min_value(0.0)
            .max_value(5.0)
            .tick_count(10)
            .build();
        let mut dial = Dial::with_config("tight", RecordingSurface::new(300, 300), config).unwrap();
        let err = dial
            .try_draw_sweep(
                &SweepOptions::builder()
                    .radius_percent(90.0)
                    .width_percent(5.0)
                    .build(),
            )
            .unwrap_err();
        assert!(matches!(
            err.validation(),
            Some(ValidationError::DegenerateTickSpacing { .. })
        ));
        assert!(dial.surface().commands().is_empty());
    }

    #[test]
    fn value_readout_placement() {
        let mut dial = speedo();
        dial.set_base_parameters(
            &BaseParameters::builder()
                .value(42.0)
                .units("km/h")
                .build(),
        );
        assert!(dial.draw_value(&ValueOptions::default()));
        let texts: Vec<(String, f64, f64)> = dial
            .surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect();
        // readout angle 270°, radius 150 - 60 = 90: (0, -90) flipped to (0, 90)
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "42");
        assert_eq!(texts[1].0, "km/h");
        assert!(texts[0].1.abs() <= 1.0);
        assert_eq!(texts[0].2, 90.0);
        assert_eq!(texts[1].2, 90.0 + 30.0);
        assert!(dial.surface().is_identity());
    }

    #[test]
    fn value_centered_with_pill() {
        let mut dial = speedo();
        let ok = dial.draw_value(
            &ValueOptions::builder()
                .value(7.5)
                .units("bar")
                .centered(true)
                .bg_color(Color::new(0x22, 0x22, 0x22))
                .build(),
        );
        assert!(ok);
        let commands = dial.surface().commands();
        // 30px font, both strings measure 54px
        assert!(commands.contains(&DrawCommand::MoveTo { x: -27.0, y: -1.0 }));
        assert!(commands.contains(&DrawCommand::LineTo { x: 27.0, y: -1.0 }));
        assert!(commands.contains(&DrawCommand::LineWidth(66.0)));
        assert!(commands.contains(&DrawCommand::FillText {
            text: "7.5".to_string(),
            x: 0.0,
            y: 0.0
        }));
    }

    #[test]
    fn value_out_of_range_draws_nothing() {
        let mut dial = speedo();
        assert!(!dial.draw_value(&ValueOptions::builder().value(120.0).build()));
        assert!(dial.surface().commands().is_empty());
    }

    #[test]
    fn pointer_rotation_at_midpoint() {
        let mut dial = speedo();
        assert!(dial.draw_pointer(&PointerOptions::builder().value(50.0).build()));
        let first_rotation = dial.surface().commands().iter().find_map(|c| match c {
            DrawCommand::Rotate { radians } => Some(*radians),
            _ => None,
        });
        assert_eq!(first_rotation, Some(deg_to_rad(360.0)));
        assert!(dial.surface().is_identity());
        assert!(dial
            .surface()
            .commands()
            .contains(&DrawCommand::LineTo { x: 0.0, y: -135.0 }));
        assert!(dial
            .surface()
            .commands()
            .contains(&DrawCommand::FillColor(defaults::POINTER_DOT_COLOR)));
    }

    #[test]
    fn pointer_defaults_to_dial_value() {
        let mut dial = speedo();
        dial.set_base_parameters(&BaseParameters::builder().value(0.0).build());
        assert!(dial.draw_pointer(&PointerOptions::default()));
        let rotation = dial.surface().commands().iter().find_map(|c| match c {
            DrawCommand::Rotate { radians } => Some(*radians),
            _ => None,
        });
        assert_eq!(rotation, Some(deg_to_rad(225.0)));
        assert!(!dial.draw_pointer(&PointerOptions::builder().radius_percent(0.0).build()));
    }

    #[test]
    fn labels_print_like_numbers() {
        assert_eq!(label(50.0), "50");
        assert_eq!(label(-0.0), "0");
        assert_eq!(label(2.5), "2.5");
        assert_eq!(label(-20.0), "-20");
    }
}
