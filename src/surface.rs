//! The drawing surface a dial paints on.
//!
//! [`Surface`] mirrors a 2D canvas context: stateful path construction,
//! fill/stroke styles, text and an implicit current transform. Dials only
//! ever move the transform through [`Transformed`], which puts it back when
//! dropped.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl FromStr for LineCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            "square" => Ok(LineCap::Square),
            other => Err(format!("unknown line cap {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Left,
    Center,
    Right,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// A font request: pixel size plus family name.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size: f64,
    pub family: String,
}

impl FontSpec {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(10.0, "sans-serif")
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Style state carried by a surface between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintState {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub font: FontSpec,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            font: FontSpec::default(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

/// A stateful 2D drawing context.
///
/// Angles are radians, clockwise from the positive x axis, y pointing down.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Resizes the drawing area; existing content may be discarded.
    fn resize(&mut self, width: u32, height: u32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);

    fn set_font(&mut self, font: &FontSpec);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Advance width of `text` in the current font, in pixels.
    fn measure_text(&self, text: &str) -> f64;

    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Translate(f64, f64),
    Rotate(f64),
}

/// Scoped transform: every translate/rotate issued through the guard is
/// undone, in reverse order, when the guard is dropped.
pub struct Transformed<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    steps: Vec<Step>,
}

impl<'a, S: Surface + ?Sized> Transformed<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            steps: Vec::new(),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.surface.translate(dx, dy);
        self.steps.push(Step::Translate(dx, dy));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.surface.rotate(radians);
        // consecutive rotations undo as one
        if let Some(Step::Rotate(total)) = self.steps.last_mut() {
            *total += radians;
        } else {
            self.steps.push(Step::Rotate(radians));
        }
    }

    /// Total rotation applied through this guard since the last translate.
    pub fn pending_rotation(&self) -> f64 {
        match self.steps.last() {
            Some(Step::Rotate(total)) => *total,
            _ => 0.0,
        }
    }
}

impl<S: Surface + ?Sized> Deref for Transformed<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Transformed<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Transformed<'_, S> {
    fn drop(&mut self) {
        while let Some(step) = self.steps.pop() {
            match step {
                Step::Translate(dx, dy) => self.surface.translate(-dx, -dy),
                Step::Rotate(radians) => self.surface.rotate(-radians),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};

    #[test]
    fn guard_restores_in_reverse_order() {
        let mut surface = RecordingSurface::new(100, 100);
        {
            let mut scoped = Transformed::new(&mut surface);
            scoped.translate(50.0, 50.0);
            scoped.rotate(0.5);
            scoped.rotate(0.25);
            scoped.fill_text("x", 0.0, 0.0);
            assert_eq!(scoped.pending_rotation(), 0.75);
        }
        let transforms: Vec<&DrawCommand> = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Translate { .. } | DrawCommand::Rotate { .. }))
            .collect();
        assert_eq!(
            transforms,
            vec![
                &DrawCommand::Translate { dx: 50.0, dy: 50.0 },
                &DrawCommand::Rotate { radians: 0.5 },
                &DrawCommand::Rotate { radians: 0.25 },
                &DrawCommand::Rotate { radians: -0.75 },
                &DrawCommand::Translate { dx: -50.0, dy: -50.0 },
            ]
        );
        assert!(surface.is_identity());
    }

    #[test]
    fn line_cap_parses() {
        assert_eq!("round".parse::<LineCap>(), Ok(LineCap::Round));
        assert!("pointy".parse::<LineCap>().is_err());
    }

    #[test]
    fn font_spec_displays_like_css() {
        assert_eq!(FontSpec::new(30.0, "serif").to_string(), "30px serif");
    }
}
