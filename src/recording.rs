//! Retained-mode surface: every call is kept as a [`DrawCommand`] so a dial's
//! output can be inspected or replayed onto another surface.

use crate::color::Color;
use crate::geometry::Affine;
use crate::surface::{FontSpec, LineCap, PaintState, Surface, TextAlign, TextBaseline};

/// Width of one character as a fraction of the font size when no real font
/// metrics are available.
pub const FALLBACK_CHAR_WIDTH: f64 = 0.6;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    },
    ClosePath,
    Fill,
    Stroke,
    FillColor(Color),
    StrokeColor(Color),
    LineWidth(f64),
    LineCap(LineCap),
    Font(FontSpec),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        radians: f64,
    },
}

impl DrawCommand {
    /// Issues this command against `surface`.
    pub fn replay(&self, surface: &mut impl Surface) {
        match self {
            DrawCommand::Resize { width, height } => surface.resize(*width, *height),
            DrawCommand::BeginPath => surface.begin_path(),
            DrawCommand::MoveTo { x, y } => surface.move_to(*x, *y),
            DrawCommand::LineTo { x, y } => surface.line_to(*x, *y),
            DrawCommand::Arc {
                cx,
                cy,
                radius,
                start,
                end,
                anticlockwise,
            } => surface.arc(*cx, *cy, *radius, *start, *end, *anticlockwise),
            DrawCommand::ClosePath => surface.close_path(),
            DrawCommand::Fill => surface.fill(),
            DrawCommand::Stroke => surface.stroke(),
            DrawCommand::FillColor(color) => surface.set_fill_color(*color),
            DrawCommand::StrokeColor(color) => surface.set_stroke_color(*color),
            DrawCommand::LineWidth(width) => surface.set_line_width(*width),
            DrawCommand::LineCap(cap) => surface.set_line_cap(*cap),
            DrawCommand::Font(font) => surface.set_font(font),
            DrawCommand::TextAlign(align) => surface.set_text_align(*align),
            DrawCommand::TextBaseline(baseline) => surface.set_text_baseline(*baseline),
            DrawCommand::FillText { text, x, y } => surface.fill_text(text, *x, *y),
            DrawCommand::Translate { dx, dy } => surface.translate(*dx, *dy),
            DrawCommand::Rotate { radians } => surface.rotate(*radians),
        }
    }
}

/// A [`Surface`] that records instead of painting.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    state: PaintState,
    transform: Affine,
    net_rotation: f64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            state: PaintState::default(),
            transform: Affine::IDENTITY,
            net_rotation: 0.0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forgets recorded commands. Style and transform state are kept, as they
    /// would be on a real canvas.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn state(&self) -> &PaintState {
        &self.state
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Sum of all rotations issued so far, in radians.
    pub fn net_rotation(&self) -> f64 {
        self.net_rotation
    }

    /// Where the origin currently sits in canvas pixels.
    pub fn net_translation(&self) -> (f64, f64) {
        (self.transform.e, self.transform.f)
    }

    pub fn is_identity(&self) -> bool {
        self.transform.approx_eq(&Affine::IDENTITY, 1e-9)
    }

    /// Replays everything recorded onto `target`.
    pub fn replay(&self, target: &mut impl Surface) {
        for command in &self.commands {
            command.replay(target);
        }
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.push(DrawCommand::Resize { width, height });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        self.push(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start,
            end,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
        self.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
        self.push(DrawCommand::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
        self.push(DrawCommand::LineCap(cap));
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
        self.push(DrawCommand::Font(font.clone()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
        self.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
        self.push(DrawCommand::TextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        FALLBACK_CHAR_WIDTH * self.state.font.size * text.chars().count() as f64
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
        self.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
        self.net_rotation += radians;
        self.push(DrawCommand::Rotate { radians });
    }
}
