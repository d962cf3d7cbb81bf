//! Software rasterizer behind the [`Surface`] trait.
//!
//! Paths are flattened to polylines in device space as they are built. Fills
//! use a non-zero scanline sweep with vertical supersampling; strokes are
//! distance-based anti-aliased segments. Text needs a font loaded with
//! [`RasterSurface::with_font`]; without one, text is measured with a
//! fixed per-character width and not painted.

use std::f64::consts::TAU;

use rusttype::{point, Font, Scale};

use crate::color::Color;
use crate::geometry::Affine;
use crate::recording::FALLBACK_CHAR_WIDTH;
use crate::surface::{FontSpec, LineCap, PaintState, Surface, TextAlign, TextBaseline};

const FILL_SUBSAMPLES: usize = 4;
/// Maximum chord length, in device pixels, used when flattening arcs.
const ARC_TOLERANCE: f64 = 2.0;
const MAX_ARC_SEGMENTS: usize = 1024;

#[derive(Debug, Clone, Default)]
struct SubPath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

/// An RGBA8 pixel buffer that can be drawn on like a canvas.
pub struct RasterSurface {
    width: u32,
    height: u32,
    frame: Vec<u8>,
    state: PaintState,
    transform: Affine,
    path: Vec<SubPath>,
    font: Option<Font<'static>>,
}

impl RasterSurface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: vec![0; width as usize * height as usize * 4],
            state: PaintState::default(),
            transform: Affine::IDENTITY,
            path: Vec::new(),
            font: None,
        }
    }

    /// Loads the font used for all text on this surface, whatever family is
    /// requested. Returns `None` if the bytes are not a usable font.
    pub fn with_font(mut self, bytes: Vec<u8>) -> Option<Self> {
        self.font = Some(Font::try_from_vec(bytes)?);
        Some(self)
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Fills every pixel with `color`, ignoring the current transform.
    pub fn clear(&mut self, color: Color) {
        let Color { r, g, b, a } = color;
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, a]);
        }
    }

    /// Raw RGBA8 rows, top to bottom.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.frame[idx..idx + 4];
        Some(Color::with_alpha(px[0], px[1], px[2], px[3]))
    }

    pub fn state(&self) -> &PaintState {
        &self.state
    }

    fn current(&mut self) -> Option<&mut SubPath> {
        self.path.last_mut().filter(|sub| !sub.closed)
    }

    fn push_point(&mut self, device: (f64, f64)) {
        match self.current() {
            Some(sub) => sub.points.push(device),
            None => {
                // a closed subpath restarts from its first point
                let start = self
                    .path
                    .last()
                    .and_then(|sub| sub.points.first().copied());
                let mut points = Vec::from_iter(start);
                points.push(device);
                self.path.push(SubPath {
                    points,
                    closed: false,
                });
            }
        }
    }

    fn mask(&self) -> Vec<f32> {
        vec![0.0; self.width as usize * self.height as usize]
    }

    fn composite(&mut self, mask: &[f32], color: Color) {
        let opacity = color.opacity();
        let width = self.width as usize;
        for (i, coverage) in mask.iter().enumerate() {
            if *coverage > 0.0 {
                blend_pixel(&mut self.frame, width, i % width, i / width, color, coverage * opacity);
            }
        }
    }

    fn fill_path(&mut self) {
        let edges: Vec<((f64, f64), (f64, f64))> = self
            .path
            .iter()
            .filter(|sub| sub.points.len() > 1)
            .flat_map(|sub| {
                let closing = (sub.points[sub.points.len() - 1], sub.points[0]);
                sub.points
                    .windows(2)
                    .map(|w| (w[0], w[1]))
                    .chain(std::iter::once(closing))
            })
            .filter(|((_, y0), (_, y1))| y0 != y1)
            .collect();
        if edges.is_empty() {
            return;
        }

        let (min_y, max_y) = edges.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.1).min(b.1), hi.max(a.1).max(b.1))
        });
        let first_row = min_y.floor().max(0.0) as usize;
        let last_row = (max_y.ceil().max(0.0) as usize).min(self.height as usize);

        let width = self.width as usize;
        let mut mask = self.mask();
        let mut crossings: Vec<(f64, i32)> = Vec::new();
        let weight = 1.0 / FILL_SUBSAMPLES as f32;
        for row in first_row..last_row {
            let line = &mut mask[row * width..(row + 1) * width];
            for sample in 0..FILL_SUBSAMPLES {
                let sy = row as f64 + (sample as f64 + 0.5) / FILL_SUBSAMPLES as f64;
                crossings.clear();
                for &((x0, y0), (x1, y1)) in &edges {
                    let dir = if y0 <= sy && y1 > sy {
                        1
                    } else if y1 <= sy && y0 > sy {
                        -1
                    } else {
                        continue;
                    };
                    let t = (sy - y0) / (y1 - y0);
                    crossings.push((x0 + t * (x1 - x0), dir));
                }
                crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

                let mut winding = 0;
                for pair in crossings.windows(2) {
                    winding += pair[0].1;
                    if winding != 0 {
                        add_span(line, pair[0].0, pair[1].0, weight);
                    }
                }
            }
        }
        self.composite(&mask, self.state.fill);
    }

    fn stroke_path(&mut self) {
        let half = self.state.line_width * self.transform.scale() / 2.0;
        if half <= 0.0 {
            return;
        }
        let cap = self.state.line_cap;
        let mut mask = self.mask();
        for sub in &self.path {
            let mut points = sub.points.clone();
            if sub.closed && points.len() > 1 {
                points.push(points[0]);
            }
            let segments = points.len().saturating_sub(1);
            for (i, pair) in points.windows(2).enumerate() {
                // inner joints are rounded, only the open ends take the cap
                let start_cap = if i == 0 && !sub.closed { cap } else { LineCap::Round };
                let end_cap = if i + 1 == segments && !sub.closed {
                    cap
                } else {
                    LineCap::Round
                };
                stroke_segment(
                    &mut mask,
                    self.width as usize,
                    self.height as usize,
                    (pair[0], pair[1]),
                    half,
                    (start_cap, end_cap),
                );
            }
        }
        self.composite(&mask, self.state.stroke);
    }

    fn text_origin(&self, font: &Font<'_>, scale: Scale, text: &str, x: f64, y: f64) -> (f64, f64) {
        let advance = advance_width(font, scale, text);
        let dx = match self.state.text_align {
            TextAlign::Start | TextAlign::Left => 0.0,
            TextAlign::Center => -advance / 2.0,
            TextAlign::Right | TextAlign::End => -advance,
        };
        let v_metrics = font.v_metrics(scale);
        let (ascent, descent) = (v_metrics.ascent as f64, v_metrics.descent as f64);
        let dy = match self.state.text_baseline {
            TextBaseline::Top => ascent,
            TextBaseline::Middle => (ascent + descent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Bottom => descent,
        };
        (x + dx, y + dy)
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// Like a canvas, resizing discards pixels, path and style state.
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.frame = vec![0; width as usize * height as usize * 4];
        self.state = PaintState::default();
        self.transform = Affine::IDENTITY;
        self.path.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let device = self.transform.apply(x, y);
        self.path.push(SubPath {
            points: vec![device],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let device = self.transform.apply(x, y);
        self.push_point(device);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let sweep = arc_sweep(start, end, anticlockwise);
        let device_radius = radius * self.transform.scale();
        let segments = ((sweep.abs() * device_radius / ARC_TOLERANCE).ceil() as usize)
            .clamp(1, MAX_ARC_SEGMENTS);
        for i in 0..=segments {
            let angle = start + sweep * i as f64 / segments as f64;
            let (sin, cos) = angle.sin_cos();
            let device = self.transform.apply(cx + radius * cos, cy + radius * sin);
            self.push_point(device);
        }
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.current() {
            sub.closed = true;
        }
    }

    fn fill(&mut self) {
        self.fill_path();
    }

    fn stroke(&mut self) {
        self.stroke_path();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        // canvas ignores non-positive widths
        if width > 0.0 && width.is_finite() {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let Some(font) = self.font.take() else {
            tracing::trace!(text, "no font loaded, text skipped");
            return;
        };
        let scale = Scale::uniform(self.state.font.size as f32);
        let (ox, oy) = self.text_origin(&font, scale, text, x, y);
        let color = self.state.fill;
        let opacity = color.opacity();
        let width = self.width as usize;
        let height = self.height as usize;
        let transform = self.transform;

        for glyph in font.layout(text, scale, point(ox as f32, oy as f32)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let ux = (bb.min.x + gx as i32) as f64 + 0.5;
                let uy = (bb.min.y + gy as i32) as f64 + 0.5;
                let (dx, dy) = transform.apply(ux, uy);
                splat(&mut self.frame, width, height, dx - 0.5, dy - 0.5, color, v * opacity);
            });
        }
        self.font = Some(font);
    }

    fn measure_text(&self, text: &str) -> f64 {
        match &self.font {
            Some(font) => advance_width(font, Scale::uniform(self.state.font.size as f32), text),
            None => FALLBACK_CHAR_WIDTH * self.state.font.size * text.chars().count() as f64,
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
    }
}

/// Signed angular extent of a canvas arc. A clockwise arc whose end is a full
/// turn or more past its start is a full circle.
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        if start - end >= TAU {
            -TAU
        } else {
            -(start - end).rem_euclid(TAU)
        }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

fn advance_width(font: &Font<'_>, scale: Scale, text: &str) -> f64 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0) as f64
}

/// Coverage of a pixel whose center is `distance` from an edge, full up to
/// `half` and fading out over one pixel past it.
fn edge_coverage(distance: f64, half: f64) -> f32 {
    (1.0 - (distance - half).clamp(0.0, 1.0)) as f32
}

fn stroke_segment(
    mask: &mut [f32],
    width: usize,
    height: usize,
    (p0, p1): ((f64, f64), (f64, f64)),
    half: f64,
    (start_cap, end_cap): (LineCap, LineCap),
) {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let len = dx.hypot(dy);
    // a zero-length segment has no direction to lay a butt or square cap on
    let (ux, uy) = if len > f64::EPSILON {
        (dx / len, dy / len)
    } else if start_cap == LineCap::Round || end_cap == LineCap::Round {
        (1.0, 0.0)
    } else {
        return;
    };
    let extend = |cap: LineCap| if cap == LineCap::Square { half } else { 0.0 };
    let (s0, s1) = (extend(start_cap), extend(end_cap));

    let reach = half + s0.max(s1) + 1.0;
    let min_x = (p0.0.min(p1.0) - reach).floor().max(0.0) as usize;
    let max_x = ((p0.0.max(p1.0) + reach).ceil().max(0.0) as usize).min(width);
    let min_y = (p0.1.min(p1.1) - reach).floor().max(0.0) as usize;
    let max_y = ((p0.1.max(p1.1) + reach).ceil().max(0.0) as usize).min(height);

    for y in min_y..max_y {
        for x in min_x..max_x {
            let (px, py) = (x as f64 + 0.5 - p0.0, y as f64 + 0.5 - p0.1);
            let along = px * ux + py * uy;
            let across = (px * uy - py * ux).abs();
            let coverage = if along < 0.0 && start_cap == LineCap::Round {
                edge_coverage(along.hypot(across), half)
            } else if along > len && end_cap == LineCap::Round {
                edge_coverage((along - len).hypot(across), half)
            } else {
                let mut coverage = edge_coverage(across, half);
                if start_cap != LineCap::Round {
                    coverage *= edge_coverage(-along, s0);
                }
                if end_cap != LineCap::Round {
                    coverage *= edge_coverage(along - len, s1);
                }
                coverage
            };
            let cell = &mut mask[y * width + x];
            *cell = cell.max(coverage);
        }
    }
}

/// Adds horizontal coverage between `xa` and `xb` to one mask row, splitting
/// the partial pixels at either end.
fn add_span(line: &mut [f32], xa: f64, xb: f64, weight: f32) {
    let xa = xa.max(0.0);
    let xb = xb.min(line.len() as f64);
    if xb <= xa {
        return;
    }
    let (ia, ib) = (xa.floor() as usize, xb.floor() as usize);
    if ia == ib {
        line[ia] += (xb - xa) as f32 * weight;
        return;
    }
    line[ia] += (ia as f64 + 1.0 - xa) as f32 * weight;
    for cell in &mut line[ia + 1..ib] {
        *cell += weight;
    }
    if ib < line.len() {
        line[ib] += (xb - ib as f64) as f32 * weight;
    }
}

/// Source-over blend of one pixel.
fn blend_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    if x >= width || y >= frame.len() / (width * 4) || alpha <= 0.0 {
        return;
    }
    let idx = (y * width + x) * 4;
    let dst_a = frame[idx + 3] as f32 / 255.0;
    let out_a = alpha + dst_a * (1.0 - alpha);
    let src = [color.r, color.g, color.b];
    for channel in 0..3 {
        let s = src[channel] as f32;
        let d = frame[idx + channel] as f32;
        frame[idx + channel] = ((s * alpha + d * dst_a * (1.0 - alpha)) / out_a).round() as u8;
    }
    frame[idx + 3] = (out_a * 255.0).round() as u8;
}

/// Spreads one sample over the four pixels around a fractional position.
fn splat(
    frame: &mut [u8],
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    color: Color,
    alpha: f32,
) {
    let (x_floor, y_floor) = (x.floor(), y.floor());
    let (x_frac, y_frac) = (x - x_floor, y - y_floor);
    let samples = [
        (x_floor, y_floor, (1.0 - x_frac) * (1.0 - y_frac)),
        (x_floor + 1.0, y_floor, x_frac * (1.0 - y_frac)),
        (x_floor, y_floor + 1.0, (1.0 - x_frac) * y_frac),
        (x_floor + 1.0, y_floor + 1.0, x_frac * y_frac),
    ];
    for (px, py, weight) in samples {
        if px >= 0.0 && py >= 0.0 && (px as usize) < width && (py as usize) < height {
            let alpha = alpha * weight as f32;
            if alpha > 0.001 {
                blend_pixel(frame, width, px as usize, py as usize, color, alpha);
            }
        }
    }
}
