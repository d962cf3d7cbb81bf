//! Circular gauge ("dial") rendering onto a 2D canvas-like surface.
//!
//! A [`Dial`] owns a [`Surface`] and a [`DialConfig`], and offers primitives
//! to draw the face: background, arcs, the sweep with its ticks, highlight
//! segments, a numeric scale, a value readout and a pointer. Every primitive
//! validates its arguments before drawing and reports failures through
//! `tracing`.
//!
//! ```
//! use dialface::{BaseParameters, Dial, NoAttributes, PointerOptions, RecordingSurface};
//!
//! let mut dial = Dial::new("speedo", RecordingSurface::new(300, 300), &NoAttributes).unwrap();
//! dial.set_base_parameters(&BaseParameters::builder().max_value(100.0).value(50.0).build());
//! assert!(dial.draw_background());
//! assert!(dial.draw_pointer(&PointerOptions::default()));
//! ```

pub mod attributes;
pub mod color;
pub mod config;
pub mod dial;
pub mod error;
pub mod geometry;
pub mod options;
pub mod raster;
pub mod recording;
pub mod surface;
pub mod validate;

pub use attributes::{AttributeSource, DataSet, ElementAttributes, NoAttributes};
pub use color::Color;
pub use config::{BaseParameters, DialConfig};
pub use dial::Dial;
pub use error::{DialError, ValidationError};
pub use geometry::Frame;
pub use options::{
    ArcOptions, PointerOptions, PointerStyle, ScaleOptions, SegmentOptions, SweepOptions,
    TickOptions, ValueOptions,
};
pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{FontSpec, LineCap, Surface, TextAlign, TextBaseline, Transformed};
