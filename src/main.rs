use std::env;
use std::sync::Arc;

use dialface::{
    Color, DataSet, Dial, PointerOptions, RasterSurface, RecordingSurface, ScaleOptions,
    SegmentOptions, Surface, SweepOptions, ValueOptions,
};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const USAGE: &str = "usage: dialface [--font PATH] [--size PIXELS] [--dump] [key=value ...]";

/// Attributes the demo starts from; anything given on the command line wins.
const DEMO_ATTRIBUTES: [&str; 4] = ["maxvalue=100", "tickmarks=10", "value=65", "units=km/h"];

const SWEEP_COLOR: Color = Color::new(0x33, 0x99, 0xff);
const HIGHLIGHT_COLOR: Color = Color::new(0xff, 0x33, 0x33);
const READOUT_BG: Color = Color::new(0x22, 0x22, 0x22);

struct Args {
    font: Option<String>,
    size: u32,
    dump: bool,
    attributes: Vec<String>,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut parsed = Args {
        font: None,
        size: 0,
        dump: false,
        attributes: Vec::new(),
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--font" => parsed.font = Some(args.next().ok_or(USAGE)?),
            "--size" => parsed.size = args.next().ok_or(USAGE)?.parse()?,
            "--dump" => parsed.dump = true,
            "-h" | "--help" => return Err(USAGE.into()),
            pair if pair.contains('=') => parsed.attributes.push(pair.to_string()),
            other => return Err(format!("unexpected argument {other:?}\n{USAGE}").into()),
        }
    }
    Ok(parsed)
}

/// Draws a complete face. Returns whether every primitive succeeded.
fn draw_face<S: Surface>(dial: &mut Dial<S>) -> bool {
    let config = dial.config();
    let highlight_start = config.max_value - config.range() * 0.2;
    let highlight_stop = config.max_value;

    let results = [
        dial.draw_background(),
        dial.draw_sweep(
            &SweepOptions::builder()
                .radius_percent(90.0)
                .width_percent(5.0)
                .color(SWEEP_COLOR)
                .build(),
        ),
        dial.draw_segment(
            &SegmentOptions::builder()
                .start(highlight_start)
                .stop(highlight_stop)
                .radius_percent(90.0)
                .width_percent(5.0)
                .color(HIGHLIGHT_COLOR)
                .build(),
        ),
        dial.draw_scale(
            &ScaleOptions::builder()
                .radius_percent(70.0)
                .font_size_percent(10.0)
                .build(),
        ),
        dial.draw_value(&ValueOptions::builder().bg_color(READOUT_BG).build()),
        dial.draw_pointer(&PointerOptions::default()),
    ];
    results.iter().all(|ok| *ok)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let attributes = DataSet::from_pairs(
        DEMO_ATTRIBUTES
            .iter()
            .copied()
            .chain(args.attributes.iter().map(String::as_str)),
    );

    if args.dump {
        let surface = RecordingSurface::new(args.size, args.size);
        let mut dial = Dial::new("dialface", surface, &attributes)?;
        if !draw_face(&mut dial) {
            tracing::warn!("some parts of the face could not be drawn");
        }
        for command in dial.surface().commands() {
            println!("{command:?}");
        }
        return Ok(());
    }

    let mut surface = RasterSurface::new(args.size, args.size);
    if let Some(path) = &args.font {
        let bytes = std::fs::read(path)?;
        surface = surface
            .with_font(bytes)
            .ok_or_else(|| format!("{path} is not a usable font"))?;
    } else {
        tracing::info!("no --font given, labels will not be rendered");
    }

    let mut dial = Dial::new("dialface", surface, &attributes)?;
    if !draw_face(&mut dial) {
        tracing::warn!("some parts of the face could not be drawn");
    }
    let size = dial.width();
    let face = dial.into_surface();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("dialface")
        .with_inner_size(LogicalSize::new(size as f64, size as f64))
        .with_resizable(false)
        .build(&event_loop)?;
    let window = Arc::new(window);

    let inner = window.inner_size();
    let surface_texture = SurfaceTexture::new(inner.width, inner.height, &window);
    let mut pixels = Pixels::new(size, size, surface_texture)?;
    window.request_redraw();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Wait);
        if let Event::WindowEvent { event, .. } = event {
            match event {
                WindowEvent::CloseRequested => window_target.exit(),
                WindowEvent::Resized(new_size) => {
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        tracing::error!(%err, "failed to resize surface");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    pixels.frame_mut().copy_from_slice(face.frame());
                    if let Err(err) = pixels.render() {
                        tracing::error!(%err, "render failed");
                        window_target.exit();
                    }
                }
                _ => {}
            }
        }
    })?;

    Ok(())
}
