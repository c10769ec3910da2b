use clap::{Parser, ValueEnum};
use eframe::egui;
use particle_bloom::{
    Animation, ConfigError, EventSender, FieldConfig, FrameStatus, Geometry, Recorder, Rgb, ShapeKind,
    StopHandle, Surface, Viewport, ViewportError,
};
use thiserror::Error;

const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 800.0;
const BACKGROUND: egui::Color32 = egui::Color32::WHITE;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error("window failed: {0}")]
    Window(String),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeArg {
    Circle,
    Rect,
}

impl From<ShapeArg> for ShapeKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Circle => ShapeKind::Circle,
            ShapeArg::Rect => ShapeKind::Rect,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "particle_bloom", about = "Drifting shapes that swell under the pointer")]
struct Cli {
    #[clap(long, value_enum, default_value = "circle")]
    shape: ShapeArg,

    /// Fixes the particle layout across runs.
    #[clap(long)]
    seed: Option<u64>,

    /// Run without a window against an in-memory surface.
    #[clap(long)]
    headless: bool,

    #[clap(long, default_value_t = 600)]
    frames: usize,
}

impl Cli {
    fn config(&self) -> FieldConfig {
        let config = FieldConfig::default().with_shape(self.shape.into());
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn to_color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Paints into the central panel. Field coordinates are relative to
/// `origin`, the panel's top-left corner.
struct PainterSurface {
    painter: egui::Painter,
    origin: egui::Pos2,
}

impl Surface for PainterSurface {
    fn clear(&mut self) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, BACKGROUND);
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb) {
        self.painter
            .circle_filled(self.origin + egui::vec2(x, y), radius, to_color32(color));
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let rect = egui::Rect::from_min_size(self.origin + egui::vec2(x, y), egui::vec2(width, height));
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }
}

struct ParticleBloom {
    animation: Animation,
    events: EventSender,
    stop: StopHandle,
    viewport: egui::Vec2,
}

impl ParticleBloom {
    fn new(animation: Animation) -> Self {
        let viewport = animation.particles().viewport();
        Self {
            events: animation.sender(),
            stop: animation.stop_handle(),
            viewport: egui::vec2(viewport.width, viewport.height),
            animation,
        }
    }
}

impl eframe::App for ParticleBloom {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.stop.stop();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());

                if rect.size() != self.viewport {
                    self.viewport = rect.size();
                    self.events.resized(rect.width(), rect.height());
                }
                if let Some(pos) = response.hover_pos() {
                    let local = pos - rect.min;
                    self.events.pointer_moved(local.x, local.y);
                }

                let mut surface = PainterSurface {
                    painter: ui.painter_at(rect),
                    origin: rect.min,
                };
                if self.animation.frame(&mut surface) == FrameStatus::Stopped {
                    frame.close();
                }
            });

        ctx.request_repaint();
    }
}

/// Sweeps a virtual pointer around the field center and reports how many
/// particles ended above their shrink floor.
fn run_headless(config: FieldConfig, frames: usize) -> Result<(), AppError> {
    let viewport = Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut animation = Animation::new(config, viewport)?;
    let events = animation.sender();
    let mut recorder = Recorder::new();

    for i in 0..frames {
        let t = i as f32 / 60.0;
        events.pointer_moved(
            WINDOW_WIDTH * 0.5 + t.cos() * 200.0,
            WINDOW_HEIGHT * 0.5 + t.sin() * 200.0,
        );

        recorder.reset();
        if animation.frame(&mut recorder) == FrameStatus::Stopped {
            break;
        }
    }

    let enlarged = animation
        .particles()
        .as_slice()
        .iter()
        .filter(|particle| match particle.geometry {
            Geometry::Circle { radius, min_radius, .. } => radius > min_radius,
            Geometry::Rect { width, min_width, .. } => width > min_width,
        })
        .count();

    println!(
        "{} frames, {} draw calls in the last frame, {} of {} particles enlarged",
        animation.frames(),
        recorder.last_frame().len(),
        enlarged,
        animation.particles().len(),
    );

    Ok(())
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.config();

    if cli.headless {
        return run_headless(config, cli.frames);
    }

    let animation = Animation::new(config, Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT)?)?;

    eframe::run_native(
        "Particle Bloom",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            initial_window_size: Some(egui::vec2(WINDOW_WIDTH, WINDOW_HEIGHT)),
            ..Default::default()
        },
        Box::new(move |_cc| Box::new(ParticleBloom::new(animation))),
    )
    .map_err(|err| AppError::Window(err.to_string()))
}
