use cgmath::Vector2;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::config::{ConfigError, FieldConfig, ShapeKind};
use crate::shape::{Geometry, Particle, Viewport};
use crate::surface::Surface;

/// One generation of particles plus the RNG that seeds every generation.
pub struct Particles {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    generation: u64,
    rng: StdRng,
}

impl Particles {
    pub fn new(config: FieldConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut store = Self {
            particles: Vec::with_capacity(config.particle_count),
            config,
            viewport,
            generation: 0,
            rng,
        };
        store.populate();

        Ok(store)
    }

    /// Discards every particle and samples a fresh generation for `viewport`.
    pub fn regenerate(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.generation += 1;
        self.populate();
    }

    fn populate(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            let particle = spawn(&mut self.rng, &self.config, self.viewport);
            self.particles.push(particle);
        }

        log::info!(
            "store generation {}: {} {:?} particles in {}x{}",
            self.generation,
            self.particles.len(),
            self.config.shape,
            self.viewport.width,
            self.viewport.height,
        );
    }

    pub fn update(&mut self, pointer: Option<Vector2<f32>>) {
        let viewport = self.viewport;
        let proximity = self.config.proximity;

        self.particles
            .par_iter_mut()
            .for_each(|particle| particle.update(viewport, pointer, proximity));
    }

    /// Draws in store order, so later particles land on top.
    pub fn draw(&self, surface: &mut impl Surface) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

fn sample_size(rng: &mut StdRng, config: &FieldConfig) -> f32 {
    rng.gen_range(config.size_range.clone()) as f32
}

/// Uniform position that keeps `half` clear of both edges when `extent`
/// allows it. Smaller viewports may produce out-of-range positions.
fn sample_axis(rng: &mut StdRng, extent: f32, half: f32) -> f32 {
    rng.r#gen::<f32>() * (extent - 2.0 * half) + half
}

fn sample_speed(rng: &mut StdRng, max_speed: f32) -> f32 {
    (rng.r#gen::<f32>() - 0.5) * 2.0 * max_speed
}

fn spawn(rng: &mut StdRng, config: &FieldConfig, viewport: Viewport) -> Particle {
    // rects place themselves with one height draw, then take a second draw
    // as their actual height; the ceiling mixes both
    let (mut geometry, half) = match config.shape {
        ShapeKind::Circle => {
            let radius = sample_size(rng, config);
            let geometry = Geometry::Circle {
                radius,
                min_radius: 0.0,
                max_radius: config.max_radius,
            };
            (geometry, geometry.half_extents())
        }
        ShapeKind::Rect => {
            let width = sample_size(rng, config);
            let placement_height = sample_size(rng, config);
            let geometry = Geometry::Rect {
                width,
                height: placement_height,
                min_width: 0.0,
                max_width: width + width * config.rect_growth,
                min_height: 0.0,
                max_height: 0.0,
            };
            (geometry, cgmath::vec2(width * 0.5, placement_height * 0.5))
        }
    };

    let position = cgmath::vec2(
        sample_axis(rng, viewport.width, half.x),
        sample_axis(rng, viewport.height, half.y),
    );
    let velocity = cgmath::vec2(
        sample_speed(rng, config.max_speed),
        sample_speed(rng, config.max_speed),
    );
    let color = config.palette[rng.gen_range(0..config.palette.len())];

    // floors are drawn independently of the initial size and may sit above it
    match &mut geometry {
        Geometry::Circle { min_radius, .. } => {
            *min_radius = sample_size(rng, config);
        }
        Geometry::Rect { height, min_width, min_height, max_height, .. } => {
            *min_width = sample_size(rng, config);
            let placement_height = *height;
            *height = sample_size(rng, config);
            *max_height = *height + placement_height * config.rect_growth;
            *min_height = sample_size(rng, config);
        }
    }

    Particle {
        position,
        velocity,
        geometry,
        color,
    }
}
