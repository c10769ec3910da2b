use cgmath::Vector2;
use thiserror::Error;

use crate::config::Rgb;
use crate::surface::Surface;

#[derive(Debug, Error, PartialEq)]
#[error("viewport {width}x{height} must be finite and non-negative")]
pub struct ViewportError {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ViewportError> {
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            Ok(Self { width, height })
        } else {
            Err(ViewportError { width, height })
        }
    }
}

/// Size state of a particle. The update rule is shared, only extents,
/// size bounds and drawing differ per variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    Circle {
        radius: f32,
        min_radius: f32,
        max_radius: f32,
    },
    Rect {
        width: f32,
        height: f32,
        min_width: f32,
        max_width: f32,
        min_height: f32,
        max_height: f32,
    },
}

impl Geometry {
    /// Distance from the center to the edge along x and y.
    pub fn half_extents(&self) -> Vector2<f32> {
        match *self {
            Geometry::Circle { radius, .. } => cgmath::vec2(radius, radius),
            Geometry::Rect { width, height, .. } => cgmath::vec2(width * 0.5, height * 0.5),
        }
    }

    pub fn grow(&mut self) {
        match self {
            Geometry::Circle { radius, max_radius, .. } => {
                if *radius < *max_radius {
                    *radius = (*radius + 1.0).min(*max_radius);
                }
            }
            Geometry::Rect { width, height, max_width, max_height, .. } => {
                if *width < *max_width && *height < *max_height {
                    *width = (*width + 1.0).min(*max_width);
                    *height = (*height + 1.0).min(*max_height);
                }
            }
        }
    }

    pub fn shrink(&mut self) {
        match self {
            Geometry::Circle { radius, min_radius, .. } => {
                if *radius > *min_radius {
                    *radius = (*radius - 1.0).max(*min_radius);
                }
            }
            Geometry::Rect { width, height, min_width, min_height, .. } => {
                if *width > *min_width && *height > *min_height {
                    *width = (*width - 1.0).max(*min_width);
                    *height = (*height - 1.0).max(*min_height);
                }
            }
        }
    }

    /// Checks `min(floor, initial) <= size <= max` on every axis. A size that
    /// starts below its floor only climbs toward it and never shrinks back.
    pub fn within_bounds(&self, initial: &Geometry) -> bool {
        match (*self, *initial) {
            (
                Geometry::Circle { radius, min_radius, max_radius },
                Geometry::Circle { radius: start, .. },
            ) => min_radius.min(start) <= radius && radius <= max_radius,
            (
                Geometry::Rect { width, height, min_width, max_width, min_height, max_height },
                Geometry::Rect { width: start_width, height: start_height, .. },
            ) => {
                min_width.min(start_width) <= width
                    && width <= max_width
                    && min_height.min(start_height) <= height
                    && height <= max_height
            }
            _ => false,
        }
    }
}

/// True when `pointer` lies inside the square window of half side
/// `window` around `center`.
pub fn is_near(pointer: Vector2<f32>, center: Vector2<f32>, window: f32) -> bool {
    (pointer.x - center.x).abs() < window && (pointer.y - center.y).abs() < window
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub geometry: Geometry,
    pub color: Rgb,
}

impl Particle {
    fn reflect(&mut self, viewport: Viewport) {
        let half = self.geometry.half_extents();

        if self.position.x + half.x > viewport.width || self.position.x - half.x < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y + half.y > viewport.height || self.position.y - half.y < 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Advances one frame. Reflection is tested on the position before the
    /// move, so a particle may sit one step past an edge before it turns.
    pub fn update(&mut self, viewport: Viewport, pointer: Option<Vector2<f32>>, proximity: f32) {
        self.reflect(viewport);
        self.position += self.velocity;

        match pointer {
            Some(pointer) if is_near(pointer, self.position, proximity) => self.geometry.grow(),
            Some(_) => self.geometry.shrink(),
            None => {}
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        match self.geometry {
            Geometry::Circle { radius, .. } => {
                surface.draw_circle(self.position.x, self.position.y, radius, self.color)
            }
            Geometry::Rect { width, height, .. } => surface.draw_rect(
                self.position.x - width * 0.5,
                self.position.y - height * 0.5,
                width,
                height,
                self.color,
            ),
        }
    }
}
