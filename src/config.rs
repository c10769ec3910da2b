use std::ops::RangeInclusive;

use thiserror::Error;

pub const PARTICLE_COUNT: usize = 1000;
pub const MAX_RADIUS: f32 = 40.0;
pub const PROXIMITY: f32 = 50.0;

/// Rectangles may grow to `d + d * RECT_GROWTH` on each axis.
pub const RECT_GROWTH: f32 = 5.0;

pub const PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0xFF9D1F),
    Rgb::from_hex(0xE85E01),
    Rgb::from_hex(0xFF490E),
    Rgb::from_hex(0xE8210E),
    Rgb::from_hex(0xFF0D4B),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeKind {
    #[default]
    Circle,
    Rect,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("particle count must be positive")]
    EmptyField,
    #[error("palette has no colors")]
    EmptyPalette,
    #[error("size range {start}..={end} is empty or starts at zero")]
    InvalidSizeRange { start: u32, end: u32 },
    #[error("max radius {max_radius} is below the largest initial size {largest}")]
    RadiusBelowSizeRange { max_radius: f32, largest: u32 },
    #[error("proximity window must be positive, got {0}")]
    InvalidProximity(f32),
    #[error("max speed must be positive, got {0}")]
    InvalidSpeed(f32),
}

/// Fixed constants for one particle field. `Default` is the canonical set.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub shape: ShapeKind,
    pub particle_count: usize,
    /// Initial sizes and shrink floors are drawn from this integer range.
    pub size_range: RangeInclusive<u32>,
    pub max_radius: f32,
    pub rect_growth: f32,
    /// Half side of the square hover window around a particle center.
    pub proximity: f32,
    pub max_speed: f32,
    pub palette: Vec<Rgb>,
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::default(),
            particle_count: PARTICLE_COUNT,
            size_range: 1..=10,
            max_radius: MAX_RADIUS,
            rect_growth: RECT_GROWTH,
            proximity: PROXIMITY,
            max_speed: 1.0,
            palette: PALETTE.to_vec(),
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let (start, end) = (*self.size_range.start(), *self.size_range.end());
        if start == 0 || start > end {
            return Err(ConfigError::InvalidSizeRange { start, end });
        }
        if !(self.max_radius >= end as f32) {
            return Err(ConfigError::RadiusBelowSizeRange {
                max_radius: self.max_radius,
                largest: end,
            });
        }
        if !(self.proximity > 0.0) {
            return Err(ConfigError::InvalidProximity(self.proximity));
        }
        if !(self.max_speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.max_speed));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FieldConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.particle_count, 1000);
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.shape, ShapeKind::Circle);
    }

    #[test]
    fn test_palette_hex_decoding() {
        assert_eq!(PALETTE[0], Rgb { r: 0xFF, g: 0x9D, b: 0x1F });
        assert_eq!(PALETTE[4], Rgb { r: 0xFF, g: 0x0D, b: 0x4B });
    }

    #[test]
    fn test_rejects_degenerate_constants() {
        let mut config = FieldConfig::default();
        config.particle_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyField));

        let mut config = FieldConfig::default();
        config.palette.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));

        let mut config = FieldConfig::default();
        config.size_range = 0..=10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSizeRange { start: 0, end: 10 })
        );

        let mut config = FieldConfig::default();
        config.max_radius = 5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RadiusBelowSizeRange { .. })
        ));

        let mut config = FieldConfig::default();
        config.proximity = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProximity(_))));
    }
}
