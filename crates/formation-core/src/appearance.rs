//! Particle color and size, plus hex color helpers shared with decoration models.

use crate::constants::{DEFAULT_PARTICLE_SIZE, MATTE_GREEN, METALLIC_GOLD};
use crate::error::{FormationError, Result};
use crate::shape::ShapeKind;

/// Linear RGB triple in 0..=1.
pub type Rgb = [f32; 3];

#[inline]
pub fn rgb_from_hex(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Parse `#rrggbb` or `rrggbb` (case-insensitive).
pub fn parse_hex_color(value: &str) -> Result<Rgb> {
    let digits = value.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FormationError::InvalidColor(value.to_string()));
    }
    u32::from_str_radix(digits, 16)
        .map(rgb_from_hex)
        .map_err(|_| FormationError::InvalidColor(value.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    color: Rgb,
    particle_size: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: rgb_from_hex(METALLIC_GOLD),
            particle_size: DEFAULT_PARTICLE_SIZE,
        }
    }
}

impl Appearance {
    pub fn new(color: &str, particle_size: f32) -> Result<Self> {
        let mut appearance = Self::default();
        appearance.set_color(color)?;
        appearance.set_particle_size(particle_size)?;
        Ok(appearance)
    }

    pub fn set_color(&mut self, value: &str) -> Result<()> {
        self.color = parse_hex_color(value)?;
        Ok(())
    }

    pub fn set_particle_size(&mut self, size: f32) -> Result<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FormationError::InvalidParticleSize(size));
        }
        self.particle_size = size;
        Ok(())
    }

    /// The configured color, before any per-shape override.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn particle_size(&self) -> f32 {
        self.particle_size
    }

    /// The tree is always drawn in matte green so the decorations stand out.
    pub fn particle_color(&self, shape: ShapeKind) -> Rgb {
        match shape {
            ShapeKind::Tree => rgb_from_hex(MATTE_GREEN),
            _ => self.color,
        }
    }
}
