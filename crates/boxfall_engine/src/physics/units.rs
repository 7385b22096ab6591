//! Conversion between display pixels and simulation units

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// Pixels per simulation unit
///
/// Body placement arrives in pixels and is converted once when a body is
/// created. Snapshots convert back once per frame. Nothing else converts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pixels_per_unit: f32,
}

impl UnitScale {
    /// Scale used when none is configured
    pub const DEFAULT_PIXELS_PER_UNIT: f32 = 20.0;

    /// Create a scale from a pixels-per-unit factor
    pub const fn new(pixels_per_unit: f32) -> Self {
        Self { pixels_per_unit }
    }

    /// Pixels per simulation unit
    pub const fn pixels_per_unit(self) -> f32 {
        self.pixels_per_unit
    }

    /// Whether the factor is usable
    pub fn is_valid(self) -> bool {
        self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0
    }

    /// Pixels to simulation units
    pub fn to_simulation(self, pixels: f32) -> f32 {
        pixels / self.pixels_per_unit
    }

    /// Simulation units to pixels
    pub fn to_display(self, units: f32) -> f32 {
        units * self.pixels_per_unit
    }

    /// Pixel point to simulation units
    pub fn point_to_simulation(self, pixels: Vec2) -> Vec2 {
        pixels / self.pixels_per_unit
    }

    /// Simulation point to pixels
    pub fn point_to_display(self, units: Vec2) -> Vec2 {
        units * self.pixels_per_unit
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PIXELS_PER_UNIT)
    }
}
