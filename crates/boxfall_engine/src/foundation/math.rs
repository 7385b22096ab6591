//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation and the render bridge.

pub use nalgebra::{Vector2, UnitComplex};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D rotation type
pub type Rot2 = UnitComplex<f32>;

/// Position and orientation of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Center of the body
    pub position: Vec2,

    /// Orientation in radians, counter-clockwise
    pub angle: f32,
}

impl Pose {
    /// Create a new pose
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    /// Whether every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.angle.is_finite()
    }

    /// Map a body-local point into world space
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        self.position + Rot2::new(self.angle) * local
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec2::zeros(), 0.0)
    }
}

/// Corners of an axis-aligned box centered on the origin
///
/// Counter-clockwise starting at the minimum corner, matching the vertex
/// order physics engines use for boxes.
pub fn box_corners(half_extents: Vec2) -> [Vec2; 4] {
    let (hx, hy) = (half_extents.x, half_extents.y);
    [
        Vec2::new(-hx, -hy),
        Vec2::new(hx, -hy),
        Vec2::new(hx, hy),
        Vec2::new(-hx, hy),
    ]
}
