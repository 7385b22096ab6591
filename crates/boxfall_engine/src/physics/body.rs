//! Rectangular rigid bodies and their validated construction

use crate::foundation::math::{box_corners, Pose, Vec2};
use super::units::UnitScale;
use super::PhysicsError;

/// Kinematic class of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Fixed in place, an immovable obstacle
    Static,
    /// Moves under gravity and collision response
    Dynamic,
}

/// Immutable box geometry in simulation units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleShape {
    half_extents: Vec2,
    density: f32,
}

impl RectangleShape {
    /// Number of corners of every shape in this system
    pub const VERTEX_COUNT: usize = 4;

    /// Half-width and half-height
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Full width and height
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Mass per unit area
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Corners in body-local space
    pub fn local_corners(&self) -> [Vec2; 4] {
        box_corners(self.half_extents)
    }
}

/// Request for a new rectangle, in display pixels
///
/// ```
/// use boxfall_engine::physics::{BodyKind, RectangleBodyDesc};
///
/// let crate_box = RectangleBodyDesc::new(100.0, 100.0, 20.0, 20.0, BodyKind::Dynamic)
///     .with_density(2.5);
/// assert_eq!(crate_box.density, 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleBodyDesc {
    /// Center x in pixels
    pub x: f32,
    /// Center y in pixels
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Static or dynamic
    pub kind: BodyKind,
    /// Mass per unit area
    pub density: f32,
}

impl RectangleBodyDesc {
    /// Density used when none is given
    pub const DEFAULT_DENSITY: f32 = 1.0;

    /// Describe an axis-aligned rectangle centered at (x, y)
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: BodyKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
            density: Self::DEFAULT_DENSITY,
        }
    }

    /// Override the density
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Check the request and convert it to simulation units
    ///
    /// Density is checked for static bodies too even though it has no effect on them.
    pub fn resolve(&self, scale: UnitScale) -> Result<BodyDefinition, PhysicsError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(PhysicsError::InvalidGeometry(format!(
                "position must be finite, got ({}, {})",
                self.x, self.y
            )));
        }
        if !(self.width.is_finite() && self.width > 0.0) || !(self.height.is_finite() && self.height > 0.0) {
            return Err(PhysicsError::InvalidGeometry(format!(
                "size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(PhysicsError::InvalidGeometry(format!(
                "density must be positive, got {}",
                self.density
            )));
        }

        Ok(BodyDefinition {
            kind: self.kind,
            position: scale.point_to_simulation(Vec2::new(self.x, self.y)),
            shape: RectangleShape {
                half_extents: Vec2::new(
                    scale.to_simulation(self.width) / 2.0,
                    scale.to_simulation(self.height) / 2.0,
                ),
                density: self.density,
            },
        })
    }
}

/// Validated body in simulation units, as handed to a physics backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDefinition {
    /// Static or dynamic
    pub kind: BodyKind,
    /// Initial center in simulation units
    pub position: Vec2,
    /// Box geometry
    pub shape: RectangleShape,
}

/// Read-only view of one body's current state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView {
    /// Static or dynamic
    pub kind: BodyKind,
    /// Current center and orientation in simulation units
    pub pose: Pose,
    /// Box geometry
    pub shape: RectangleShape,
}

impl BodyView {
    /// Current center in simulation units
    pub fn position(&self) -> Vec2 {
        self.pose.position
    }

    /// Current orientation in radians
    pub fn angle(&self) -> f32 {
        self.pose.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolve_converts_once() {
        let def = RectangleBodyDesc::new(320.0, 430.0, 640.0, 30.0, BodyKind::Static)
            .resolve(UnitScale::new(20.0))
            .unwrap();
        assert_relative_eq!(def.position, Vec2::new(16.0, 21.5));
        assert_relative_eq!(def.shape.half_extents(), Vec2::new(16.0, 0.75));
        assert_relative_eq!(def.shape.density(), 1.0);
        assert_eq!(def.kind, BodyKind::Static);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let scale = UnitScale::default();
        let cases = [
            RectangleBodyDesc::new(0.0, 0.0, 0.0, 10.0, BodyKind::Dynamic),
            RectangleBodyDesc::new(0.0, 0.0, 10.0, -1.0, BodyKind::Dynamic),
            RectangleBodyDesc::new(0.0, 0.0, f32::NAN, 10.0, BodyKind::Dynamic),
            RectangleBodyDesc::new(f32::INFINITY, 0.0, 10.0, 10.0, BodyKind::Dynamic),
            RectangleBodyDesc::new(0.0, 0.0, 10.0, 10.0, BodyKind::Static).with_density(0.0),
        ];
        for desc in cases {
            assert!(
                matches!(desc.resolve(scale), Err(PhysicsError::InvalidGeometry(_))),
                "{desc:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_shape_has_four_corners() {
        let def = RectangleBodyDesc::new(0.0, 0.0, 40.0, 20.0, BodyKind::Dynamic)
            .resolve(UnitScale::default())
            .unwrap();
        let corners = def.shape.local_corners();
        assert_eq!(corners.len(), RectangleShape::VERTEX_COUNT);
        assert_relative_eq!(corners[2], Vec2::new(1.0, 0.5));
        assert_relative_eq!(def.shape.size(), Vec2::new(2.0, 1.0));
    }
}
