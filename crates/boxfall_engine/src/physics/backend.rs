//! Seam between the world store and the physics engine that does the math
//!
//! Dynamics, collision detection and constraint solving all live behind this
//! trait. The world store only creates bodies, steps, and reads poses back.

use std::fmt;
use std::hash::Hash;

use crate::foundation::math::{Pose, Vec2};
use super::body::BodyDefinition;

/// Unrecoverable error reported by a physics engine during a step
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BackendFault(pub String);

/// Physics engine contract
///
/// Implementations must keep bodies alive across steps, advance state on
/// every `step` call, and return the same body list order between steps.
pub trait PhysicsBackend {
    /// Engine-side reference to a body
    type BodyRef: Copy + Eq + Hash + fmt::Debug;

    /// Register a body and its box collider
    fn create_body(&mut self, definition: &BodyDefinition) -> Self::BodyRef;

    /// Advance the simulation by `dt` seconds
    fn step(
        &mut self,
        dt: f32,
        velocity_iterations: usize,
        position_iterations: usize,
    ) -> Result<(), BackendFault>;

    /// References to every live body
    fn bodies(&self) -> Vec<Self::BodyRef>;

    /// Current center and orientation of a body
    fn pose(&self, body: Self::BodyRef) -> Option<Pose>;

    /// Gravity the engine applies
    fn gravity(&self) -> Vec2;
}
