//! Physics module: the world state store and the body factory
//!
//! The rigid-body math is done by an external engine behind
//! [`PhysicsBackend`]; [`RapierBackend`] is the default. This module owns
//! the bodies, validates what goes into the engine, and converts between
//! display pixels and simulation units.

pub mod backend;
pub mod body;
pub mod rapier_backend;
pub mod units;
pub mod world;

pub use backend::{BackendFault, PhysicsBackend};
pub use body::{BodyDefinition, BodyKind, BodyView, RectangleBodyDesc, RectangleShape};
pub use rapier_backend::RapierBackend;
pub use units::UnitScale;
pub use world::{PhysicsWorld, WorldSettings};
pub use crate::foundation::collections::BodyHandle;

use thiserror::Error;

/// Errors raised by world setup, body creation and stepping
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// World parameters were rejected; no world was created
    #[error("Invalid world configuration: {0}")]
    InvalidConfiguration(String),

    /// Body dimensions or density were rejected; no body was created
    #[error("Invalid body geometry: {0}")]
    InvalidGeometry(String),

    /// The physics engine failed mid-step; the world can no longer be trusted
    #[error("Simulation fault: {0}")]
    SimulationFault(String),

    /// A step was requested after the simulation stopped or faulted
    #[error("Simulation is halted")]
    SimulationHalted,
}

impl PhysicsError {
    /// Whether the caller can retry with corrected input
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_) | Self::InvalidGeometry(_))
    }
}
