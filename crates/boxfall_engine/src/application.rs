//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::physics::{PhysicsBackend, PhysicsError, RapierBackend};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to set up a scene and react to frames.
pub trait Application<B: PhysicsBackend = RapierBackend> {
    /// Initialize the application
    ///
    /// Called once before the first frame. Use this to spawn the initial
    /// bodies.
    fn initialize(&mut self, engine: &mut Engine<B>) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before input is routed and the world steps.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `frame` - Index of the frame about to be simulated
    fn update(&mut self, _engine: &mut Engine<B>, _frame: u64) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once the loop has ended, before the world is released.
    fn cleanup(&mut self, engine: &mut Engine<B>);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// World setup or body creation failed
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),
}
