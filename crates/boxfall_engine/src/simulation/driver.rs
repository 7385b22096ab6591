//! Fixed-tick simulation driver
//!
//! Every tick advances the world by the same `step_seconds`, however long
//! the tick actually took. Determinism is preferred over tracking wall time.
//!
//! ```text
//! Idle --tick--> Stepping --ok--> Idle
//!                    |
//!                    +--fault--> Faulted
//! Idle --stop--> Stopped
//! ```

use crate::foundation::time::Stopwatch;
use crate::physics::{PhysicsBackend, PhysicsError, PhysicsWorld, RapierBackend};

/// Where the driver is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Waiting for the next tick
    Idle,
    /// A step is in progress
    Stepping,
    /// Shut down on request; no more steps
    Stopped,
    /// The physics engine failed; no more steps
    Faulted,
}

/// Owns a world and advances it one fixed step per tick
pub struct SimulationDriver<B: PhysicsBackend = RapierBackend> {
    world: PhysicsWorld<B>,
    state: DriverState,
    steps_taken: u64,
}

impl<B: PhysicsBackend> SimulationDriver<B> {
    /// Take ownership of a world
    pub fn new(world: PhysicsWorld<B>) -> Self {
        Self {
            world,
            state: DriverState::Idle,
            steps_taken: 0,
        }
    }

    /// Advance the world by exactly one fixed step
    ///
    /// A fault moves the driver to [`DriverState::Faulted`]; from then on,
    /// and after [`stop`](Self::stop), ticks return `SimulationHalted`
    /// without touching the world.
    pub fn tick(&mut self) -> Result<(), PhysicsError> {
        if !self.is_running() {
            return Err(PhysicsError::SimulationHalted);
        }

        self.state = DriverState::Stepping;
        let stopwatch = Stopwatch::start_new();
        let result = self.world.step();

        match result {
            Ok(()) => {
                self.steps_taken += 1;
                self.state = DriverState::Idle;
                log::trace!("Step {} took {:.3}ms", self.steps_taken, stopwatch.elapsed_millis());
                Ok(())
            }
            Err(error) => {
                self.state = DriverState::Faulted;
                log::error!("Simulation halted after {} steps: {}", self.steps_taken, error);
                Err(error)
            }
        }
    }

    /// Stop ticking for good
    pub fn stop(&mut self) {
        if self.state == DriverState::Idle {
            log::info!("Simulation stop requested after {} steps", self.steps_taken);
            self.state = DriverState::Stopped;
        }
    }

    /// Whether ticks will still step the world
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Idle
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of completed steps
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// The simulated world
    pub fn world(&self) -> &PhysicsWorld<B> {
        &self.world
    }

    /// Mutable access to the world, for spawning bodies between ticks
    pub fn world_mut(&mut self) -> &mut PhysicsWorld<B> {
        &mut self.world
    }

    /// Release the world
    pub fn shutdown(self) -> u64 {
        log::info!(
            "Releasing world with {} bodies after {} steps ({:?})",
            self.world.body_count(),
            self.steps_taken,
            self.state
        );
        self.steps_taken
    }
}
