//! Core engine implementation
//!
//! One thread, one loop. Each frame:
//! 1. let the application react
//! 2. poll the event source and route every event
//! 3. step the world once
//! 4. capture a snapshot and present it
//! 5. wait for the next tick
//!
//! Nothing mutates the world while a snapshot is being captured or presented.

use crate::{
    application::Application,
    config::ConfigError,
    core::config::{ApplicationConfig, EngineConfig},
    events::EventSource,
    foundation::time::{SleepClock, TickClock, Timer},
    input::{InputRouter, RouteOutcome},
    physics::{PhysicsBackend, PhysicsError, PhysicsWorld, RapierBackend},
    render::{capture_snapshot, PresentError, Presenter},
    simulation::SimulationDriver,
};
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates the driver, the input router, the event source,
/// the presenter and the tick clock, and runs the main loop.
pub struct Engine<B: PhysicsBackend = RapierBackend> {
    driver: SimulationDriver<B>,
    router: InputRouter,
    events: Box<dyn EventSource>,
    presenter: Box<dyn Presenter>,
    clock: Box<dyn TickClock>,
    timer: Timer,
    config: EngineConfig,
    frame: u64,
    frame_limit: Option<u64>,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames presented
    pub frames: u64,
    /// Simulation steps taken
    pub steps: u64,
    /// Bodies in the world when it was released
    pub bodies: usize,
    /// Wall time spent in the loop, in seconds
    pub elapsed_seconds: f32,
    /// Average frames per second over the run
    pub average_fps: f32,
}

impl Engine<RapierBackend> {
    /// Build an engine with a rapier world from configuration
    ///
    /// The loop is paced by a [`SleepClock`] at the configured frame rate.
    pub fn from_config(
        config: &ApplicationConfig,
        events: Box<dyn EventSource>,
        presenter: Box<dyn Presenter>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let world = PhysicsWorld::create(config.simulation.world_settings())?;
        let clock = SleepClock::new(config.display.target_fps);

        Ok(Self::new(
            SimulationDriver::new(world),
            InputRouter::new(config.input.clone()),
            events,
            presenter,
            Box::new(clock),
        )
        .with_config(config.engine.clone()))
    }
}

impl<B: PhysicsBackend> Engine<B> {
    /// Create an engine from its parts
    pub fn new(
        driver: SimulationDriver<B>,
        router: InputRouter,
        events: Box<dyn EventSource>,
        presenter: Box<dyn Presenter>,
        clock: Box<dyn TickClock>,
    ) -> Self {
        Self {
            driver,
            router,
            events,
            presenter,
            clock,
            timer: Timer::new(),
            config: EngineConfig::default(),
            frame: 0,
            frame_limit: None,
        }
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Stop after presenting `frames` frames even without a quit event
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Run the main loop until quit, then release the world
    ///
    /// A simulation fault ends the run with an error; the world is dropped
    /// with the engine and has to be recreated to continue.
    pub fn run<A: Application<B>>(mut self, app: &mut A) -> Result<RunSummary, EngineError> {
        log::info!("Initializing application...");
        app.initialize(&mut self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");
        while self.driver.is_running() {
            if self.frame_limit.is_some_and(|limit| self.frame >= limit) {
                log::info!("Frame limit of {} reached", self.frame);
                self.driver.stop();
                break;
            }

            let frame = self.frame;
            app.update(&mut self, frame)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;
            if !self.driver.is_running() {
                break;
            }

            self.route_events()?;
            if !self.driver.is_running() {
                break;
            }

            self.driver.tick()?;

            let snapshot = capture_snapshot(self.driver.world(), self.frame);
            self.presenter.present(&snapshot)?;
            if self.config.debug_mode {
                log::debug!("Presented frame {} with {} bodies", self.frame, snapshot.len());
            }

            self.timer.update();
            log::trace!("Frame {} took {:.3}s", self.frame, self.timer.delta_time());
            self.frame += 1;
            self.clock.wait_for_next_tick();
        }

        app.cleanup(&mut self);

        let summary = RunSummary {
            frames: self.frame,
            steps: self.driver.steps_taken(),
            bodies: self.driver.world().body_count(),
            elapsed_seconds: self.timer.total_time(),
            average_fps: self.timer.average_fps(),
        };
        self.driver.shutdown();
        log::info!(
            "Engine shutdown complete: {} frames, {} steps in {:.2}s, {:.1} fps average",
            summary.frames,
            summary.steps,
            summary.elapsed_seconds,
            summary.average_fps
        );
        Ok(summary)
    }

    /// Route everything the event source has for this frame
    ///
    /// Events after a quit request in the same batch are dropped.
    fn route_events(&mut self) -> Result<(), EngineError> {
        let events = self.events.poll(self.frame);
        let total = events.len();

        for (index, event) in events.into_iter().enumerate() {
            match self.router.route(&event, self.driver.world_mut()) {
                Ok(RouteOutcome::Quit) => {
                    self.driver.stop();
                    let dropped = total - index - 1;
                    if dropped > 0 {
                        log::debug!("Dropping {dropped} events queued after quit");
                    }
                    return Ok(());
                }
                Ok(RouteOutcome::Spawned(handle)) => {
                    log::debug!("Spawned {handle:?} from {event:?}");
                }
                Ok(RouteOutcome::Ignored) => {}
                Err(error) if error.is_caller_error() => {
                    log::warn!("Ignoring {event:?}: {error}");
                }
                Err(error) => return Err(error.into()),
            }
        }
        Ok(())
    }

    /// Request engine shutdown; no further steps are taken
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.driver.stop();
    }

    /// The simulated world
    pub fn world(&self) -> &PhysicsWorld<B> {
        self.driver.world()
    }

    /// Mutable access to the simulated world
    pub fn world_mut(&mut self) -> &mut PhysicsWorld<B> {
        self.driver.world_mut()
    }

    /// The simulation driver
    pub fn driver(&self) -> &SimulationDriver<B> {
        &self.driver
    }

    /// Index of the current frame
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frame statistics
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// World setup, body creation or stepping failed
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// The presentation layer failed
    #[error("Presentation error: {0}")]
    Present(#[from] PresentError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
