//! # Boxfall Engine
//!
//! A fixed-tick 2D rigid-body simulation coordinator. It owns a physics
//! world, spawns rectangles into it, steps it at a constant rate, and hands
//! a snapshot of every body to a presentation layer each frame.
//!
//! ## Features
//!
//! - **Fixed Step**: deterministic advance, independent of frame timing
//! - **Pluggable Physics**: rapier by default, any [`physics::PhysicsBackend`]
//! - **Render Agnostic**: snapshots in pixels, ready for upload
//! - **Scripted Input**: frame-scheduled events for demos and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boxfall_engine::prelude::*;
//!
//! struct Platform;
//!
//! impl Application for Platform {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.world_mut().add_rectangle_body(
//!             RectangleBodyDesc::new(320.0, 430.0, 640.0, 30.0, BodyKind::Static),
//!         )?;
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let events = ScriptedEventSource::new()
//!         .with_event_at(10, InputEvent::PointerDown { x: 100.0, y: 100.0 })
//!         .with_event_at(90, InputEvent::Quit);
//!     let engine = Engine::from_config(&config, Box::new(events), Box::new(LogPresenter::new()))?;
//!     engine.run(&mut Platform)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod events;
pub mod input;
pub mod physics;
pub mod render;
pub mod simulation;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineError, RunSummary,
        foundation::{
            math::{Vec2, Pose},
            time::{Timer, Stopwatch, TickClock, SleepClock, ManualClock},
            collections::BodyHandle,
        },
        events::{EventSource, ScriptedEventSource},
        input::{InputEvent, InputRouter, KeyCode, RouteOutcome},
        physics::{
            BodyKind, PhysicsBackend, PhysicsError, PhysicsWorld, RapierBackend,
            RectangleBodyDesc, UnitScale, WorldSettings,
        },
        render::{capture_snapshot, LogPresenter, Presenter, RecordingPresenter, Snapshot},
        simulation::{DriverState, SimulationDriver},
        config::Config,
        core::config::{ApplicationConfig, DisplayConfig, EngineConfig, InputConfig, SimulationConfig},
    };
}
