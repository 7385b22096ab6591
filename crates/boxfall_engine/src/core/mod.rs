//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the simulation, display and input
//! - **Foundation**: Low-level utilities (math, handles, time, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    EngineConfig,
    DisplayConfig,
    SimulationConfig,
    InputConfig,
};
pub use crate::config::{Config, ConfigError};
