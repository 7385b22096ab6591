//! # Unified Configuration System
//!
//! All startup parameters in one place: logging, display/tick rate,
//! simulation tuning and input defaults.
//!
//! ## Design Goals
//!
//! - **Centralized**: All configuration types in one place for easy discovery
//! - **Serializable**: Loadable from TOML or RON files
//! - **Type Safe**: Strong typing with validation and defaults

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;
use crate::physics::{UnitScale, WorldSettings};

use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core engine behavior: logging and debug features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter (`RUST_LOG` overrides it)
    pub log_level: String,
    /// Whether to log every presented frame
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Display Configuration
///
/// Screen dimensions in pixels and the tick rate of the main loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Screen width in pixels
    pub width: u32,
    /// Screen height in pixels
    pub height: u32,
    /// Ticks per second of the main loop
    pub target_fps: u32,
}

impl DisplayConfig {
    /// Create a display configuration
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            target_fps: 30,
        }
    }

    /// Set the tick rate
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Screen size must be non-zero, got {}x{}", self.width, self.height));
        }
        if self.target_fps == 0 {
            return Err("Target FPS must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

/// # Simulation Configuration
///
/// Parameters handed to the physics world at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravity in simulation units per second squared (+y points down the screen)
    pub gravity: Vec2,
    /// Duration of one fixed step in seconds
    pub step_seconds: f32,
    /// Velocity solver iterations per step
    pub velocity_iterations: usize,
    /// Position solver iterations per step
    pub position_iterations: usize,
    /// Pixels per simulation unit
    pub pixels_per_unit: f32,
}

impl SimulationConfig {
    /// Create a simulation configuration with default tuning
    pub fn new() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            step_seconds: 1.0 / 30.0,
            velocity_iterations: 8,
            position_iterations: 3,
            pixels_per_unit: UnitScale::DEFAULT_PIXELS_PER_UNIT,
        }
    }

    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the fixed step duration
    pub fn with_step_seconds(mut self, step_seconds: f32) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    /// Set solver iteration counts
    pub fn with_iterations(mut self, velocity: usize, position: usize) -> Self {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
        self
    }

    /// Set the unit scale
    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f32) -> Self {
        self.pixels_per_unit = pixels_per_unit;
        self
    }

    /// Settings for creating a physics world
    ///
    /// Values are not checked here; the world validates them on creation.
    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            gravity: self.gravity,
            step_seconds: self.step_seconds,
            velocity_iterations: self.velocity_iterations,
            position_iterations: self.position_iterations,
            scale: UnitScale::new(self.pixels_per_unit),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Input Configuration
///
/// How external events turn into world changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Width in pixels of bodies spawned by a pointer press
    pub spawn_width: f32,
    /// Height in pixels of bodies spawned by a pointer press
    pub spawn_height: f32,
    /// Whether the Escape key requests shutdown
    pub quit_on_escape: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            spawn_width: 20.0,
            spawn_height: 20.0,
            quit_on_escape: true,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Screen and tick rate
    pub display: DisplayConfig,
    /// Physics world parameters
    pub simulation: SimulationConfig,
    /// Input routing defaults
    pub input: InputConfig,
}

impl ApplicationConfig {
    /// Validate the parts of the configuration the physics world does not check itself
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}
