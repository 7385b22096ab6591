//! Routes input events to body spawns and shutdown requests

use crate::core::config::InputConfig;
use crate::foundation::collections::BodyHandle;
use crate::physics::{BodyKind, PhysicsBackend, PhysicsError, PhysicsWorld, RectangleBodyDesc};
use super::{InputEvent, KeyCode};

/// What routing an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A dynamic body was spawned
    Spawned(BodyHandle),
    /// Shutdown was requested
    Quit,
    /// Nothing changed
    Ignored,
}

/// Maps input events to world changes
#[derive(Debug, Clone)]
pub struct InputRouter {
    config: InputConfig,
}

impl InputRouter {
    /// Create a router with the given spawn defaults
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Spawn defaults in use
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Route one event
    ///
    /// Pointer presses spawn a dynamic box centered on the pointer. Key
    /// presses never touch the world; Escape may request shutdown.
    pub fn route<B: PhysicsBackend>(
        &self,
        event: &InputEvent,
        world: &mut PhysicsWorld<B>,
    ) -> Result<RouteOutcome, PhysicsError> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let desc = RectangleBodyDesc::new(
                    x,
                    y,
                    self.config.spawn_width,
                    self.config.spawn_height,
                    BodyKind::Dynamic,
                );
                world.add_rectangle_body(desc).map(RouteOutcome::Spawned)
            }
            InputEvent::KeyDown(KeyCode::Escape) if self.config.quit_on_escape => {
                log::info!("Escape pressed, requesting shutdown");
                Ok(RouteOutcome::Quit)
            }
            InputEvent::KeyDown(key) => {
                log::debug!("Key {key:?} pressed, no action bound");
                Ok(RouteOutcome::Ignored)
            }
            InputEvent::Quit => {
                log::info!("Quit event received");
                Ok(RouteOutcome::Quit)
            }
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
