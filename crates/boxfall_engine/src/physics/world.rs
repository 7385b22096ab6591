//! World state store
//!
//! Owns the bodies of one simulation and the parameters every step uses.
//! Bodies are kept in insertion order and are never removed; the store is
//! dropped as a whole when the simulation ends.

use std::collections::HashSet;

use crate::foundation::collections::{BodyHandle, OrderedBodyMap};
use crate::foundation::math::{Pose, Vec2};
use super::backend::PhysicsBackend;
use super::body::{BodyKind, BodyView, RectangleBodyDesc, RectangleShape};
use super::rapier_backend::RapierBackend;
use super::units::UnitScale;
use super::PhysicsError;

/// Parameters fixed for the life of a world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    /// Gravity in simulation units per second squared
    pub gravity: Vec2,
    /// Duration of one fixed step in seconds
    pub step_seconds: f32,
    /// Velocity solver iterations per step
    pub velocity_iterations: usize,
    /// Position solver iterations per step
    pub position_iterations: usize,
    /// Pixels per simulation unit
    pub scale: UnitScale,
}

impl WorldSettings {
    /// Check every field
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.step_seconds.is_finite() && self.step_seconds > 0.0) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "step duration must be positive, got {}",
                self.step_seconds
            )));
        }
        if !(self.gravity.x.is_finite() && self.gravity.y.is_finite()) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "gravity must be finite, got ({}, {})",
                self.gravity.x, self.gravity.y
            )));
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "solver iterations must be at least 1, got {}/{}",
                self.velocity_iterations, self.position_iterations
            )));
        }
        if !self.scale.is_valid() {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "pixels per unit must be positive, got {}",
                self.scale.pixels_per_unit()
            )));
        }
        Ok(())
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.81),
            step_seconds: 1.0 / 30.0,
            velocity_iterations: 8,
            position_iterations: 3,
            scale: UnitScale::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct BodyRecord<R> {
    backend_ref: R,
    kind: BodyKind,
    shape: RectangleShape,
}

/// Bodies of one simulation plus the engine that moves them
pub struct PhysicsWorld<B: PhysicsBackend = RapierBackend> {
    settings: WorldSettings,
    backend: B,
    bodies: OrderedBodyMap<BodyRecord<B::BodyRef>>,
}

impl PhysicsWorld<RapierBackend> {
    /// Create a world stepped by rapier
    pub fn create(settings: WorldSettings) -> Result<Self, PhysicsError> {
        Self::with_backend(settings, RapierBackend::new)
    }
}

impl<B: PhysicsBackend> PhysicsWorld<B> {
    /// Create a world around a custom physics engine
    ///
    /// The settings are validated before the backend is built.
    pub fn with_backend(
        settings: WorldSettings,
        make_backend: impl FnOnce(Vec2) -> B,
    ) -> Result<Self, PhysicsError> {
        settings.validate()?;
        let backend = make_backend(settings.gravity);
        log::info!(
            "Created physics world: gravity=({}, {}), step={}s, iterations={}/{}, scale={}px/unit",
            settings.gravity.x,
            settings.gravity.y,
            settings.step_seconds,
            settings.velocity_iterations,
            settings.position_iterations,
            settings.scale.pixels_per_unit(),
        );
        Ok(Self {
            settings,
            backend,
            bodies: OrderedBodyMap::new(),
        })
    }

    /// Validate, convert and register a rectangle
    ///
    /// On error nothing is registered and the body count is unchanged.
    pub fn add_rectangle_body(&mut self, desc: RectangleBodyDesc) -> Result<BodyHandle, PhysicsError> {
        let definition = desc.resolve(self.settings.scale)?;
        let backend_ref = self.backend.create_body(&definition);
        let handle = self.bodies.push(BodyRecord {
            backend_ref,
            kind: definition.kind,
            shape: definition.shape,
        });
        log::debug!(
            "Added {:?} body {:?} at ({}, {})px size {}x{}px",
            desc.kind, handle, desc.x, desc.y, desc.width, desc.height
        );
        Ok(handle)
    }

    /// Body handles in insertion order
    pub fn list_bodies(&self) -> &[BodyHandle] {
        self.bodies.handles()
    }

    /// Current state of one body
    pub fn body(&self, handle: BodyHandle) -> Option<BodyView> {
        let record = self.bodies.get(handle)?;
        self.view(record)
    }

    /// Current state of every body, in insertion order
    ///
    /// A body the physics engine no longer knows is left out and logged; the
    /// next step reports it as a fault.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, BodyView)> + '_ {
        self.bodies.iter().filter_map(move |(handle, record)| {
            let view = self.view(record);
            if view.is_none() {
                log::warn!("Body {handle:?} has no pose in the physics engine, skipping it");
            }
            view.map(|view| (handle, view))
        })
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Gravity applied every step
    pub fn gravity(&self) -> Vec2 {
        self.backend.gravity()
    }

    /// Parameters the world was created with
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Pixel conversion factor
    pub fn scale(&self) -> UnitScale {
        self.settings.scale
    }

    /// The physics engine behind this world
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Advance by one fixed step
    ///
    /// A fault from the engine, or an engine whose body list no longer
    /// matches the store, is reported as `SimulationFault`.
    pub(crate) fn step(&mut self) -> Result<(), PhysicsError> {
        self.backend
            .step(
                self.settings.step_seconds,
                self.settings.velocity_iterations,
                self.settings.position_iterations,
            )
            .map_err(|fault| PhysicsError::SimulationFault(fault.0))?;
        self.verify_body_list()
    }

    fn verify_body_list(&self) -> Result<(), PhysicsError> {
        let live: HashSet<B::BodyRef> = self.backend.bodies().into_iter().collect();
        if live.len() != self.bodies.len() {
            return Err(PhysicsError::SimulationFault(format!(
                "physics engine reports {} bodies, world holds {}",
                live.len(),
                self.bodies.len()
            )));
        }
        if let Some((handle, _)) = self.bodies.iter().find(|(_, record)| !live.contains(&record.backend_ref)) {
            return Err(PhysicsError::SimulationFault(format!(
                "physics engine lost body {handle:?}"
            )));
        }
        Ok(())
    }

    fn view(&self, record: &BodyRecord<B::BodyRef>) -> Option<BodyView> {
        let pose: Pose = self.backend.pose(record.backend_ref)?;
        Some(BodyView {
            kind: record.kind,
            pose,
            shape: record.shape,
        })
    }
}
