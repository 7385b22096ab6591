//! [`PhysicsBackend`] implementation on top of `rapier2d`

use rapier2d::prelude::*;

use crate::foundation::math::{Pose, Vec2};
use super::backend::{BackendFault, PhysicsBackend};
use super::body::{BodyDefinition, BodyKind};

/// Rapier pipeline and the sets it steps
pub struct RapierBackend {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl RapierBackend {
    /// Create an empty rapier world with the given gravity
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    fn first_non_finite_body(&self) -> Option<RigidBodyHandle> {
        self.rigid_body_set
            .iter()
            .map(|(handle, body)| (handle, Self::pose_of(body)))
            .find(|(_, pose)| !pose.is_finite())
            .map(|(handle, _)| handle)
    }

    fn pose_of(body: &RigidBody) -> Pose {
        let translation = body.translation();
        Pose::new(Vec2::new(translation.x, translation.y), body.rotation().angle())
    }
}

impl PhysicsBackend for RapierBackend {
    type BodyRef = RigidBodyHandle;

    fn create_body(&mut self, definition: &BodyDefinition) -> RigidBodyHandle {
        let builder = match definition.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body = builder
            .translation(vector![definition.position.x, definition.position.y])
            .build();
        let handle = self.rigid_body_set.insert(body);

        let half_extents = definition.shape.half_extents();
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            .density(definition.shape.density())
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        handle
    }

    fn step(
        &mut self,
        dt: f32,
        velocity_iterations: usize,
        position_iterations: usize,
    ) -> Result<(), BackendFault> {
        self.integration_parameters.dt = dt;
        self.integration_parameters.max_velocity_iterations = velocity_iterations;
        self.integration_parameters.max_stabilization_iterations = position_iterations;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        match self.first_non_finite_body() {
            Some(handle) => Err(BackendFault(format!("body {handle:?} has a non-finite pose after stepping"))),
            None => Ok(()),
        }
    }

    fn bodies(&self) -> Vec<RigidBodyHandle> {
        self.rigid_body_set.iter().map(|(handle, _)| handle).collect()
    }

    fn pose(&self, body: RigidBodyHandle) -> Option<Pose> {
        self.rigid_body_set.get(body).map(Self::pose_of)
    }

    fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }
}
