//! Snapshot bridge between the world and the presentation layer
//!
//! Following the extract-then-draw split of the frame loop: once a step has
//! finished, every body's pose is read out into plain data and the world is
//! left alone until the next step. A presenter only ever sees the snapshot.

use bytemuck::{Pod, Zeroable};

use crate::foundation::collections::BodyHandle;
use crate::foundation::math::{Pose, Vec2};
use crate::physics::{BodyKind, PhysicsBackend, PhysicsWorld};

/// Renderable state of one body, in display pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    /// Body this entry was read from
    pub handle: BodyHandle,
    /// Static or dynamic
    pub kind: BodyKind,
    /// Center in pixels
    pub center: Vec2,
    /// Orientation in radians
    pub angle: f32,
    /// World-space corners in pixels, counter-clockwise from the local minimum corner
    pub corners: [Vec2; 4],
}

impl BodySnapshot {
    /// Pose in display pixels
    pub fn pose(&self) -> Pose {
        Pose::new(self.center, self.angle)
    }
}

/// One frame of read-only body state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    frame: u64,
    bodies: Vec<BodySnapshot>,
}

/// Vertex layout for uploading snapshot quads
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Position in pixels
    pub position: [f32; 2],
}

impl Snapshot {
    /// Frame index the snapshot was captured on
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Bodies in world insertion order
    pub fn bodies(&self) -> &[BodySnapshot] {
        &self.bodies
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world had no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Four vertices per body, in body order
    pub fn quad_vertices(&self) -> Vec<QuadVertex> {
        self.bodies
            .iter()
            .flat_map(|body| body.corners)
            .map(|corner| QuadVertex { position: [corner.x, corner.y] })
            .collect()
    }

    /// Quad vertices as raw bytes for a vertex buffer
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.quad_vertices()).to_vec()
    }
}

/// Read every body's current pose out of the world
///
/// Corners are rebuilt from the half extents and the current orientation on
/// every call. Takes `&PhysicsWorld`, so it cannot overlap a step.
pub fn capture_snapshot<B: PhysicsBackend>(world: &PhysicsWorld<B>, frame: u64) -> Snapshot {
    let scale = world.scale();
    let bodies = world
        .bodies()
        .map(|(handle, view)| {
            let corners = view
                .shape
                .local_corners()
                .map(|local| scale.point_to_display(view.pose.transform_point(local)));
            BodySnapshot {
                handle,
                kind: view.kind,
                center: scale.point_to_display(view.pose.position),
                angle: view.pose.angle,
                corners,
            }
        })
        .collect();

    Snapshot { frame, bodies }
}
