//! Rigid-body world: gravity, a static floor and the dynamic circles.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::config::FloorConfig;

/// Body and collider registered together for one circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircleHandle {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleDesc {
    pub position: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub elasticity: f32,
    pub friction: f32,
}

pub struct World {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    floor: Option<ColliderHandle>,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters: IntegrationParameters {
                // scene is measured in pixels
                length_unit: 100.0,
                ..Default::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            floor: None,
        }
    }

    /// Adds the static floor segment, replacing any previous one.
    pub fn set_floor(&mut self, floor: &FloorConfig) -> ColliderHandle {
        self.remove_floor();

        let collider = ColliderBuilder::capsule_from_endpoints(
            point![floor.a.x, floor.a.y],
            point![floor.b.x, floor.b.y],
            floor.radius,
        )
        .restitution(floor.elasticity)
        .restitution_combine_rule(CoefficientCombineRule::Multiply)
        .friction_combine_rule(CoefficientCombineRule::Multiply)
        .build();

        let handle = self.colliders.insert(collider);
        self.floor = Some(handle);
        handle
    }

    pub fn remove_floor(&mut self) {
        if let Some(handle) = self.floor.take() {
            self.colliders
                .remove(handle, &mut self.islands, &mut self.bodies, false);
        }
    }

    pub fn add_circle(&mut self, desc: &CircleDesc) -> CircleHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![desc.position.x, desc.position.y])
            .build();
        let body = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(desc.radius)
            .mass(desc.mass)
            .restitution(desc.elasticity)
            .friction(desc.friction)
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        CircleHandle { body, collider }
    }

    /// De-registers both the collider and the body of a circle.
    pub fn remove_circle(&mut self, handle: CircleHandle) {
        self.colliders
            .remove(handle.collider, &mut self.islands, &mut self.bodies, false);
        self.bodies.remove(
            handle.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            false,
        );
    }

    #[cfg(test)]
    pub fn contains(&self, handle: CircleHandle) -> bool {
        self.bodies.contains(handle.body) && self.colliders.contains(handle.collider)
    }

    pub fn position(&self, handle: CircleHandle) -> Option<Vec2> {
        self.bodies
            .get(handle.body)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Advances the simulation by `dt` seconds in a single step.
    pub fn step(&mut self, dt: f64) {
        // rapier divides by dt
        if dt <= 0.0 {
            return;
        }

        self.integration_parameters.dt = dt as Real;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}
