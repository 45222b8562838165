use tracing::{instrument, trace};

use crate::collision::detection::mtv;
use crate::collision::resolution::{collision_impulse, positional_correction};
use crate::error::PhysicsError;
use crate::integration::integrator;

use super::physics_world::World;

/// Default step length, in milliseconds of a 60 Hz frame.
pub const DEFAULT_DELTA: f64 = 1000.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Time advanced by [`Engine::step`].
    pub delta: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { delta: DEFAULT_DELTA }
    }
}

/// Steps a [`World`]: integrate, re-index, broad phase, narrow phase, resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advances the world by the configured delta.
    pub fn step(&self, world: &mut World) -> Result<(), PhysicsError> {
        self.step_by(world, self.config.delta)
    }

    /// Advances the world by `delta`. A non-positive or non-finite delta does nothing.
    #[instrument(skip_all, fields(delta = delta, bodies = world.len()))]
    pub fn step_by(&self, world: &mut World, delta: f64) -> Result<(), PhysicsError> {
        if !(delta > 0.0) || !delta.is_finite() {
            return Ok(());
        }

        // 1. Integrate motion and mirror the new bounds
        for i in 0..world.len() {
            integrator::integrate(world.body_mut(i), delta);
            world.reindex(i)?;
        }

        // 2. Detect and resolve collisions, pair by pair
        for i in 0..world.len() {
            let body = world.body_mut(i);
            body.clear_contacts();
            if !body.is_dynamic() {
                continue;
            }

            for candidate in world.candidates(i) {
                let Some(j) = world.index_of(candidate) else {
                    continue;
                };
                if self.resolve_pair(world, i, j) {
                    world.reindex(i)?;
                    world.reindex(j)?;
                }
            }
        }
        Ok(())
    }

    /// Resolves the collision between bodies `i` and `j`, returning whether
    /// either was moved.
    fn resolve_pair(&self, world: &mut World, i: usize, j: usize) -> bool {
        let Some((body, other)) = world.pair_mut(i, j) else {
            return false;
        };

        let Some(m) = mtv(body.shape(), other.shape()) else {
            return false;
        };
        if m.is_zero() {
            return false;
        }

        trace!(i, j, depth = m.magnitude(), "resolving collision");
        collision_impulse(body, other, m);
        positional_correction(body, other, m);
        true
    }
}
