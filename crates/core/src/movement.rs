//! Entity movement with optional collision resolution.
//!
//! With collisions on, the moving entity is hidden, the scene is baked once
//! (restricted to the entity's collision layers) and the move is resolved one
//! unit step at a time, X fully before Y. Each step tests the leading edge of
//! the entity box against the bake; the entity advances by the number of
//! clear steps.

use tracing::debug;

use crate::entity::EntityId;
use crate::error::SceneError;
use crate::scene::{RenderOptions, Scene};
use crate::stage::Stage;
use crate::types::{Axis, Vec2D};

/// Options for [`Scene::move_entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOptions {
    /// Force collisions on or off. `None` uses the entity's collision list.
    pub collide: Option<bool>,
    /// Fire move hooks after a move that did not collide.
    pub run_functions: bool,
    /// Render the scene for display afterwards (also when `auto_render` is set).
    pub render: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            collide: None,
            run_functions: true,
            render: false,
        }
    }
}

/// Result of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// The full delta was applied.
    Clear,
    /// Something stopped the entity short on at least one axis.
    Collided,
}

impl Movement {
    pub fn is_collision(self) -> bool {
        self == Movement::Collided
    }

    /// `1` when collided, else `0`.
    pub fn code(self) -> u8 {
        match self {
            Movement::Clear => 0,
            Movement::Collided => 1,
        }
    }
}

impl Scene {
    /// Move an attached entity by `delta`.
    pub fn move_entity(
        &mut self,
        id: EntityId,
        delta: impl Into<Vec2D>,
        opts: MoveOptions,
    ) -> Result<Movement, SceneError> {
        let index = self.index_of(id).ok_or(SceneError::UnknownEntity(id))?;
        let delta = delta.into();

        let entity = self.child(index);
        let collide = opts.collide.unwrap_or_else(|| entity.collides());
        let render = opts.render || entity.auto_render;

        let mut movement = Movement::Clear;
        if delta != Vec2D::ZERO {
            if collide {
                movement = self.step_with_collisions(index, delta);
            } else {
                self.child_mut(index).move_by(delta);
            }
        }

        if render {
            self.render(&RenderOptions::default())?;
        }

        if opts.run_functions && !movement.is_collision() {
            self.child_mut(index).run_move_functions();
        }

        Ok(movement)
    }

    fn step_with_collisions(&mut self, index: usize, delta: Vec2D) -> Movement {
        let entity = self.child_mut(index);
        let prev_hidden = entity.hidden;
        entity.hidden = true;
        let layers = entity.collisions.clone();

        let bake = self.compose(&layers);
        let mut movement = Movement::Clear;

        for axis in Axis::ORDER {
            let travel = delta.get(axis);
            if travel == 0 {
                continue;
            }
            let steps = self.clear_steps(index, axis, travel, &layers, &bake);
            if steps < travel.unsigned_abs() {
                movement = Movement::Collided;
                debug!(
                    entity = %self.child(index).id(),
                    ?axis,
                    travel,
                    steps,
                    "movement_blocked"
                );
            }
            // Reduced to one lap; `steps` can be 2^31 for an `i32::MIN` travel.
            let lap = i64::from(axis.extent(self.size()));
            let advance = (i64::from(steps) * i64::from(travel.signum())).rem_euclid(lap);
            self.child_mut(index).move_by(axis.vector(advance as i32, 0));
        }

        self.child_mut(index).hidden = prev_hidden;
        movement
    }

    /// Number of unit steps along `axis` before the leading edge hits something.
    fn clear_steps(
        &self,
        index: usize,
        axis: Axis,
        travel: i32,
        layers: &[i32],
        bake: &Stage,
    ) -> u32 {
        let entity = self.child(index);
        let pos = entity.pos().wrapped(self.size());
        let size = entity.size();
        let polarity = travel.signum();
        // First cell past the box in the direction of travel.
        let leading = if travel > 0 {
            axis.extent(size) as i32
        } else {
            -1
        };
        let across = axis.other().extent(size) as i32;

        let wanted = travel.unsigned_abs();
        // The bake is fixed, so checked cells repeat after one lap of the scene.
        let lap = u32::from(axis.extent(self.size()));
        for j in 0..wanted.min(lap) {
            let along = leading + j as i32 * polarity;
            let blocked = (0..across)
                .any(|wall| self.is_entity_at(pos + axis.vector(along, wall), layers, Some(bake)));
            if blocked {
                return j;
            }
        }
        wanted
    }
}
