//! Moving actors: the player and the walking enemies.
//!
//! Both follow the same request pattern. Calling code (or the entity itself)
//! stores a behavior request; the next `update` promotes it, runs that
//! behavior's initializer once, and then runs the behavior's per-frame update
//! in the same tick.

pub mod enemy;
pub mod player;

pub use enemy::{Enemy, EnemyBehavior, TurnState};
pub use player::{AttackPhase, Player, PlayerBehavior};

use glam::{Vec2, Vec3};

/// Every actor occupies exactly one tile.
pub const ENTITY_HALF_EXTENTS: Vec2 = Vec2::new(0.5, 0.5);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Facing {
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Back-channel from an entity to the scene that owns it.
pub trait SceneHooks {
    fn spawn_hit_effect(&mut self, position: Vec3);
}

/// Hooks that drop every request. Handy when an entity is driven outside a
/// scene.
#[derive(Debug, Default)]
pub struct NoHooks;

impl SceneHooks for NoHooks {
    fn spawn_hit_effect(&mut self, _position: Vec3) {}
}
