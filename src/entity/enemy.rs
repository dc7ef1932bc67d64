use std::f32::consts::PI;

use glam::Vec3;
use tracing::debug;

use crate::collision::{resolve, Aabb, CollisionMapInfo};
use crate::config::EnemyTuning;
use crate::easing::{ease_in_out, ease_in_out_sine, lerp};
use crate::entity::{Facing, Player, SceneHooks, ENTITY_HALF_EXTENTS};
use crate::map::GridMap;
use crate::transform::WorldTransform;
use crate::FRAME_DT;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnemyBehavior {
    Walk,
    /// Tumble animation after being struck, then removal.
    Death,
}

/// Wall-turn sequence inside `Walk`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnState {
    Walk,
    /// Stopped against a wall.
    Wait,
    /// Rotating toward the new facing.
    Turn,
}

fn facing_rotation_y(facing: Facing) -> f32 {
    match facing {
        Facing::Right => PI,
        Facing::Left => 0.0,
    }
}

pub struct Enemy {
    transform: WorldTransform,
    tuning: EnemyTuning,
    velocity: Vec3,

    behavior: EnemyBehavior,
    pending: Option<EnemyBehavior>,

    facing: Facing,
    next_facing: Facing,
    turn_state: TurnState,
    wait_timer: f32,
    turn_timer: f32,
    turn_first_rotation_y: f32,
    walk_timer: f32,

    death_timer: f32,
    collision_disabled: bool,
    dead: bool,
}

impl Enemy {
    /// Spawns walking left.
    pub fn new(position: Vec3, tuning: &EnemyTuning) -> Self {
        let facing = Facing::Left;
        let mut transform = WorldTransform::at(position);
        transform.rotation.y = facing_rotation_y(facing);
        transform.update_matrix();

        Self {
            transform,
            tuning: *tuning,
            velocity: Vec3::new(facing.sign() * tuning.walk_speed, 0.0, 0.0),
            behavior: EnemyBehavior::Walk,
            pending: None,
            facing,
            next_facing: facing,
            turn_state: TurnState::Walk,
            wait_timer: 0.0,
            turn_timer: 0.0,
            turn_first_rotation_y: 0.0,
            walk_timer: 0.0,
            death_timer: 0.0,
            collision_disabled: false,
            dead: false,
        }
    }

    pub fn request(&mut self, behavior: EnemyBehavior) {
        self.pending = Some(behavior);
    }

    pub fn update(&mut self, map: &GridMap) {
        if let Some(next) = self.pending.take() {
            debug!(from = ?self.behavior, to = ?next, "enemy behavior change");
            self.behavior = next;
            if next == EnemyBehavior::Death {
                self.death_timer = 0.0;
            }
        }

        match self.behavior {
            EnemyBehavior::Walk => self.walk_update(map),
            EnemyBehavior::Death => self.death_update(),
        }

        self.transform.update_matrix();
    }

    fn walk_update(&mut self, map: &GridMap) {
        if self.turn_state == TurnState::Wait {
            self.wait_timer -= FRAME_DT;
            if self.wait_timer <= 0.0 {
                self.turn_state = TurnState::Turn;
                self.turn_timer = self.tuning.turn_time;
                self.turn_first_rotation_y = self.transform.rotation.y;
            }
        }

        if self.turn_state == TurnState::Turn {
            self.turn_timer -= FRAME_DT;
            let progress = (1.0 - self.turn_timer / self.tuning.turn_time).clamp(0.0, 1.0);
            let destination = facing_rotation_y(self.next_facing);
            self.transform.rotation.y =
                lerp(self.turn_first_rotation_y, destination, ease_in_out_sine(progress));

            if self.turn_timer <= 0.0 {
                self.facing = self.next_facing;
                self.transform.rotation.y = destination;
                self.velocity.x = self.facing.sign() * self.tuning.walk_speed;
                self.turn_state = TurnState::Walk;
            }
        }

        if self.turn_state != TurnState::Walk {
            return;
        }

        let mut info = CollisionMapInfo::new(self.velocity);
        resolve(
            map,
            self.transform.translation,
            ENTITY_HALF_EXTENTS,
            &mut info,
            self.tuning.clearance,
        );
        self.react_to_wall_hit(&info);
        self.transform.translation += info.move_amount;

        // Forward tilt bob.
        self.walk_timer += FRAME_DT;
        let wave = (2.0 * PI * self.walk_timer / self.tuning.bob_period).sin();
        let degrees = self.tuning.bob_degrees * (wave + 1.0) / 2.0;
        self.transform.rotation.x = degrees.to_radians();
    }

    fn react_to_wall_hit(&mut self, info: &CollisionMapInfo) {
        if !info.hit_wall || self.turn_state != TurnState::Walk {
            return;
        }
        self.turn_state = TurnState::Wait;
        self.wait_timer = self.tuning.wait_time;
        self.next_facing = self.facing.opposite();
        self.velocity.x = 0.0;
    }

    fn death_update(&mut self) {
        self.death_timer += FRAME_DT;
        let t = self.death_timer / self.tuning.death_time;
        self.transform.rotation.y = ease_in_out(0.0, 3.0 * 2.0 * PI, t);
        self.transform.rotation.x = ease_in_out(0.0, PI / 2.0, t);
        if self.death_timer >= self.tuning.death_time {
            self.dead = true;
        }
    }

    /// Player contact. An attacking player kills this enemy and the scene is
    /// asked for a hit effect halfway between the two.
    pub fn on_collision(&mut self, player: &Player, hooks: &mut dyn SceneHooks) {
        if self.behavior == EnemyBehavior::Death || !player.is_attacking() {
            return;
        }
        self.collision_disabled = true;
        self.request(EnemyBehavior::Death);
        let midpoint = (self.transform.translation + player.translation()) / 2.0;
        hooks.spawn_hit_effect(midpoint);
    }

    pub fn aabb(&self) -> Aabb {
        let half = ENTITY_HALF_EXTENTS;
        Aabb::from_center(self.world_position(), Vec3::new(half.x, half.y, half.x))
    }

    pub fn transform(&self) -> &WorldTransform { &self.transform }
    pub fn world_position(&self) -> Vec3 { self.transform.world_position() }
    pub fn translation(&self) -> Vec3 { self.transform.translation }
    pub fn velocity(&self) -> Vec3 { self.velocity }
    pub fn behavior(&self) -> EnemyBehavior { self.behavior }
    pub fn turn_state(&self) -> TurnState { self.turn_state }
    pub fn facing(&self) -> Facing { self.facing }
    pub fn is_collision_disabled(&self) -> bool { self.collision_disabled }
    pub fn is_dead(&self) -> bool { self.dead }
}
